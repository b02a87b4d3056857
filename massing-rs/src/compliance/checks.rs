use std::panic::{AssertUnwindSafe, catch_unwind};

use geo::Polygon;
use log::warn;

use crate::compliance::{CheckKind, CheckStatus, ComplianceCheck, ComplianceConfig};
use crate::geometry::polygon_ops::{area_outside_sqm, area_sqft, area_sqm};
use crate::preview::assembler::round_to_decimals;
use crate::util::FPA;

/// Fraction of the design area allowed outside the envelope before containment fails.
/// Absorbs the noise of the boolean operations on clipped footprints.
const CONTAINMENT_TOLERANCE: f64 = 1e-6;

/// Grades `current` against `limit`: above the limit fails, above `warn_ratio` of it warns.
/// A value equal to the limit (up to float noise) does not fail.
pub fn grade(current: f64, limit: f64, warn_ratio: f64) -> CheckStatus {
    if FPA(current).exceeds(limit) {
        CheckStatus::Fail
    } else if current > limit * warn_ratio {
        CheckStatus::Warn
    } else {
        CheckStatus::Pass
    }
}

pub fn check_envelope_containment(design: &Polygon<f64>, envelope: &Polygon<f64>) -> ComplianceCheck {
    let kind = CheckKind::EnvelopeContainment;
    let design_sqm = area_sqm(design);
    if !is_usable_area(design_sqm) {
        warn!("[COMPLIANCE] design area is degenerate ({design_sqm} m²)");
        return unable(kind, 100.0, "Unable to verify envelope containment");
    }

    //boolean operations may panic on near-degenerate input
    let Ok(outside_sqm) = catch_unwind(AssertUnwindSafe(|| area_outside_sqm(design, envelope))) else {
        warn!("[COMPLIANCE] difference of design and envelope could not be computed");
        return unable(kind, 100.0, "Unable to verify envelope containment");
    };
    if outside_sqm / design_sqm <= CONTAINMENT_TOLERANCE {
        return check(
            kind,
            CheckStatus::Pass,
            100.0,
            100.0,
            "Design is fully within regulatory envelope".to_string(),
        );
    }

    let contained_pct = ((design_sqm - outside_sqm) / design_sqm * 100.0).round();
    check(
        kind,
        CheckStatus::Fail,
        contained_pct,
        100.0,
        format!(
            "Design extends outside regulatory envelope ({}% outside)",
            100.0 - contained_pct
        ),
    )
}

pub fn check_far_limit(
    design: &Polygon<f64>,
    floors: u32,
    parcel: &Polygon<f64>,
    far_cap: f64,
    config: ComplianceConfig,
) -> ComplianceCheck {
    let kind = CheckKind::FarLimit;
    let parcel_sqft = area_sqft(parcel);
    let footprint_sqft = area_sqft(design);
    if !is_usable_area(parcel_sqft) || !footprint_sqft.is_finite() {
        warn!("[COMPLIANCE] cannot compute FAR on a parcel of {parcel_sqft} sqft");
        return unable(kind, far_cap, "Unable to calculate FAR");
    }

    let far = footprint_sqft * floors as f64 / parcel_sqft;
    let status = grade(far, far_cap, config.warn_ratio);
    let message = match status {
        CheckStatus::Fail => format!("FAR exceeds maximum ({far:.2} vs {far_cap} allowed)"),
        CheckStatus::Warn => format!(
            "FAR at {:.0}% of maximum ({far:.2} of {far_cap})",
            far / far_cap * 100.0
        ),
        CheckStatus::Pass => format!("FAR compliant ({far:.2} of {far_cap} max)"),
    };
    check(kind, status, round_to_decimals(far, 2), far_cap, message)
}

pub fn check_height_limit(height_ft: f64, height_cap_ft: f64, config: ComplianceConfig) -> ComplianceCheck {
    let kind = CheckKind::HeightLimit;
    if !height_ft.is_finite() {
        return unable(kind, height_cap_ft, "Unable to verify height");
    }

    let status = grade(height_ft, height_cap_ft, config.warn_ratio);
    let message = match status {
        CheckStatus::Fail => {
            format!("Height exceeds maximum ({height_ft}' vs {height_cap_ft}' allowed)")
        }
        CheckStatus::Warn => format!(
            "Height at {:.0}% of maximum ({height_ft}' of {height_cap_ft}')",
            height_ft / height_cap_ft * 100.0
        ),
        CheckStatus::Pass => format!("Height compliant ({height_ft}' of {height_cap_ft}' max)"),
    };
    check(kind, status, height_ft, height_cap_ft, message)
}

pub fn check_coverage_limit(
    design: &Polygon<f64>,
    parcel: &Polygon<f64>,
    coverage_cap_pct: f64,
    config: ComplianceConfig,
) -> ComplianceCheck {
    let kind = CheckKind::CoverageLimit;
    let parcel_sqm = area_sqm(parcel);
    let design_sqm = area_sqm(design);
    if !is_usable_area(parcel_sqm) || !design_sqm.is_finite() {
        warn!("[COMPLIANCE] cannot compute coverage on a parcel of {parcel_sqm} m²");
        return unable(kind, coverage_cap_pct, "Unable to calculate coverage");
    }

    let coverage_pct = design_sqm / parcel_sqm * 100.0;
    let status = grade(coverage_pct, coverage_cap_pct, config.warn_ratio);
    let message = match status {
        CheckStatus::Fail => format!(
            "Coverage exceeds maximum ({coverage_pct:.1}% vs {coverage_cap_pct}% allowed)"
        ),
        CheckStatus::Warn => format!(
            "Coverage at {:.0}% of maximum ({coverage_pct:.1}%)",
            coverage_pct / coverage_cap_pct * 100.0
        ),
        CheckStatus::Pass => {
            format!("Coverage compliant ({coverage_pct:.1}% of {coverage_cap_pct}% max)")
        }
    };
    check(
        kind,
        status,
        round_to_decimals(coverage_pct, 1),
        coverage_cap_pct,
        message,
    )
}

fn check(
    kind: CheckKind,
    status: CheckStatus,
    current_value: f64,
    limit_value: f64,
    message: String,
) -> ComplianceCheck {
    ComplianceCheck {
        kind,
        status,
        current_value,
        limit_value,
        unit: kind.unit(),
        message,
    }
}

/// A check that could not be evaluated is reported as a warning rather than failing the report.
fn unable(kind: CheckKind, limit_value: f64, message: &str) -> ComplianceCheck {
    check(kind, CheckStatus::Warn, 0.0, limit_value, message.to_string())
}

fn is_usable_area(area: f64) -> bool {
    area.is_finite() && area > 0.0
}
