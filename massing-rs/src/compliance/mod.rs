use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::compliance::checks::{
    check_coverage_limit, check_envelope_containment, check_far_limit, check_height_limit,
};

/// The four individual checks
pub mod checks;

/// Outcome of a single check, or of a whole report.
/// Ordered by severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    EnvelopeContainment,
    FarLimit,
    HeightLimit,
    CoverageLimit,
}

impl CheckKind {
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::EnvelopeContainment => "Envelope Containment",
            CheckKind::FarLimit => "Floor Area Ratio",
            CheckKind::HeightLimit => "Height Limit",
            CheckKind::CoverageLimit => "Lot Coverage",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            CheckKind::EnvelopeContainment | CheckKind::CoverageLimit => "pct",
            CheckKind::FarLimit => "FAR",
            CheckKind::HeightLimit => "ft",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceCheck {
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub current_value: f64,
    pub limit_value: f64,
    pub unit: &'static str,
    pub message: String,
}

/// Aggregated result of all checks of a design
#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceReport {
    /// The most severe status among the checks
    pub overall: CheckStatus,
    pub checks: Vec<ComplianceCheck>,
    /// Messages of the failed checks
    pub violations: Vec<String>,
}

impl ComplianceReport {
    pub fn check(&self, kind: CheckKind) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

/// The regulatory limits a design is checked against
#[derive(Clone, Debug, PartialEq)]
pub struct DesignConstraints {
    /// Buildable envelope, ring of `[lng, lat]` vertices
    pub envelope: Polygon<f64>,
    /// Parcel boundary, ring of `[lng, lat]` vertices
    pub parcel: Polygon<f64>,
    pub far_cap: f64,
    pub height_cap_ft: f64,
    pub coverage_cap_pct: f64,
}

/// Configuration of the compliance checks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ComplianceConfig {
    /// Fraction of a limit above which a compliant value is reported as a warning
    pub warn_ratio: f64,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self { warn_ratio: 0.9 }
    }
}

/// Checks a design footprint of `floors` stories and `height_ft` against the constraints.
pub fn check_compliance(
    design: &Polygon<f64>,
    height_ft: f64,
    floors: u32,
    constraints: &DesignConstraints,
    config: ComplianceConfig,
) -> ComplianceReport {
    let checks = vec![
        check_envelope_containment(design, &constraints.envelope),
        check_far_limit(design, floors, &constraints.parcel, constraints.far_cap, config),
        check_height_limit(height_ft, constraints.height_cap_ft, config),
        check_coverage_limit(design, &constraints.parcel, constraints.coverage_cap_pct, config),
    ];

    let overall = checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(CheckStatus::Pass);

    let violations = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .map(|c| c.message.clone())
        .collect();

    ComplianceReport {
        overall,
        checks,
        violations,
    }
}

/// Whether none of the checks fails. Warnings do not invalidate a design.
pub fn is_design_valid(
    design: &Polygon<f64>,
    height_ft: f64,
    floors: u32,
    constraints: &DesignConstraints,
    config: ComplianceConfig,
) -> bool {
    check_compliance(design, height_ft, floors, constraints, config).overall != CheckStatus::Fail
}
