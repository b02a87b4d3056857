use geo::Polygon;

use crate::entities::BuildableEnvelope;
use crate::preview::resolver::ResolvedTargets;
use crate::preview::{BuildingPreview, PreviewWarning};

/// Packages a successfully shaped footprint and its resolved metrics into a valid preview.
/// This is the only place where metrics are rounded.
pub fn assemble_preview(
    footprint: Polygon<f64>,
    resolved: ResolvedTargets,
    envelope: &BuildableEnvelope,
) -> BuildingPreview {
    let coverage_pct = resolved.coverage_pct(envelope.parcel_sqft);

    BuildingPreview {
        footprint: Some(footprint),
        height_ft: resolved.height_ft,
        stories: resolved.stories,
        gfa_sqft: resolved.gfa_sqft.round(),
        far: round_to_decimals(resolved.far, 2),
        coverage_pct: round_to_decimals(coverage_pct, 1),
        warnings: resolved.warnings,
        is_valid: true,
    }
}

/// A preview without footprint: every metric is zero and `reason` is the only warning.
pub fn invalid_preview(reason: PreviewWarning) -> BuildingPreview {
    BuildingPreview {
        footprint: None,
        height_ft: 0.0,
        stories: 0,
        gfa_sqft: 0.0,
        far: 0.0,
        coverage_pct: 0.0,
        warnings: vec![reason],
        is_valid: false,
    }
}

pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
