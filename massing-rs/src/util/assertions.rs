use crate::entities::BuildableEnvelope;
use crate::preview::assembler::round_to_decimals;
use crate::preview::{BuildingPreview, PreviewWarning};
use crate::util::FPA;

/// A valid preview stays within the FAR and coverage caps, up to the rounding of the reported metrics.
/// Rounding is monotonic, so a rounded metric never exceeds the cap rounded the same way.
/// FAR is exempt once the coverage correction rescaled the footprint, it is not re-checked afterwards.
pub fn preview_respects_caps(preview: &BuildingPreview, envelope: &BuildableEnvelope) -> bool {
    if !preview.is_valid {
        return true;
    }
    let far_ok = preview.has_warning(&PreviewWarning::CoverageCapReduction)
        || !FPA(preview.far).exceeds(round_to_decimals(envelope.far_cap, 2));
    let coverage_ok =
        !FPA(preview.coverage_pct).exceeds(round_to_decimals(envelope.coverage_cap_pct, 1));

    far_ok && coverage_ok
}

/// A valid preview has at least one story and a footprint.
pub fn preview_is_complete(preview: &BuildingPreview) -> bool {
    !preview.is_valid || (preview.stories >= 1 && preview.footprint.is_some())
}

/// An invalid preview carries no footprint, only zero metrics and exactly one warning.
pub fn failure_is_total(preview: &BuildingPreview) -> bool {
    preview.is_valid
        || (preview.footprint.is_none()
            && preview.stories == 0
            && preview.height_ft == 0.0
            && preview.gfa_sqft == 0.0
            && preview.far == 0.0
            && preview.coverage_pct == 0.0
            && preview.warnings.len() == 1)
}
