use log::debug;

use crate::entities::{Archetype, BuildableEnvelope, IntensityLevel};
use crate::geometry::polygon_ops::area_sqft;
use crate::preview::PreviewWarning;

/// Fraction of the height-permitted stories a conservative massing uses
const CONSERVATIVE_STORY_FRACTION: f64 = 0.7;

/// Footprint target, story count and floor-area metrics derived from an envelope,
/// before any geometry is constructed. All values are unrounded.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTargets {
    pub buildable_sqft: f64,
    pub intensity_factor: f64,
    pub target_footprint_sqft: f64,
    pub stories: u32,
    pub height_ft: f64,
    pub gfa_sqft: f64,
    pub far: f64,
    pub warnings: Vec<PreviewWarning>,
}

/// Resolves the footprint target and story count, then enforces the FAR and coverage caps.
pub fn resolve_targets(
    envelope: &BuildableEnvelope,
    archetype: &Archetype,
    intensity: IntensityLevel,
) -> ResolvedTargets {
    let buildable_sqft = area_sqft(&envelope.buildable_footprint);
    let intensity_factor = intensity.multiplier();
    let target_footprint_sqft = initial_target_sqft(buildable_sqft, envelope, intensity);

    let max_by_height =
        max_stories_by_height(envelope.height_cap_ft, archetype.floor_to_floor_height_ft);
    let stories = resolve_stories(max_by_height, archetype.typical_stories.target(), intensity);

    let mut warnings = vec![];
    if max_by_height == 0 {
        warnings.push(PreviewWarning::SingleStoryFloor);
    }

    let gfa_sqft = target_footprint_sqft * stories as f64;
    let mut resolved = ResolvedTargets {
        buildable_sqft,
        intensity_factor,
        target_footprint_sqft,
        stories,
        height_ft: stories as f64 * archetype.floor_to_floor_height_ft,
        gfa_sqft,
        far: gfa_sqft / envelope.parcel_sqft,
        warnings,
    };

    debug!(
        "[RESOLVER] buildable: {:.1} sqft, target: {:.1} sqft, stories: {} (max by height: {}), far: {:.3}",
        buildable_sqft, target_footprint_sqft, stories, max_by_height, resolved.far
    );

    resolved.apply_far_cap(envelope);
    resolved.apply_coverage_cap(envelope);
    resolved
}

/// Target footprint before any cap correction.
/// Intensity never pushes it above the physical (buildable) or regulatory (coverage) ceiling.
pub fn initial_target_sqft(
    buildable_sqft: f64,
    envelope: &BuildableEnvelope,
    intensity: IntensityLevel,
) -> f64 {
    f64::min(buildable_sqft, envelope.max_footprint_from_coverage_sqft()) * intensity.multiplier()
}

pub fn max_stories_by_height(height_cap_ft: f64, floor_to_floor_height_ft: f64) -> u32 {
    (height_cap_ft / floor_to_floor_height_ft).floor().max(0.0) as u32
}

/// Number of stories for the given intensity, never less than one.
pub fn resolve_stories(max_by_height: u32, typical_stories: u32, intensity: IntensityLevel) -> u32 {
    let stories = match intensity {
        IntensityLevel::Aggressive => max_by_height,
        IntensityLevel::Conservative => {
            let capped = (max_by_height as f64 * CONSERVATIVE_STORY_FRACTION).ceil() as u32;
            u32::min(typical_stories, capped)
        }
        IntensityLevel::Optimal => u32::min(typical_stories, max_by_height),
    };
    stories.max(1)
}

impl ResolvedTargets {
    /// Footprint-to-parcel ratio of the current target, in percent
    pub fn coverage_pct(&self, parcel_sqft: f64) -> f64 {
        self.target_footprint_sqft / parcel_sqft * 100.0
    }

    /// Shrinks the footprint so that GFA meets the FAR cap exactly, if it is exceeded.
    pub fn apply_far_cap(&mut self, envelope: &BuildableEnvelope) {
        if self.far > envelope.far_cap {
            let max_gfa_sqft = envelope.far_cap * envelope.parcel_sqft;
            self.target_footprint_sqft = max_gfa_sqft / self.stories as f64;
            self.gfa_sqft = max_gfa_sqft;
            self.far = envelope.far_cap;
            self.warnings.push(PreviewWarning::FarCapReduction);
            debug!(
                "[RESOLVER] FAR cap {} exceeded, footprint reduced to {:.1} sqft",
                envelope.far_cap, self.target_footprint_sqft
            );
        }
    }

    /// Shrinks the footprint to the intensity-scaled coverage ceiling, if the coverage cap is exceeded.
    /// FAR is recomputed but not re-checked.
    pub fn apply_coverage_cap(&mut self, envelope: &BuildableEnvelope) {
        if self.coverage_pct(envelope.parcel_sqft) > envelope.coverage_cap_pct {
            self.target_footprint_sqft =
                envelope.max_footprint_from_coverage_sqft() * self.intensity_factor;
            self.gfa_sqft = self.target_footprint_sqft * self.stories as f64;
            self.far = self.gfa_sqft / envelope.parcel_sqft;
            self.warnings.push(PreviewWarning::CoverageCapReduction);
            debug!(
                "[RESOLVER] coverage cap {}% exceeded, footprint reduced to {:.1} sqft",
                envelope.coverage_cap_pct, self.target_footprint_sqft
            );
        }
    }
}
