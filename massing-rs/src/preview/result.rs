use std::fmt::{Display, Formatter};

use geo::Polygon;

/// Reason attached to a preview, rendered verbatim by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewWarning {
    /// The footprint was shrunk so that GFA stays within the FAR cap
    FarCapReduction,
    /// The footprint was shrunk so that it stays within the coverage cap
    CoverageCapReduction,
    /// The height cap does not fit a single story, one story is used regardless
    SingleStoryFloor,
    /// No footprint polygon could be constructed inside the envelope
    FootprintUnavailable,
    /// The inputs could not be processed
    GenerationError(String),
}

impl Display for PreviewWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewWarning::FarCapReduction => write!(f, "Footprint reduced to meet FAR cap"),
            PreviewWarning::CoverageCapReduction => {
                write!(f, "Footprint reduced to meet coverage cap")
            }
            PreviewWarning::SingleStoryFloor => write!(
                f,
                "Height cap is below one story; preview uses a single story"
            ),
            PreviewWarning::FootprintUnavailable => {
                write!(f, "Unable to generate footprint within envelope")
            }
            PreviewWarning::GenerationError(msg) => write!(f, "Error generating preview: {msg}"),
        }
    }
}

/// Outcome of a preview generation.
///
/// `is_valid` is the sole failure signal: an invalid preview has no footprint,
/// all its metrics are zero and `warnings` holds the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingPreview {
    pub footprint: Option<Polygon<f64>>,
    pub height_ft: f64,
    pub stories: u32,
    /// Gross floor area in square feet, rounded to an integer
    pub gfa_sqft: f64,
    /// Floor area ratio, rounded to 2 decimals
    pub far: f64,
    /// Footprint-to-parcel ratio in percent, rounded to 1 decimal
    pub coverage_pct: f64,
    pub warnings: Vec<PreviewWarning>,
    pub is_valid: bool,
}

impl BuildingPreview {
    pub fn has_warning(&self, warning: &PreviewWarning) -> bool {
        self.warnings.contains(warning)
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}
