use serde::{Deserialize, Serialize};

/// Coarse dial controlling how close to the legal maximum the generated massing sits.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    /// Lower density, more buffer
    Conservative,
    /// Balanced utilization
    #[default]
    Optimal,
    /// Maximum allowable
    Aggressive,
}

impl IntensityLevel {
    pub const ALL: [IntensityLevel; 3] = [
        IntensityLevel::Conservative,
        IntensityLevel::Optimal,
        IntensityLevel::Aggressive,
    ];

    /// Footprint sizing multiplier, applied to both the buildable area and the coverage ceiling.
    pub fn multiplier(self) -> f64 {
        match self {
            IntensityLevel::Conservative => 0.70,
            IntensityLevel::Optimal => 0.85,
            IntensityLevel::Aggressive => 0.95,
        }
    }

    /// Display name, as shown in logs
    pub fn label(self) -> &'static str {
        match self {
            IntensityLevel::Conservative => "Conservative",
            IntensityLevel::Optimal => "Optimal",
            IntensityLevel::Aggressive => "Aggressive",
        }
    }
}
