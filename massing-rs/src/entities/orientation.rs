use serde::{Deserialize, Serialize};

/// Hint for the axis along which `linear` and `deep` footprints are stretched.
/// Ignored by every other footprint bias.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Use the longer axis of the buildable area's bounding box
    #[default]
    Auto,
    /// The long side of the building runs east-west
    EastWest,
    /// The long side of the building runs north-south
    NorthSouth,
}
