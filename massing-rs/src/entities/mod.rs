mod archetype;
mod envelope;
mod intensity;
mod orientation;

#[doc(inline)]
pub use archetype::{
    Archetype, BUILDING_TYPES, BuildingCategory, BuildingType, FootprintBias, TypicalStories,
    all_building_types, building_type_by_id, building_types_by_category,
};
#[doc(inline)]
pub use envelope::BuildableEnvelope;
#[doc(inline)]
pub use intensity::IntensityLevel;
#[doc(inline)]
pub use orientation::OrientationMode;

/// Everything the preview engine needs to generate a building preview.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewInput {
    pub envelope: BuildableEnvelope,
    pub archetype: Archetype,
    pub intensity: IntensityLevel,
    pub orientation: OrientationMode,
}

/// An identified [`PreviewInput`], optionally accompanied by the parcel boundary it was derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewRequest {
    pub id: String,
    pub input: PreviewInput,
    pub parcel: Option<geo::Polygon<f64>>,
}
