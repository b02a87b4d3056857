use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Strategy used to turn a target area into a concrete footprint polygon.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FootprintBias {
    /// Uniformly scaled toward the centroid of the buildable area
    Compact,
    /// Wide and shallow, stretched along the long axis
    Linear,
    /// Deep and narrow, stretched perpendicular to the long axis
    Deep,
    /// Smaller than compact, for taller vertically stacked programs
    Stacked,
    /// A 2:1 rectangle of exactly the target area
    Modular,
}

/// Typical number of stories of an archetype
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum TypicalStories {
    Fixed(u32),
    /// Inclusive `[min, max]` range
    Range(u32, u32),
}

impl TypicalStories {
    /// Story count the preview aims for: the fixed value, or the maximum of the range.
    pub fn target(self) -> u32 {
        match self {
            TypicalStories::Fixed(n) => n,
            TypicalStories::Range(_, max) => max,
        }
    }
}

/// Building-type template: how tall a story is, how many of them are typical
/// and how the footprint is shaped.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Archetype {
    pub typical_stories: TypicalStories,
    /// Height of a single story (floor to floor) in feet
    pub floor_to_floor_height_ft: f64,
    pub footprint_bias: FootprintBias,
}

impl Archetype {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.floor_to_floor_height_ft.is_finite() && self.floor_to_floor_height_ft > 0.0,
            "floor-to-floor height must be positive, got {} ft",
            self.floor_to_floor_height_ft
        );
        if let TypicalStories::Range(min, max) = self.typical_stories {
            ensure!(min <= max, "invalid story range [{min}, {max}]");
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCategory {
    Commercial,
    Industrial,
    Residential,
    Hospitality,
}

/// Entry of the static building-type registry
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct BuildingType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: BuildingCategory,
    pub archetype: Archetype,
}

/// Immutable registry of the supported building types
pub static BUILDING_TYPES: [BuildingType; 8] = [
    BuildingType {
        id: "single_story_retail_pad",
        name: "Single-Story Retail Pad",
        description: "Freestanding retail building with dedicated parking, ideal for national tenants.",
        category: BuildingCategory::Commercial,
        archetype: Archetype {
            typical_stories: TypicalStories::Fixed(1),
            floor_to_floor_height_ft: 18.0,
            footprint_bias: FootprintBias::Compact,
        },
    },
    BuildingType {
        id: "multi_tenant_retail_strip",
        name: "Multi-Tenant Retail Strip",
        description: "Linear inline retail with multiple tenant spaces and front parking.",
        category: BuildingCategory::Commercial,
        archetype: Archetype {
            typical_stories: TypicalStories::Fixed(1),
            floor_to_floor_height_ft: 16.0,
            footprint_bias: FootprintBias::Linear,
        },
    },
    BuildingType {
        id: "medical_office",
        name: "Medical Office Building",
        description: "Multi-story medical office with high parking requirements.",
        category: BuildingCategory::Commercial,
        archetype: Archetype {
            typical_stories: TypicalStories::Range(2, 4),
            floor_to_floor_height_ft: 12.0,
            footprint_bias: FootprintBias::Compact,
        },
    },
    BuildingType {
        id: "industrial_warehouse",
        name: "Industrial Warehouse",
        description: "Large footprint distribution or manufacturing facility with clear heights.",
        category: BuildingCategory::Industrial,
        archetype: Archetype {
            typical_stories: TypicalStories::Fixed(1),
            floor_to_floor_height_ft: 32.0,
            footprint_bias: FootprintBias::Deep,
        },
    },
    BuildingType {
        id: "low_rise_multifamily",
        name: "Low-Rise Multifamily",
        description: "Garden-style apartments or townhomes with surface parking.",
        category: BuildingCategory::Residential,
        archetype: Archetype {
            typical_stories: TypicalStories::Range(2, 4),
            floor_to_floor_height_ft: 11.0,
            footprint_bias: FootprintBias::Modular,
        },
    },
    BuildingType {
        id: "hotel_hospitality",
        name: "Hotel / Hospitality",
        description: "Multi-story hotel with lobby, rooms, and amenity spaces.",
        category: BuildingCategory::Hospitality,
        archetype: Archetype {
            typical_stories: TypicalStories::Range(3, 6),
            floor_to_floor_height_ft: 10.0,
            footprint_bias: FootprintBias::Stacked,
        },
    },
    BuildingType {
        id: "qsr_drive_thru",
        name: "QSR / Drive-Thru",
        description: "Quick service restaurant with drive-thru lane and queue stacking.",
        category: BuildingCategory::Commercial,
        archetype: Archetype {
            typical_stories: TypicalStories::Fixed(1),
            floor_to_floor_height_ft: 15.0,
            footprint_bias: FootprintBias::Compact,
        },
    },
    BuildingType {
        id: "flex_light_mixed_use",
        name: "Flex / Light Mixed-Use",
        description: "Flexible space combining office, showroom, and light industrial.",
        category: BuildingCategory::Commercial,
        archetype: Archetype {
            typical_stories: TypicalStories::Range(1, 3),
            floor_to_floor_height_ft: 14.0,
            footprint_bias: FootprintBias::Linear,
        },
    },
];

pub fn all_building_types() -> &'static [BuildingType] {
    &BUILDING_TYPES
}

pub fn building_type_by_id(id: &str) -> Option<&'static BuildingType> {
    BUILDING_TYPES.iter().find(|bt| bt.id == id)
}

pub fn building_types_by_category(
    category: BuildingCategory,
) -> impl Iterator<Item = &'static BuildingType> {
    BUILDING_TYPES.iter().filter(move |bt| bt.category == category)
}
