use serde::{Deserialize, Serialize};

use crate::compliance::{CheckKind, CheckStatus};
use crate::entities::{Archetype, IntensityLevel, OrientationMode};

/// GeoJSON-compatible polygon geometry.
/// Positions are `[lng, lat]`, the first ring is the exterior. Further rings (holes) are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPolygon {
    #[serde(rename = "type")]
    pub geometry_type: ExtGeometryType,
    pub coordinates: Vec<Vec<(f64, f64)>>,
}

/// The only GeoJSON geometry type understood by this library
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExtGeometryType {
    #[default]
    Polygon,
}

/// External representation of a [`BuildableEnvelope`](crate::entities::BuildableEnvelope).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtEnvelope {
    /// Buildable area after setbacks
    pub buildable_footprint: ExtPolygon,
    /// Parcel area in square feet.
    /// Derived from the parcel polygon of the request if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_sqft: Option<f64>,
    pub far_cap: f64,
    pub coverage_cap_pct: f64,
    pub height_cap_ft: f64,
}

/// Either a building type of the registry or a custom archetype
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtArchetype {
    /// Id of a building type in [`BUILDING_TYPES`](crate::entities::BUILDING_TYPES)
    Registry(String),
    Custom(Archetype),
}

/// A single preview to generate
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPreviewRequest {
    /// Identifier of the request, echoed in the results
    pub id: String,
    pub envelope: ExtEnvelope,
    pub archetype: ExtArchetype,
    pub intensity: IntensityLevel,
    #[serde(default)]
    pub orientation: OrientationMode,
    /// Parcel boundary. Enables the compliance checks and the parcel area derivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel: Option<ExtPolygon>,
}

/// A batch of requests, as read by the command line tool
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPreviewBatch {
    pub requests: Vec<ExtPreviewRequest>,
}

/// External representation of a [`BuildingPreview`](crate::preview::BuildingPreview).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtBuildingPreview {
    /// Absent when the preview is invalid
    pub footprint: Option<ExtPolygon>,
    pub height_ft: f64,
    pub stories: u32,
    pub gfa_sqft: f64,
    pub far: f64,
    pub coverage_pct: f64,
    /// Human-readable warnings, in the order they were raised
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

/// External representation of a [`ComplianceCheck`](crate::compliance::ComplianceCheck).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtComplianceCheck {
    pub id: CheckKind,
    pub name: String,
    pub status: CheckStatus,
    pub current_value: f64,
    pub limit_value: f64,
    pub unit: String,
    pub message: String,
}

/// External representation of a [`ComplianceReport`](crate::compliance::ComplianceReport).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtComplianceReport {
    pub overall: CheckStatus,
    pub checks: Vec<ExtComplianceCheck>,
    pub violations: Vec<String>,
}
