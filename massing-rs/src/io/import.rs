use anyhow::{Context, Result, bail, ensure};
use geo::Polygon;
use log::{debug, warn};

use crate::entities::{
    Archetype, BuildableEnvelope, PreviewInput, PreviewRequest, building_type_by_id,
};
use crate::geometry::polygon_ops::{area_sqft, polygon_from_ring};
use crate::io::ext_repr::{ExtArchetype, ExtEnvelope, ExtPolygon, ExtPreviewRequest};

/// Imports the exterior ring of a GeoJSON polygon.
pub fn import_polygon(ext_polygon: &ExtPolygon) -> Result<Polygon<f64>> {
    let Some(exterior) = ext_polygon.coordinates.first() else {
        bail!("polygon has no rings");
    };
    if ext_polygon.coordinates.len() > 1 {
        warn!(
            "ignoring {} interior ring(s) of polygon",
            ext_polygon.coordinates.len() - 1
        );
    }
    polygon_from_ring(exterior)
}

/// Imports an envelope. `parcel` is used to derive the parcel area when the envelope does not state it.
pub fn import_envelope(ext_envelope: &ExtEnvelope, parcel: Option<&Polygon<f64>>) -> Result<BuildableEnvelope> {
    let buildable_footprint =
        import_polygon(&ext_envelope.buildable_footprint).context("invalid buildable footprint")?;

    let parcel_sqft = match (ext_envelope.parcel_sqft, parcel) {
        (Some(parcel_sqft), _) => parcel_sqft,
        (None, Some(parcel)) => {
            let parcel_sqft = area_sqft(parcel);
            debug!("parcel area derived from parcel polygon: {parcel_sqft:.1} sqft");
            parcel_sqft
        }
        (None, None) => bail!("envelope needs either a parcel area or a parcel polygon"),
    };

    let envelope = BuildableEnvelope {
        buildable_footprint,
        parcel_sqft,
        far_cap: ext_envelope.far_cap,
        coverage_cap_pct: ext_envelope.coverage_cap_pct,
        height_cap_ft: ext_envelope.height_cap_ft,
    };
    envelope.validate()?;
    Ok(envelope)
}

pub fn import_archetype(ext_archetype: &ExtArchetype) -> Result<Archetype> {
    let archetype = match ext_archetype {
        ExtArchetype::Registry(id) => match building_type_by_id(id) {
            Some(building_type) => building_type.archetype,
            None => bail!("unknown building type: {id}"),
        },
        ExtArchetype::Custom(archetype) => *archetype,
    };
    archetype.validate()?;
    Ok(archetype)
}

pub fn import_request(ext_request: &ExtPreviewRequest) -> Result<PreviewRequest> {
    ensure!(!ext_request.id.is_empty(), "request id is empty");

    let parcel = ext_request
        .parcel
        .as_ref()
        .map(import_polygon)
        .transpose()
        .context("invalid parcel")?;
    let envelope = import_envelope(&ext_request.envelope, parcel.as_ref())
        .with_context(|| format!("invalid envelope in request {}", ext_request.id))?;
    let archetype = import_archetype(&ext_request.archetype)
        .with_context(|| format!("invalid archetype in request {}", ext_request.id))?;

    Ok(PreviewRequest {
        id: ext_request.id.clone(),
        input: PreviewInput {
            envelope,
            archetype,
            intensity: ext_request.intensity,
            orientation: ext_request.orientation,
        },
        parcel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FootprintBias, IntensityLevel, OrientationMode, TypicalStories};
    use crate::io::ext_repr::ExtGeometryType;

    fn square(side_deg: f64) -> ExtPolygon {
        ExtPolygon {
            geometry_type: ExtGeometryType::Polygon,
            coordinates: vec![vec![
                (-95.37, 29.76),
                (-95.37 + side_deg, 29.76),
                (-95.37 + side_deg, 29.76 + side_deg),
                (-95.37, 29.76 + side_deg),
                (-95.37, 29.76),
            ]],
        }
    }

    fn ext_envelope(parcel_sqft: Option<f64>) -> ExtEnvelope {
        ExtEnvelope {
            buildable_footprint: square(0.0005),
            parcel_sqft,
            far_cap: 2.0,
            coverage_cap_pct: 50.0,
            height_cap_ft: 40.0,
        }
    }

    #[test]
    fn geojson_polygon_is_parsed() {
        let json = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}"#;
        let ext: ExtPolygon = serde_json::from_str(json).unwrap();
        let polygon = import_polygon(&ext).unwrap();
        assert_eq!(polygon.exterior().0.len(), 4);

        let multi = r#"{"type": "MultiPolygon", "coordinates": []}"#;
        assert!(serde_json::from_str::<ExtPolygon>(multi).is_err());
    }

    #[test]
    fn polygon_without_rings_is_rejected() {
        let ext = ExtPolygon {
            geometry_type: ExtGeometryType::Polygon,
            coordinates: vec![],
        };
        assert!(import_polygon(&ext).is_err());
    }

    #[test]
    fn parcel_area_is_derived_from_parcel_polygon() {
        let parcel = import_polygon(&square(0.001)).unwrap();
        let stated = import_envelope(&ext_envelope(Some(12_345.0)), Some(&parcel)).unwrap();
        assert_eq!(stated.parcel_sqft, 12_345.0);

        let derived = import_envelope(&ext_envelope(None), Some(&parcel)).unwrap();
        assert_eq!(derived.parcel_sqft, area_sqft(&parcel));

        assert!(import_envelope(&ext_envelope(None), None).is_err());
    }

    #[test]
    fn invalid_caps_are_rejected() {
        let envelope = ExtEnvelope {
            far_cap: -1.0,
            ..ext_envelope(Some(10_000.0))
        };
        assert!(import_envelope(&envelope, None).is_err());
    }

    #[test]
    fn archetypes_by_id_or_custom() {
        let registry = import_archetype(&ExtArchetype::Registry("industrial_warehouse".into())).unwrap();
        assert_eq!(registry.footprint_bias, FootprintBias::Deep);
        assert_eq!(registry.floor_to_floor_height_ft, 32.0);

        assert!(import_archetype(&ExtArchetype::Registry("castle".into())).is_err());

        let custom = Archetype {
            typical_stories: TypicalStories::Range(2, 3),
            floor_to_floor_height_ft: 0.0,
            footprint_bias: FootprintBias::Compact,
        };
        assert!(import_archetype(&ExtArchetype::Custom(custom)).is_err());
    }

    #[test]
    fn request_with_defaults() {
        let json = r#"{
            "id": "lot-7",
            "envelope": {
                "buildable_footprint": {"type": "Polygon", "coordinates": [[[-95.37, 29.76], [-95.3695, 29.76], [-95.3695, 29.7605], [-95.37, 29.7605]]]},
                "parcel_sqft": 10000.0,
                "far_cap": 2.0,
                "coverage_cap_pct": 50.0,
                "height_cap_ft": 40.0
            },
            "archetype": {"type": "registry", "data": "medical_office"},
            "intensity": "aggressive"
        }"#;
        let ext: ExtPreviewRequest = serde_json::from_str(json).unwrap();
        let request = import_request(&ext).unwrap();
        assert_eq!(request.id, "lot-7");
        assert_eq!(request.input.intensity, IntensityLevel::Aggressive);
        assert_eq!(request.input.orientation, OrientationMode::Auto);
        assert!(request.parcel.is_none());

        let unknown_intensity = json.replace("aggressive", "extreme");
        assert!(serde_json::from_str::<ExtPreviewRequest>(&unknown_intensity).is_err());
    }
}
