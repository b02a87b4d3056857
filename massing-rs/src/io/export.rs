use geo::Polygon;
use itertools::Itertools;

use crate::compliance::{ComplianceCheck, ComplianceReport};
use crate::geometry::polygon_ops::ring_of;
use crate::io::ext_repr::{
    ExtBuildingPreview, ExtComplianceCheck, ExtComplianceReport, ExtGeometryType, ExtPolygon,
};
use crate::preview::BuildingPreview;

/// Exports the exterior of a polygon as a closed GeoJSON ring.
pub fn export_polygon(polygon: &Polygon<f64>) -> ExtPolygon {
    ExtPolygon {
        geometry_type: ExtGeometryType::Polygon,
        coordinates: vec![ring_of(polygon)],
    }
}

pub fn export_preview(preview: &BuildingPreview) -> ExtBuildingPreview {
    ExtBuildingPreview {
        footprint: preview.footprint.as_ref().map(export_polygon),
        height_ft: preview.height_ft,
        stories: preview.stories,
        gfa_sqft: preview.gfa_sqft,
        far: preview.far,
        coverage_pct: preview.coverage_pct,
        warnings: preview.warning_messages(),
        is_valid: preview.is_valid,
    }
}

pub fn export_compliance(report: &ComplianceReport) -> ExtComplianceReport {
    ExtComplianceReport {
        overall: report.overall,
        checks: report.checks.iter().map(export_check).collect_vec(),
        violations: report.violations.clone(),
    }
}

fn export_check(check: &ComplianceCheck) -> ExtComplianceCheck {
    ExtComplianceCheck {
        id: check.kind,
        name: check.kind.name().to_string(),
        status: check.status,
        current_value: check.current_value,
        limit_value: check.limit_value,
        unit: check.unit.to_string(),
        message: check.message.clone(),
    }
}
