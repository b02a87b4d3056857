use anyhow::{Result, ensure};
use geo::{
    Area, BooleanOps, BoundingRect, Centroid, ChamberlainDuquetteArea, Coord, LineString,
    MapCoords, MultiPolygon, Polygon, Rect,
};
use itertools::Itertools;

use crate::geometry::units::{deg_lat_to_meters, deg_lng_to_meters, sqm_to_sqft};

/// Outcome of clipping a shape against a containing polygon.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipOutcome {
    /// The intersection is a single polygon
    Single(Polygon<f64>),
    /// Nothing of the shape lies inside the container
    Empty,
    /// The intersection falls apart into several polygons
    Multiple(usize),
}

/// Creates a polygon from a ring of `(lng, lat)` positions.
/// The closing position (equal to the first) is optional.
pub fn polygon_from_ring(ring: &[(f64, f64)]) -> Result<Polygon<f64>> {
    let mut positions = ring.to_vec();
    if positions.len() > 1 && positions.first() == positions.last() {
        positions.pop();
    }
    ensure!(
        positions.iter().all(|(x, y)| x.is_finite() && y.is_finite()),
        "ring contains non-finite coordinates: {positions:?}"
    );
    let n_distinct = positions
        .iter()
        .map(|(x, y)| (x.to_bits(), y.to_bits()))
        .unique()
        .count();
    ensure!(
        n_distinct >= 3,
        "polygon ring needs at least 3 distinct positions, got {n_distinct}"
    );

    Ok(Polygon::new(LineString::from(positions), vec![]))
}

/// Returns the exterior ring as `(lng, lat)` positions, closing position included.
pub fn ring_of(polygon: &Polygon<f64>) -> Vec<(f64, f64)> {
    polygon.exterior().coords().map(|c| (c.x, c.y)).collect()
}

/// Area of a `[lng, lat]` polygon on the sphere, in square meters
pub fn area_sqm(polygon: &Polygon<f64>) -> f64 {
    polygon.chamberlain_duquette_unsigned_area()
}

/// Area of a `[lng, lat]` polygon on the sphere, in square feet
pub fn area_sqft(polygon: &Polygon<f64>) -> f64 {
    sqm_to_sqft(area_sqm(polygon))
}

/// Area-weighted centroid of the polygon (not the mean of its vertices)
pub fn centroid(polygon: &Polygon<f64>) -> Option<Coord<f64>> {
    polygon.centroid().map(|p| p.0)
}

pub fn bbox(polygon: &Polygon<f64>) -> Option<Rect<f64>> {
    polygon.bounding_rect()
}

/// Width (east-west) and height (north-south) of a bounding box in meters, measured at `lat_deg`.
pub fn bbox_extent_m(bbox: &Rect<f64>, lat_deg: f64) -> (f64, f64) {
    (
        deg_lng_to_meters(bbox.width(), lat_deg),
        deg_lat_to_meters(bbox.height()),
    )
}

/// Scales `polygon` about `origin`, independently along x and y.
pub fn scale_about(
    polygon: &Polygon<f64>,
    origin: Coord<f64>,
    x_factor: f64,
    y_factor: f64,
) -> Polygon<f64> {
    polygon.map_coords(|c| Coord {
        x: origin.x + (c.x - origin.x) * x_factor,
        y: origin.y + (c.y - origin.y) * y_factor,
    })
}

/// Axis-aligned rectangle centered at `center` with half extents in degrees.
pub fn centered_rectangle(
    center: Coord<f64>,
    half_width_deg: f64,
    half_height_deg: f64,
) -> Polygon<f64> {
    Rect::new(
        Coord {
            x: center.x - half_width_deg,
            y: center.y - half_height_deg,
        },
        Coord {
            x: center.x + half_width_deg,
            y: center.y + half_height_deg,
        },
    )
    .to_polygon()
}

/// Intersects `shape` with `container`. Slivers without planar area are discarded.
pub fn clip(shape: &Polygon<f64>, container: &Polygon<f64>) -> ClipOutcome {
    let intersection: MultiPolygon<f64> = shape.intersection(container);
    let mut parts = intersection
        .0
        .into_iter()
        .filter(|p| p.unsigned_area() > 0.0)
        .collect_vec();

    match parts.len() {
        0 => ClipOutcome::Empty,
        1 => ClipOutcome::Single(parts.remove(0)),
        n => ClipOutcome::Multiple(n),
    }
}

/// Area (m²) of the part of `shape` that lies outside `container`.
pub fn area_outside_sqm(shape: &Polygon<f64>, container: &Polygon<f64>) -> f64 {
    shape
        .difference(container)
        .0
        .iter()
        .map(area_sqm)
        .sum()
}

/// Area (m²) of the part of `shape` that lies inside `container`.
pub fn area_inside_sqm(shape: &Polygon<f64>, container: &Polygon<f64>) -> f64 {
    shape
        .intersection(container)
        .0
        .iter()
        .map(area_sqm)
        .sum()
}
