use geo::{Area, Coord, Polygon};
use log::{debug, warn};

use crate::entities::{FootprintBias, OrientationMode};
use crate::geometry::ClipOutcome;
use crate::geometry::polygon_ops::{
    area_sqft, area_sqm, bbox, bbox_extent_m, centered_rectangle, centroid, clip, scale_about,
};
use crate::geometry::units::{meters_to_deg_lat, meters_to_deg_lng, sqft_to_sqm};

/// Scale applied along the favoured axis of `linear` and `deep` footprints
const STRETCH_FACTOR: f64 = 1.2;
/// Scale applied along the other axis of `linear` and `deep` footprints
const SQUEEZE_FACTOR: f64 = 0.8;
/// Extra reduction of the linear scale for `stacked` footprints
const STACKED_REDUCTION: f64 = 0.85;
/// Width to depth ratio of `modular` footprints
const MODULAR_ASPECT_RATIO: f64 = 2.0;
/// Smallest buildable area or target, in square feet, a footprint is constructed for.
/// Rings that are collinear in degrees still carry a residual spherical area far below this.
const MIN_FOOTPRINT_SQFT: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Shapes a footprint of approximately `target_sqft` inside `buildable`, according to `bias`.
///
/// The shaped polygon is clipped to `buildable`. When the intersection is empty or falls apart
/// into several polygons, the unclipped shape is returned instead.
/// Returns `None` if no footprint can be constructed (degenerate envelope, target below one square foot).
pub fn shape_footprint(
    buildable: &Polygon<f64>,
    target_sqft: f64,
    bias: FootprintBias,
    orientation: OrientationMode,
) -> Option<Polygon<f64>> {
    let buildable_sqft = area_sqft(buildable);
    if !(buildable_sqft.is_finite() && buildable_sqft >= MIN_FOOTPRINT_SQFT) {
        warn!("[SHAPER] buildable area is degenerate ({buildable_sqft} sqft)");
        return None;
    }
    if !(target_sqft.is_finite() && target_sqft >= MIN_FOOTPRINT_SQFT) {
        warn!("[SHAPER] no footprint possible for a target of {target_sqft} sqft");
        return None;
    }

    let center = centroid(buildable)?;
    //area scales with the square of the linear scale
    let scale = (target_sqft / buildable_sqft).sqrt();

    let shaped = match bias {
        FootprintBias::Compact => scale_about(buildable, center, scale, scale),
        FootprintBias::Linear => {
            let long_axis = long_axis(buildable, center, orientation)?;
            stretch(buildable, center, scale, STRETCH_FACTOR, SQUEEZE_FACTOR, long_axis)
        }
        FootprintBias::Deep => {
            let long_axis = long_axis(buildable, center, orientation)?;
            stretch(buildable, center, scale, SQUEEZE_FACTOR, STRETCH_FACTOR, long_axis)
        }
        FootprintBias::Stacked => {
            let stacked_scale = scale * STACKED_REDUCTION;
            scale_about(buildable, center, stacked_scale, stacked_scale)
        }
        FootprintBias::Modular => modular_rectangle(center, target_sqft),
    };

    if !is_usable(&shaped) {
        warn!("[SHAPER] {bias:?} shaping produced a degenerate polygon");
        return None;
    }

    match clip(&shaped, buildable) {
        ClipOutcome::Single(clipped) => {
            debug!(
                "[SHAPER] {bias:?} footprint: {:.1} sqft (target {:.1} sqft)",
                area_sqft(&clipped),
                target_sqft
            );
            Some(clipped)
        }
        outcome => {
            warn!("[SHAPER] clipping to the envelope gave {outcome:?}, using the unclipped footprint");
            Some(shaped)
        }
    }
}

/// A `MODULAR_ASPECT_RATIO` rectangle centered at `center` with an area of exactly `target_sqft`.
pub fn modular_rectangle(center: Coord<f64>, target_sqft: f64) -> Polygon<f64> {
    let target_sqm = sqft_to_sqm(target_sqft);
    let width_m = (target_sqm * MODULAR_ASPECT_RATIO).sqrt();
    let depth_m = width_m / MODULAR_ASPECT_RATIO;

    centered_rectangle(
        center,
        meters_to_deg_lng(width_m / 2.0, center.y),
        meters_to_deg_lat(depth_m / 2.0),
    )
}

/// Scales `polygon` about `center`, `long_factor` along the long axis and `short_factor` along the other.
fn stretch(
    polygon: &Polygon<f64>,
    center: Coord<f64>,
    scale: f64,
    long_factor: f64,
    short_factor: f64,
    long_axis: Axis,
) -> Polygon<f64> {
    let (x_factor, y_factor) = match long_axis {
        Axis::X => (long_factor, short_factor),
        Axis::Y => (short_factor, long_factor),
    };
    scale_about(polygon, center, scale * x_factor, scale * y_factor)
}

fn long_axis(buildable: &Polygon<f64>, center: Coord<f64>, orientation: OrientationMode) -> Option<Axis> {
    match orientation {
        OrientationMode::EastWest => Some(Axis::X),
        OrientationMode::NorthSouth => Some(Axis::Y),
        OrientationMode::Auto => {
            let (width_m, height_m) = bbox_extent_m(&bbox(buildable)?, center.y);
            match width_m > height_m {
                true => Some(Axis::X),
                false => Some(Axis::Y),
            }
        }
    }
}

fn is_usable(polygon: &Polygon<f64>) -> bool {
    let finite = polygon
        .exterior()
        .coords()
        .all(|c| c.x.is_finite() && c.y.is_finite());
    finite && polygon.unsigned_area() > 0.0 && area_sqm(polygon) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_ops::{area_inside_sqm, polygon_from_ring};
    use crate::geometry::units::sqm_to_sqft;
    use float_cmp::approx_eq;
    use geo::polygon;
    use test_case::test_case;

    const LNG0: f64 = -95.37;
    const LAT0: f64 = 29.76;

    /// Builds a `[lng, lat]` polygon from a ring in local meters
    fn local_polygon(ring_m: &[(f64, f64)]) -> Polygon<f64> {
        let ring = ring_m
            .iter()
            .map(|(x, y)| (LNG0 + meters_to_deg_lng(*x, LAT0), LAT0 + meters_to_deg_lat(*y)))
            .collect::<Vec<_>>();
        polygon_from_ring(&ring).unwrap()
    }

    fn rectangle_m(width: f64, height: f64) -> Polygon<f64> {
        local_polygon(&[(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)])
    }

    fn extent_m(polygon: &Polygon<f64>) -> (f64, f64) {
        let c = centroid(polygon).unwrap();
        bbox_extent_m(&bbox(polygon).unwrap(), c.y)
    }

    #[test_case(FootprintBias::Compact, 1.0; "compact")]
    #[test_case(FootprintBias::Linear, 0.96; "linear")]
    #[test_case(FootprintBias::Deep, 0.96; "deep")]
    #[test_case(FootprintBias::Stacked, 0.7225; "stacked")]
    fn scaled_footprints_follow_target_area(bias: FootprintBias, area_ratio: f64) {
        let buildable = rectangle_m(60.0, 40.0);
        let target_sqft = area_sqft(&buildable) * 0.5;
        let footprint = shape_footprint(&buildable, target_sqft, bias, OrientationMode::Auto).unwrap();
        let expected = target_sqft * area_ratio;
        assert!(
            (area_sqft(&footprint) - expected).abs() / expected < 1e-3,
            "{bias:?}: {} sqft vs {expected} sqft",
            area_sqft(&footprint)
        );
    }

    #[test]
    fn linear_is_wide_and_deep_is_narrow() {
        let buildable = rectangle_m(60.0, 40.0);
        let target_sqft = area_sqft(&buildable) * 0.4;

        let linear = shape_footprint(&buildable, target_sqft, FootprintBias::Linear, OrientationMode::Auto).unwrap();
        let (w, h) = extent_m(&linear);
        assert!(approx_eq!(f64, w / h, 1.5 * 1.5, epsilon = 1e-3));

        let deep = shape_footprint(&buildable, target_sqft, FootprintBias::Deep, OrientationMode::Auto).unwrap();
        let (w, h) = extent_m(&deep);
        assert!(approx_eq!(f64, w / h, 1.5 / 1.5, epsilon = 1e-3));
    }

    #[test]
    fn orientation_overrides_the_long_axis() {
        let buildable = rectangle_m(40.0, 40.0);
        let target_sqft = area_sqft(&buildable) * 0.4;

        let ew = shape_footprint(&buildable, target_sqft, FootprintBias::Linear, OrientationMode::EastWest).unwrap();
        let (w, h) = extent_m(&ew);
        assert!(w > h);

        let ns = shape_footprint(&buildable, target_sqft, FootprintBias::Linear, OrientationMode::NorthSouth).unwrap();
        let (w, h) = extent_m(&ns);
        assert!(w < h);

        let compact = shape_footprint(&buildable, target_sqft, FootprintBias::Compact, OrientationMode::NorthSouth);
        assert_eq!(
            compact,
            shape_footprint(&buildable, target_sqft, FootprintBias::Compact, OrientationMode::EastWest)
        );
    }

    #[test]
    fn modular_rectangle_has_exact_area() {
        let center = Coord { x: LNG0, y: LAT0 };
        let rect = modular_rectangle(center, 4000.0);
        let area = area_sqft(&rect);
        assert!((area - 4000.0).abs() / 4000.0 < 0.01, "area: {area}");

        let (w, h) = extent_m(&rect);
        assert!(approx_eq!(f64, w / h, 2.0, epsilon = 1e-2));
    }

    #[test]
    fn clipped_footprint_stays_inside_envelope() {
        let buildable = local_polygon(&[(0.0, 0.0), (50.0, 0.0), (65.0, 30.0), (20.0, 45.0), (-5.0, 20.0)]);
        let target_sqft = area_sqft(&buildable) * 0.8;
        for bias in [FootprintBias::Compact, FootprintBias::Linear, FootprintBias::Deep, FootprintBias::Modular] {
            let footprint = shape_footprint(&buildable, target_sqft, bias, OrientationMode::Auto).unwrap();
            let inside = area_inside_sqm(&footprint, &buildable);
            assert!(
                (area_sqm(&footprint) - inside).abs() / inside < 1e-6,
                "{bias:?} footprint leaves the envelope"
            );
        }
    }

    /// U-shaped envelope whose centroid lies in the notch between the two arms
    fn u_shaped_envelope() -> Polygon<f64> {
        local_polygon(&[
            (0.0, 0.0),
            (60.0, 0.0),
            (60.0, 60.0),
            (40.0, 60.0),
            (40.0, 20.0),
            (20.0, 20.0),
            (20.0, 60.0),
            (0.0, 60.0),
        ])
    }

    #[test]
    fn falls_back_to_unclipped_shape_when_clip_splits() {
        let buildable = u_shaped_envelope();
        let target_sqft = sqm_to_sqft(300.0);
        let footprint = shape_footprint(&buildable, target_sqft, FootprintBias::Modular, OrientationMode::Auto).unwrap();

        //the rectangle bridges both arms, clipping would split it in two
        let expected = modular_rectangle(centroid(&buildable).unwrap(), target_sqft);
        assert_eq!(footprint, expected);
        assert!(area_inside_sqm(&footprint, &buildable) < area_sqm(&footprint) * 0.5);
    }

    #[test]
    fn falls_back_to_unclipped_shape_when_clip_is_empty() {
        let buildable = u_shaped_envelope();
        let target_sqft = sqm_to_sqft(100.0);
        let footprint = shape_footprint(&buildable, target_sqft, FootprintBias::Modular, OrientationMode::Auto).unwrap();

        assert_eq!(footprint, modular_rectangle(centroid(&buildable).unwrap(), target_sqft));
        assert!(area_inside_sqm(&footprint, &buildable) < 1e-6);
    }

    #[test]
    fn degenerate_inputs_yield_no_footprint() {
        let collinear = local_polygon(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)]);
        assert_eq!(shape_footprint(&collinear, 1000.0, FootprintBias::Compact, OrientationMode::Auto), None);

        let buildable = rectangle_m(30.0, 30.0);
        assert_eq!(shape_footprint(&buildable, 0.0, FootprintBias::Compact, OrientationMode::Auto), None);
        assert_eq!(shape_footprint(&buildable, 0.5, FootprintBias::Compact, OrientationMode::Auto), None);
        assert_eq!(shape_footprint(&buildable, f64::NAN, FootprintBias::Modular, OrientationMode::Auto), None);
    }

    #[test]
    fn auto_orientation_compares_extents_in_meters() {
        //wider than tall in degrees, but at 60°N a degree of longitude is half as long
        let buildable = geo::polygon![
            (x: 10.0, y: 60.0),
            (x: 10.0015, y: 60.0),
            (x: 10.0015, y: 60.001),
            (x: 10.0, y: 60.001),
        ];
        let center = centroid(&buildable).unwrap();
        let (width_m, height_m) = extent_m(&buildable);
        assert!(width_m < height_m, "{width_m} m x {height_m} m");

        assert_eq!(long_axis(&buildable, center, OrientationMode::Auto), Some(Axis::Y));
        assert_eq!(long_axis(&buildable, center, OrientationMode::EastWest), Some(Axis::X));
        assert_eq!(long_axis(&rectangle_m(40.0, 20.0), center, OrientationMode::Auto), Some(Axis::X));
    }
}
