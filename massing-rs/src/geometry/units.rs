//! Unit conversions used throughout the engine.
//! Every function carries the unit of its argument and result in its name.

/// Square feet in one square meter
pub const SQFT_PER_SQM: f64 = 10.7639;

/// Meters per degree of longitude at the equator
pub const METERS_PER_DEG_LNG_AT_EQUATOR: f64 = 111_320.0;

/// Meters per degree of latitude (WGS84 small-area approximation)
pub const METERS_PER_DEG_LAT: f64 = 110_540.0;

pub fn sqm_to_sqft(area_sqm: f64) -> f64 {
    area_sqm * SQFT_PER_SQM
}

pub fn sqft_to_sqm(area_sqft: f64) -> f64 {
    area_sqft / SQFT_PER_SQM
}

/// Meters spanned by one degree of longitude at latitude `lat_deg`.
pub fn meters_per_deg_lng(lat_deg: f64) -> f64 {
    METERS_PER_DEG_LNG_AT_EQUATOR * lat_deg.to_radians().cos()
}

pub fn meters_to_deg_lng(distance_m: f64, lat_deg: f64) -> f64 {
    distance_m / meters_per_deg_lng(lat_deg)
}

pub fn meters_to_deg_lat(distance_m: f64) -> f64 {
    distance_m / METERS_PER_DEG_LAT
}

pub fn deg_lng_to_meters(delta_lng_deg: f64, lat_deg: f64) -> f64 {
    delta_lng_deg * meters_per_deg_lng(lat_deg)
}

pub fn deg_lat_to_meters(delta_lat_deg: f64) -> f64 {
    delta_lat_deg * METERS_PER_DEG_LAT
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn sqft_sqm_are_inverse() {
        let area_sqft = 4000.0;
        assert!(approx_eq!(f64, sqm_to_sqft(sqft_to_sqm(area_sqft)), area_sqft, epsilon = 1e-9));
        assert!(approx_eq!(f64, sqm_to_sqft(1.0), 10.7639));
    }

    #[test]
    fn longitude_degrees_shrink_with_latitude() {
        assert!(approx_eq!(f64, meters_per_deg_lng(0.0), 111_320.0));
        assert!(approx_eq!(f64, meters_per_deg_lng(60.0), 55_660.0, epsilon = 1e-6));
        let lat_deg = 29.76;
        let d_deg = meters_to_deg_lng(50.0, lat_deg);
        assert!(approx_eq!(f64, deg_lng_to_meters(d_deg, lat_deg), 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, deg_lat_to_meters(meters_to_deg_lat(25.0)), 25.0, epsilon = 1e-9));
    }
}
