use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use geo::{Coord, Polygon, Rect};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::units::{deg_lat_to_meters, deg_lng_to_meters};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgPlanTheme,
    ///Mark the centroid of the buildable area, which the footprint is shaped around
    #[serde(default)]
    pub centroid: bool,
    ///Print the metrics of the preview above the plan
    #[serde(default)]
    pub label: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgPlanTheme::default(),
            centroid: true,
            label: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgPlanTheme {
    pub stroke_width_multiplier: f64,
    pub envelope_fill: Color,
    pub footprint_fill: Color,
    pub invalid_fill: Color,
    pub footprint_opacity: f64,
}

impl Default for SvgPlanTheme {
    fn default() -> Self {
        SvgPlanTheme::EARTH_TONES
    }
}

impl SvgPlanTheme {
    pub const EARTH_TONES: SvgPlanTheme = SvgPlanTheme {
        stroke_width_multiplier: 2.0,
        envelope_fill: Color(0xCC, 0x82, 0x4A),
        footprint_fill: Color(0xFF, 0xC8, 0x79),
        invalid_fill: Color(0xD0, 0x00, 0x00),
        footprint_opacity: 0.9,
    };

    pub const GRAY: SvgPlanTheme = SvgPlanTheme {
        stroke_width_multiplier: 2.5,
        envelope_fill: Color(0xD3, 0xD3, 0xD3),
        footprint_fill: Color(0x7A, 0x7A, 0x7A),
        invalid_fill: Color(0x2D, 0x2D, 0x2D),
        footprint_opacity: 1.0,
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "expected a color as #RRGGBB, got {s:?}"
        );
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid color {s:?}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Maps `[lng, lat]` coordinates to a local plan in meters, north up.
/// The origin is the north-west corner of the plan's extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalProjection {
    origin: Coord<f64>,
    lat_deg: f64,
}

impl LocalProjection {
    pub fn new(extent: Rect<f64>) -> Self {
        Self {
            origin: Coord {
                x: extent.min().x,
                y: extent.max().y,
            },
            lat_deg: extent.center().y,
        }
    }

    pub fn project(&self, c: Coord<f64>) -> (f64, f64) {
        (
            deg_lng_to_meters(c.x - self.origin.x, self.lat_deg),
            deg_lat_to_meters(self.origin.y - c.y),
        )
    }

    pub fn project_rect(&self, rect: Rect<f64>) -> Rect<f64> {
        let (x_min, y_min) = self.project(Coord {
            x: rect.min().x,
            y: rect.max().y,
        });
        let (x_max, y_max) = self.project(Coord {
            x: rect.max().x,
            y: rect.min().y,
        });
        Rect::new(Coord { x: x_min, y: y_min }, Coord { x: x_max, y: y_max })
    }
}

pub fn polygon_data(polygon: &Polygon<f64>, projection: &LocalProjection) -> Data {
    let mut points = polygon.exterior().coords().map(|c| {
        let (x, y) = projection.project(*c);
        (x as f32, y as f32)
    });
    let mut data = match points.next() {
        Some(first) => Data::new().move_to(first),
        None => return Data::new(),
    };
    for point in points {
        data = data.line_to(point);
    }
    data.close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn colors_parse_with_or_without_hash() {
        assert_eq!("#FFC879".parse::<Color>().unwrap(), Color(0xFF, 0xC8, 0x79));
        assert_eq!("cc824a".parse::<Color>().unwrap(), Color(0xCC, 0x82, 0x4A));
        assert!("#FFC8".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
        assert_eq!(Color(0x0A, 0x0B, 0x0C).to_string(), "#0A0B0C");
    }

    #[test]
    fn theme_round_trips_through_json() {
        let json = serde_json::to_string(&SvgDrawOptions::default()).unwrap();
        let options: SvgDrawOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, SvgDrawOptions::default());
    }

    #[test]
    fn projection_puts_north_up() {
        let extent = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.001, y: 0.001 });
        let projection = LocalProjection::new(extent);
        let (x_nw, y_nw) = projection.project(Coord { x: 0.0, y: 0.001 });
        let (x_se, y_se) = projection.project(Coord { x: 0.001, y: 0.0 });
        assert_eq!((x_nw, y_nw), (0.0, 0.0));
        assert!(x_se > 100.0 && y_se > 100.0);
        assert!(approx_eq!(f64, y_se, 110.54, epsilon = 1e-9));
    }
}
