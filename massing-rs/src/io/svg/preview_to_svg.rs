use geo::{BoundingRect, Coord, Polygon, Rect};
use svg::Document;
use svg::node::element::{Circle, Group, Text, Title};

use crate::geometry::polygon_ops::{area_sqft, centroid};
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::{LocalProjection, SvgDrawOptions};
use crate::preview::BuildingPreview;

/// Draws the buildable envelope and the preview's footprint as a site plan in local meters, north up.
pub fn preview_to_svg(
    buildable: &Polygon<f64>,
    preview: &BuildingPreview,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let theme = &options.theme;

    //the unclipped fallback footprint may extend beyond the envelope
    let extent = [Some(buildable), preview.footprint.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(|p| p.bounding_rect())
        .reduce(union_rect);

    let Some(extent) = extent else {
        return Document::new().add(Title::new(format!("empty plan | {title}")));
    };

    let projection = LocalProjection::new(extent);
    let plan = projection.project_rect(extent);
    let size = f64::min(plan.width(), plan.height()).max(1.0);
    let margin = 0.05 * f64::max(plan.width(), plan.height()).max(1.0);

    let stroke_width = size * 0.001 * theme.stroke_width_multiplier;

    let envelope_group = Group::new()
        .set("id", "envelope")
        .add(svg_util::data_to_path(
            svg_util::polygon_data(buildable, &projection),
            &[
                ("fill", &*format!("{}", theme.envelope_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "buildable envelope, area: {:.0} sqft",
            area_sqft(buildable)
        )));

    let footprint_group = preview.footprint.as_ref().map(|footprint| {
        let fill = match preview.is_valid {
            true => theme.footprint_fill,
            false => theme.invalid_fill,
        };
        let mut title = format!(
            "footprint, area: {:.0} sqft, {} stories, {} ft",
            area_sqft(footprint),
            preview.stories,
            preview.height_ft
        );
        for warning in &preview.warnings {
            title.push_str(&format!("\n{warning}"));
        }
        Group::new()
            .set("id", "footprint")
            .add(svg_util::data_to_path(
                svg_util::polygon_data(footprint, &projection),
                &[
                    ("fill", &*format!("{fill}")),
                    ("fill-opacity", &*format!("{}", theme.footprint_opacity)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{stroke_width}")),
                ],
            ))
            .add(Title::new(title))
    });

    let centroid_marker = match options.centroid {
        true => centroid(buildable).map(|c| centroid_circle(c, &projection, 4.0 * stroke_width)),
        false => None,
    };

    let label = match options.label {
        true => {
            //print the metrics above the north-west corner of the plan
            let font_size = (size * 0.04) as f32;
            Some(
                Text::new(label_content(preview, title))
                    .set("x", 0.0f32)
                    .set("y", -0.5 * font_size)
                    .set("font-size", font_size)
                    .set("font-family", "monospace")
                    .set("font-weight", "500"),
            )
        }
        false => None,
    };

    let vbox = (
        -margin as f32,
        (-margin - size * 0.08) as f32,
        (plan.width() + 2.0 * margin) as f32,
        (plan.height() + 2.0 * margin + size * 0.08) as f32,
    );

    let mut document = Document::new()
        .set("viewBox", vbox)
        .add(envelope_group);
    if let Some(footprint_group) = footprint_group {
        document = document.add(footprint_group);
    }
    if let Some(centroid_marker) = centroid_marker {
        document = document.add(centroid_marker);
    }
    if let Some(label) = label {
        document = document.add(label);
    }
    document
}

fn label_content(preview: &BuildingPreview, title: &str) -> String {
    match preview.is_valid {
        true => format!(
            "stories: {} | height: {} ft | gfa: {} sqft | far: {:.2} | coverage: {:.1}% | {}",
            preview.stories,
            preview.height_ft,
            preview.gfa_sqft,
            preview.far,
            preview.coverage_pct,
            title
        ),
        false => format!(
            "invalid preview: {} | {}",
            preview.warning_messages().join("; "),
            title
        ),
    }
}

fn centroid_circle(c: Coord<f64>, projection: &LocalProjection, radius: f64) -> Circle {
    let (cx, cy) = projection.project(c);
    Circle::new()
        .set("cx", cx as f32)
        .set("cy", cy as f32)
        .set("r", radius as f32)
        .set("fill", "black")
}

fn union_rect(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: f64::min(a.min().x, b.min().x),
            y: f64::min(a.min().y, b.min().y),
        },
        Coord {
            x: f64::max(a.max().x, b.max().x),
            y: f64::max(a.max().y, b.max().y),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewWarning;
    use crate::preview::assembler::invalid_preview;
    use geo::polygon;

    fn buildable() -> Polygon<f64> {
        polygon![
            (x: -95.3700, y: 29.7600),
            (x: -95.3690, y: 29.7600),
            (x: -95.3690, y: 29.7606),
            (x: -95.3700, y: 29.7606),
        ]
    }

    #[test]
    fn valid_preview_draws_footprint_and_label() {
        let footprint = polygon![
            (x: -95.3697, y: 29.7602),
            (x: -95.3693, y: 29.7602),
            (x: -95.3693, y: 29.7604),
            (x: -95.3697, y: 29.7604),
        ];
        let preview = BuildingPreview {
            footprint: Some(footprint),
            height_ft: 40.0,
            stories: 4,
            gfa_sqft: 17_000.0,
            far: 1.7,
            coverage_pct: 42.5,
            warnings: vec![PreviewWarning::FarCapReduction],
            is_valid: true,
        };
        let svg = preview_to_svg(&buildable(), &preview, SvgDrawOptions::default(), "lot-7").to_string();
        assert!(svg.contains("id=\"envelope\""));
        assert!(svg.contains("id=\"footprint\""));
        assert!(svg.contains("stories: 4 | height: 40 ft"));
        assert!(svg.contains("Footprint reduced to meet FAR cap"));
    }

    #[test]
    fn invalid_preview_draws_only_the_envelope() {
        let preview = invalid_preview(PreviewWarning::FootprintUnavailable);
        let options = SvgDrawOptions {
            centroid: false,
            ..SvgDrawOptions::default()
        };
        let svg = preview_to_svg(&buildable(), &preview, options, "lot-8").to_string();
        assert!(svg.contains("id=\"envelope\""));
        assert!(!svg.contains("id=\"footprint\""));
        assert!(!svg.contains("<circle"));
        assert!(svg.contains("invalid preview: Unable to generate footprint within envelope"));
    }
}
