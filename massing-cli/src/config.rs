use massing_rs::compliance::ComplianceConfig;
use massing_rs::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

/// Configuration of a batch run
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CliConfig {
    /// Configuration of the compliance checks, run for every request with a parcel polygon
    #[serde(default)]
    pub compliance: ComplianceConfig,
    /// Write an SVG site plan for every valid preview
    #[serde(default = "default_write_svg")]
    pub write_svg: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

fn default_write_svg() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            compliance: ComplianceConfig::default(),
            write_svg: default_write_svg(),
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
