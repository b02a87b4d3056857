mod preview_to_svg;
mod svg_util;

#[doc(inline)]
pub use preview_to_svg::*;

#[doc(inline)]
pub use svg_util::Color;
#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgPlanTheme;
