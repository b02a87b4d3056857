/// Polygon operations delegated to the `geo` crate
pub mod polygon_ops;

/// Named unit conversions (area, degrees to meters)
pub mod units;

#[doc(inline)]
pub use polygon_ops::ClipOutcome;
