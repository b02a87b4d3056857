#![doc = document_features::document_features!()]
//! Deterministic building envelope and footprint generator.
//!
//! Turns a regulatory buildable envelope plus an archetype/intensity choice into a
//! concrete footprint polygon, height, story count and the compliance metrics (GFA, FAR, coverage).

/// Inputs of the preview engine: envelopes, archetypes and the policy tables
pub mod entities;

/// Geometry adapter on top of the `geo` crate and unit conversions
pub mod geometry;

/// The preview engine: constraint resolution, footprint shaping and result assembly
pub mod preview;

/// Compliance checks of a design against its regulatory constraints
pub mod compliance;

/// Importing requests into and exporting previews out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
