use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::{Context, Result};
use log::{debug, error, warn};

use crate::entities::PreviewInput;
use crate::preview::assembler::{assemble_preview, invalid_preview};
use crate::preview::resolver::resolve_targets;
use crate::preview::shaper::shape_footprint;
use crate::util::assertions;

/// Packaging of the final metrics
pub mod assembler;
/// Derivation of the footprint target and story count from the envelope caps
pub mod resolver;
mod result;
/// Construction of the footprint polygon inside the envelope
pub mod shaper;

#[doc(inline)]
pub use result::{BuildingPreview, PreviewWarning};

/// Generates a building preview for the given envelope, archetype, intensity and orientation.
///
/// Deterministic and free of side effects (apart from logging). Never fails: any problem,
/// including a panic raised inside the geometry library, yields an invalid preview
/// carrying the reason as its only warning.
pub fn generate_building_preview(input: &PreviewInput) -> BuildingPreview {
    let preview = match catch_unwind(AssertUnwindSafe(|| try_generate(input))) {
        Ok(Ok(preview)) => preview,
        Ok(Err(e)) => {
            warn!("[PREVIEW] invalid input: {e:#}");
            invalid_preview(PreviewWarning::GenerationError(format!("{e:#}")))
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            error!("[PREVIEW] preview generation panicked: {msg}");
            invalid_preview(PreviewWarning::GenerationError(msg))
        }
    };
    preview
}

fn try_generate(input: &PreviewInput) -> Result<BuildingPreview> {
    let PreviewInput {
        envelope,
        archetype,
        intensity,
        orientation,
    } = input;

    envelope.validate().context("invalid envelope")?;
    archetype.validate().context("invalid archetype")?;

    let resolved = resolve_targets(envelope, archetype, *intensity);

    let footprint = shape_footprint(
        &envelope.buildable_footprint,
        resolved.target_footprint_sqft,
        archetype.footprint_bias,
        *orientation,
    );

    let preview = match footprint {
        Some(footprint) => {
            let preview = assemble_preview(footprint, resolved, envelope);
            debug!(
                "[PREVIEW] {} stories, {} ft, gfa: {} sqft, far: {}, coverage: {}%",
                preview.stories, preview.height_ft, preview.gfa_sqft, preview.far, preview.coverage_pct
            );
            preview
        }
        None => invalid_preview(PreviewWarning::FootprintUnavailable),
    };

    //runs inside the unwind guard, a violated invariant becomes an invalid preview
    debug_assert!(assertions::preview_respects_caps(&preview, envelope));
    debug_assert!(assertions::preview_is_complete(&preview));
    debug_assert!(assertions::failure_is_total(&preview));

    Ok(preview)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic in geometry library".to_string()
    }
}
