use geo::Polygon;
use itertools::Itertools;
use log::{debug, info, warn};
use massing_rs::compliance::{ComplianceReport, DesignConstraints, check_compliance};
use massing_rs::entities::PreviewRequest;
use massing_rs::io::ext_repr::ExtPreviewRequest;
use massing_rs::io::import::import_request;
use massing_rs::preview::assembler::invalid_preview;
use massing_rs::preview::{BuildingPreview, PreviewWarning, generate_building_preview};
use rayon::prelude::*;
use thousands::Separable;

use crate::config::CliConfig;

/// Everything produced for a single request of a batch
#[derive(Clone, Debug)]
pub struct PreviewOutcome {
    pub id: String,
    /// Buildable envelope of the request, absent if the request could not be imported
    pub buildable: Option<Polygon<f64>>,
    pub preview: BuildingPreview,
    pub compliance: Option<ComplianceReport>,
}

/// Generates the previews of all requests in parallel, in the order of the requests.
/// A request that cannot be imported yields an invalid preview, it never aborts the batch.
pub fn process_batch(requests: &[ExtPreviewRequest], config: &CliConfig) -> Vec<PreviewOutcome> {
    let outcomes = requests
        .par_iter()
        .map(|ext_request| process_request(ext_request, config))
        .collect::<Vec<_>>();

    let (valid, invalid): (Vec<_>, Vec<_>) = outcomes.iter().partition(|o| o.preview.is_valid);
    info!(
        "[BATCH] {} previews generated, {} valid, {} invalid",
        outcomes.len().separate_with_commas(),
        valid.len().separate_with_commas(),
        invalid.len().separate_with_commas()
    );
    if !invalid.is_empty() {
        warn!(
            "[BATCH] invalid previews: {}",
            invalid.iter().map(|o| o.id.as_str()).join(", ")
        );
    }
    outcomes
}

pub fn process_request(ext_request: &ExtPreviewRequest, config: &CliConfig) -> PreviewOutcome {
    let request = match import_request(ext_request) {
        Ok(request) => request,
        Err(e) => {
            warn!("[BATCH] request {} could not be imported: {e:#}", ext_request.id);
            return PreviewOutcome {
                id: ext_request.id.clone(),
                buildable: None,
                preview: invalid_preview(PreviewWarning::GenerationError(format!("{e:#}"))),
                compliance: None,
            };
        }
    };

    let preview = generate_building_preview(&request.input);
    debug!(
        "[BATCH] request {} ({}): valid: {}, warnings: {:?}",
        request.id,
        request.input.intensity.label(),
        preview.is_valid,
        preview.warning_messages()
    );
    let compliance = check_request_compliance(&request, &preview, config);

    PreviewOutcome {
        id: request.id,
        buildable: Some(request.input.envelope.buildable_footprint),
        preview,
        compliance,
    }
}

/// Checks the footprint of a valid preview against the envelope it was generated for.
/// Needs the parcel polygon of the request.
fn check_request_compliance(
    request: &PreviewRequest,
    preview: &BuildingPreview,
    config: &CliConfig,
) -> Option<ComplianceReport> {
    let parcel = request.parcel.as_ref()?;
    let footprint = preview.footprint.as_ref().filter(|_| preview.is_valid)?;
    let envelope = &request.input.envelope;

    let constraints = DesignConstraints {
        envelope: envelope.buildable_footprint.clone(),
        parcel: parcel.clone(),
        far_cap: envelope.far_cap,
        height_cap_ft: envelope.height_cap_ft,
        coverage_cap_pct: envelope.coverage_cap_pct,
    };
    Some(check_compliance(
        footprint,
        preview.height_ft,
        preview.stories,
        &constraints,
        config.compliance,
    ))
}
