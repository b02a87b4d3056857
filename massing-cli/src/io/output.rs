use massing_rs::io::export::{export_compliance, export_preview};
use massing_rs::io::ext_repr::{ExtBuildingPreview, ExtComplianceReport};
use serde::{Deserialize, Serialize};

use crate::batch::PreviewOutcome;
use crate::config::CliConfig;

/// Result of a single request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPreviewResult {
    pub id: String,
    pub preview: ExtBuildingPreview,
    /// Only present for valid previews of requests with a parcel polygon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ExtComplianceReport>,
}

/// Everything written to the output file of a batch run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreviewOutput {
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
    pub config: CliConfig,
    pub results: Vec<ExtPreviewResult>,
}

impl PreviewOutput {
    pub fn new(outcomes: &[PreviewOutcome], config: CliConfig, generated_at: String) -> Self {
        let results = outcomes
            .iter()
            .map(|o| ExtPreviewResult {
                id: o.id.clone(),
                preview: export_preview(&o.preview),
                compliance: o.compliance.as_ref().map(export_compliance),
            })
            .collect();

        Self {
            generated_at,
            config,
            results,
        }
    }
}
