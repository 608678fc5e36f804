//! REST handlers for report analysis.

use axum::Json;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use monitor_engine::ReportAnalyzer;
use report_types::{ClassificationResult, ConditionId, EvidenceSet, Metrics, ProjectInfo};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::ApiError;
use crate::pdf;

/// Upload ceiling, decoded bytes.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Request body ceiling: the decoded cap inflated by base64 (4/3) plus
/// headroom for the JSON envelope. Overrides axum's 2 MB default,
/// which would reject typical multi-megabyte reports before the
/// handler ever saw them.
pub const MAX_BODY_SIZE: usize = MAX_FILE_SIZE / 3 * 4 + 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub filename: String,
    pub pdf_base64: String,
}

/// Wire response. Field names preserve the JSON contract the frontend
/// already consumes.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub project_info: ProjectInfo,
    pub project_status: String,
    pub metrics: Metrics,
    pub evidence: EvidenceSet,
    pub reasoning: Vec<String>,
    pub triggered_conditions: Vec<ConditionId>,
    #[serde(rename = "require_manual_name", skip_serializing_if = "is_false")]
    pub requires_manual_name: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub degraded: bool,
    #[serde(rename = "needs3Reports")]
    pub needs_three_reports: bool,
    pub analyzed_at: u64,
}

fn is_false(v: &bool) -> bool {
    !*v
}

pub async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/analyze-report
///
/// Accepts a base64-encoded PDF, runs the full analysis pipeline and
/// returns metrics, evidence and the reasoning trail. A PDF that
/// yields no usable text produces a degraded response rather than an
/// error, so the caller can fall back to manual review.
pub async fn handle_analyze_report(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if !request.filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::UnsupportedFileType(request.filename));
    }

    let data = BASE64
        .decode(&request.pdf_base64)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid base64 payload: {}", e)))?;
    if data.len() > MAX_FILE_SIZE {
        return Err(ApiError::FileTooLarge(data.len()));
    }

    info!(filename = %request.filename, bytes = data.len(), "analyzing report");

    // Extraction failure degrades to the no-text contract instead of
    // failing the request.
    let pages = pdf::extract_pages(&data).unwrap_or_default();
    let report = ReportAnalyzer::new(pages).analyze();

    let code = match &report.project_info.code {
        Some(code) => code.clone(),
        None => generate_fallback_code(report.project_info.full_name.as_deref()),
    };
    let project_id = generate_project_id(&code, report.project_info.customer.as_deref());

    let needs_three_reports =
        needs_three_reports(&report.metrics, &report.classification);

    Ok(Json(AnalyzeResponse {
        project_id: Some(project_id),
        project_status: report.classification.tier.label().to_string(),
        reasoning: report.reasoning(),
        triggered_conditions: report.classification.triggered_conditions.clone(),
        requires_manual_name: report.project_info.requires_manual_name,
        degraded: report.degraded,
        needs_three_reports,
        analyzed_at: report.analyzed_at,
        project_info: report.project_info,
        metrics: report.metrics,
        evidence: report.evidence,
    }))
}

/// Trend analysis over three consecutive reports is requested when the
/// project lags but the payment history in this single report is too
/// short to judge the dynamics.
fn needs_three_reports(metrics: &Metrics, classification: &ClassificationResult) -> bool {
    let series_len = if metrics.payment_percents.is_empty() {
        metrics
            .payment_monthly_values
            .as_ref()
            .map_or(0, |v| v.len())
    } else {
        metrics.payment_percents.len()
    };
    classification
        .triggered_conditions
        .contains(&ConditionId::A)
        && series_len < 3
}

/// Stable project identifier derived from the certificate code and the
/// customer name. The same document always maps to the same id.
pub fn generate_project_id(code: &str, customer: Option<&str>) -> String {
    let normalized: String = code
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let customer_key = customer.map_or_else(|| "novendor".to_string(), str::to_lowercase);

    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", normalized, customer_key));
    let digest = hex::encode(hasher.finalize());

    format!("{}-{}", normalized, &digest[..8])
}

/// Synthetic code for reports that carry no certificate number, derived
/// from the project name so re-uploads keep the same identity.
pub fn generate_fallback_code(name: Option<&str>) -> String {
    let seed: String = name
        .map(|n| {
            n.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .take(30)
                .collect()
        })
        .filter(|s: &String| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let mut hasher = Sha256::new();
    hasher.update(&seed);
    let digest = hex::encode(hasher.finalize());

    format!("fallback{}", &digest[..8])
}
