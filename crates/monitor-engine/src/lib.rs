//! Construction-monitoring report analysis engine.
//!
//! Takes the page text and tables of a monitoring report, extracts the
//! risk metrics with page-level evidence and classifies the project
//! into a risk tier with an auditable reasoning trail.

pub mod classify;
pub mod extractors;
pub mod locator;
pub mod patterns;
pub mod report;
pub mod tables;

use report_types::{AnalysisReport, EvidenceSet, Metrics, Page};
use tracing::{debug, info};

pub use classify::classify;
pub use extractors::delay::DEFAULT_NORM_DAYS;
pub use report::render_detailed_report;

/// Minimum amount of trimmed text across all pages for an analysis to
/// be attempted. Below this the document is treated as unreadable.
pub const MIN_TEXT_LENGTH: usize = 50;

/// Analyzer over the pages of one report document.
pub struct ReportAnalyzer {
    pages: Vec<Page>,
}

impl ReportAnalyzer {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Convenience constructor for plain text without page structure.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Page::new(1, text)])
    }

    /// Run the full pipeline: extraction, classification, evidence.
    ///
    /// A document whose pages carry almost no text yields a degraded
    /// report with all metrics unknown instead of fabricated values.
    pub fn analyze(&self) -> AnalysisReport {
        let analyzed_at = now_unix();

        let total_text: usize = self.pages.iter().map(|p| p.text.trim().chars().count()).sum();
        if total_text < MIN_TEXT_LENGTH {
            info!(total_text, "document text too short, degrading analysis");
            return AnalysisReport::degraded(analyzed_at);
        }
        debug!(pages = self.pages.len(), total_text, "starting analysis");

        let project_info = extractors::project::extract_project_info(&self.pages);
        let (completion, completion_evidence) =
            extractors::completion::extract_completion(&self.pages);
        let (delay_percent, delay_days, delay_evidence) =
            extractors::delay::extract_delay(&self.pages);
        let payments = extractors::payments::extract_payments(&self.pages);
        let (guarantee, guarantee_evidence) = extractors::guarantee::extract_guarantee(&self.pages);
        let supplemental = extractors::supplemental::extract_supplemental(&self.pages);

        let metrics = Metrics {
            completion_percent: completion,
            delay_percent,
            delay_days,
            payment_percents: payments.percents,
            payment_monthly_values: payments.monthly_values,
            guarantee_event: guarantee,
            loan_overdue_days: supplemental.loan_overdue_days,
            complaints_count: supplemental.complaints_count,
            rating_drop: supplemental.rating_drop,
            debt_to_equity: supplemental.debt_to_equity,
        };
        let classification = classify::classify(&metrics);
        info!(
            tier = classification.tier.label(),
            triggered = classification.triggered_conditions.len(),
            "analysis complete"
        );

        AnalysisReport {
            project_info,
            metrics,
            evidence: EvidenceSet {
                completion: completion_evidence,
                delay: delay_evidence,
                payments: payments.evidence,
                guarantee: guarantee_evidence,
            },
            classification,
            degraded: false,
            analyzed_at,
        }
    }
}

fn now_unix() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
