//! Shared domain types for the construction-monitoring report analyzer.
//!
//! Everything that crosses a crate boundary lives here: document pages as
//! delivered by the text-extraction collaborator, per-metric evidence,
//! extracted metrics, and the classification result with its structured
//! reasoning trail.

mod types;

pub use types::{
    AnalysisReport, ClassificationResult, ConditionId, ConditionReport, DelayEvidence, Evidence,
    EvidenceSet, Metrics, Page, PaymentEvidence, ProjectInfo, RiskTier, TableEvidence, TableGrid,
};
