use serde::{Deserialize, Serialize};

/// Raw table grid as delivered by the document-text-extraction
/// collaborator. Rows are not guaranteed to have equal lengths and
/// individual cells may be absent.
pub type TableGrid = Vec<Vec<Option<String>>>;

/// One page of the source report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number, strictly increasing in document order.
    pub number: u32,
    pub text: String,
    pub tables: Vec<TableGrid>,
}

impl Page {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            tables: Vec::new(),
        }
    }

    pub fn with_tables(number: u32, text: impl Into<String>, tables: Vec<TableGrid>) -> Self {
        Self {
            number,
            text: text.into(),
            tables,
        }
    }
}

/// Where and how one metric value was found in the document.
///
/// `context` is the whitespace-normalized sentence around the match and
/// always contains `value` in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub metric: String,
    pub value: String,
    pub page: u32,
    pub context: String,
    pub pattern_used: String,
}

/// Delay evidence with the optional normative-duration record nested
/// under it. The nested record augments the primary evidence, it never
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayEvidence {
    #[serde(flatten)]
    pub delay: Evidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub norm_period: Option<Evidence>,
}

/// Evidence for a monthly payment series pulled from an annex table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEvidence {
    pub page: u32,
    pub table_index: usize,
    pub source: String,
    pub values: Vec<f64>,
    pub note: String,
}

/// Payment evidence comes from one of two strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PaymentEvidence {
    Table(TableEvidence),
    Narrative(Evidence),
}

/// All evidence gathered for one analysis, keyed by metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceSet {
    #[serde(rename = "smr", skip_serializing_if = "Option::is_none")]
    pub completion: Option<Evidence>,
    #[serde(rename = "gpr_delay", skip_serializing_if = "Option::is_none")]
    pub delay: Option<DelayEvidence>,
    #[serde(rename = "ddu", skip_serializing_if = "Option::is_none")]
    pub payments: Option<PaymentEvidence>,
    #[serde(rename = "guarantee", skip_serializing_if = "Option::is_none")]
    pub guarantee: Option<Evidence>,
}

/// Project identity extracted from the first report page.
///
/// `requires_manual_name` is true iff no name-bearing pattern matched;
/// consumers must then prompt for manual entry instead of showing a
/// placeholder as if it were extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub full_name: Option<String>,
    pub code: Option<String>,
    pub report_period: Option<String>,
    pub location: Option<String>,
    pub customer: Option<String>,
    #[serde(rename = "require_manual_name")]
    pub requires_manual_name: bool,
}

/// Extracted risk metrics. Absence (`None` / empty) always means
/// "unknown", never zero.
///
/// Wire names follow the JSON contract the frontend consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(rename = "SMR_completion")]
    pub completion_percent: Option<f64>,
    #[serde(rename = "GPR_delay_percent")]
    pub delay_percent: Option<f64>,
    #[serde(rename = "GPR_delay_days")]
    pub delay_days: Option<u32>,
    /// Chronological, oldest first.
    #[serde(rename = "DDU_payments_percent")]
    pub payment_percents: Vec<f64>,
    /// Absolute monthly amounts from the annex table, oldest first.
    #[serde(rename = "DDU_monthly_values", skip_serializing_if = "Option::is_none")]
    pub payment_monthly_values: Option<Vec<f64>>,
    #[serde(rename = "guarantee_extension")]
    pub guarantee_event: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_overdue_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaints_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_drop: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
}

/// Terminal risk tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Normal,
    Alarming,
    Critical,
}

impl RiskTier {
    /// Localized label used in the API response and rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Normal => "нормальный",
            RiskTier::Alarming => "тревожный",
            RiskTier::Critical => "критичный",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskTier::Normal => "🟢",
            RiskTier::Alarming => "🟡",
            RiskTier::Critical => "🔴",
        }
    }
}

/// Identifiers of the fixed classification conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionId {
    A,
    B1,
    B6,
    D1,
}

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConditionId::A => "a",
            ConditionId::B1 => "b1",
            ConditionId::B6 => "b6",
            ConditionId::D1 => "d1",
        };
        f.write_str(s)
    }
}

/// Outcome of evaluating one condition.
///
/// A condition whose underlying metric was not extracted has
/// `evaluated == false` and `met == false`; it is distinct from a
/// condition that was evaluated and did not hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub id: ConditionId,
    pub evaluated: bool,
    pub met: bool,
    pub message: String,
}

/// Tier plus the full audit trail of condition evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub tier: RiskTier,
    pub triggered_conditions: Vec<ConditionId>,
    /// Always in the fixed evaluation order: a, b1, b6, d1.
    pub conditions: Vec<ConditionReport>,
}

impl ClassificationResult {
    pub fn announcement(&self) -> &'static str {
        match self.tier {
            RiskTier::Critical => {
                "🔴 СТАТУС: КРИТИЧНЫЙ - Все критические условия выполнены (a И b И c И d)"
            }
            RiskTier::Alarming => {
                "🟡 СТАТУС: ТРЕВОЖНЫЙ - Выполнены условия для тревожного статуса (a И b)"
            }
            RiskTier::Normal => "🟢 СТАТУС: НОРМАЛЬНЫЙ - Критические условия не выполнены",
        }
    }

    /// Rendered reasoning trail: the tier announcement followed by one
    /// line per condition in the fixed evaluation order.
    pub fn reasoning(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.conditions.len() + 1);
        lines.push(self.announcement().to_string());
        lines.extend(self.conditions.iter().map(|c| c.message.clone()));
        lines
    }
}

/// Complete result of analyzing one report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_info: ProjectInfo,
    pub metrics: Metrics,
    pub evidence: EvidenceSet,
    pub classification: ClassificationResult,
    /// True when the collaborator produced no usable text and the
    /// analysis degraded to the fallback contract.
    pub degraded: bool,
    pub analyzed_at: u64,
}

impl AnalysisReport {
    /// Fallback report for documents that yielded no usable text: all
    /// metrics unknown, tier defaulted to alarming, reasoning states
    /// explicitly that automatic analysis failed.
    pub fn degraded(analyzed_at: u64) -> Self {
        Self {
            project_info: ProjectInfo {
                requires_manual_name: true,
                ..ProjectInfo::default()
            },
            metrics: Metrics::default(),
            evidence: EvidenceSet::default(),
            classification: ClassificationResult {
                tier: RiskTier::Alarming,
                triggered_conditions: Vec::new(),
                conditions: Vec::new(),
            },
            degraded: true,
            analyzed_at,
        }
    }

    /// Reasoning trail for the response. Degraded analyses replace the
    /// condition trail with an explicit failure notice.
    pub fn reasoning(&self) -> Vec<String> {
        if self.degraded {
            vec![
                "🟡 СТАТУС: ТРЕВОЖНЫЙ - Автоматический анализ отчёта не выполнен".to_string(),
                "Не удалось извлечь текст из документа, метрики не определены".to_string(),
                "Требуется ручная проверка отчёта".to_string(),
            ]
        } else {
            self.classification.reasoning()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metrics_wire_names_match_frontend_contract() {
        let metrics = Metrics {
            completion_percent: Some(46.69),
            delay_percent: Some(13.33),
            delay_days: Some(76),
            payment_percents: vec![47.07, 47.07, 47.07],
            payment_monthly_values: None,
            guarantee_event: true,
            ..Metrics::default()
        };

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["SMR_completion"], 46.69);
        assert_eq!(json["GPR_delay_days"], 76);
        assert_eq!(json["DDU_payments_percent"][0], 47.07);
        assert_eq!(json["guarantee_extension"], true);
        // Unknown metrics serialize as null or are omitted, never as 0.
        assert!(json.get("DDU_monthly_values").is_none());
        assert!(json.get("loan_overdue_days").is_none());
    }

    #[test]
    fn null_metrics_stay_null_through_roundtrip() {
        let metrics = Metrics::default();
        let json = serde_json::to_string(&metrics).unwrap();
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.completion_percent, None);
        assert_eq!(back.delay_days, None);
        assert!(back.payment_percents.is_empty());
    }

    #[test]
    fn condition_ids_serialize_lowercase() {
        let ids = vec![ConditionId::A, ConditionId::B1, ConditionId::B6, ConditionId::D1];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"["a","b1","b6","d1"]"#);
    }

    #[test]
    fn reasoning_starts_with_announcement() {
        let result = ClassificationResult {
            tier: RiskTier::Normal,
            triggered_conditions: Vec::new(),
            conditions: vec![ConditionReport {
                id: ConditionId::A,
                evaluated: true,
                met: false,
                message: "✗ Условие 'a' НЕ ВЫПОЛНЕНО: СМР 85.00% >= 80% (в норме)".to_string(),
            }],
        };
        let reasoning = result.reasoning();
        assert_eq!(reasoning[0], result.announcement());
        assert_eq!(reasoning.len(), 2);
    }

    #[test]
    fn degraded_report_defaults_to_alarming_with_null_metrics() {
        let report = AnalysisReport::degraded(0);
        assert_eq!(report.classification.tier, RiskTier::Alarming);
        assert!(report.degraded);
        assert_eq!(report.metrics, Metrics::default());
        assert!(report.project_info.requires_manual_name);
        assert!(report.reasoning()[0].contains("не выполнен"));
    }
}
