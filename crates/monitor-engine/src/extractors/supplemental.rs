//! Supplementary financial metrics reported alongside the core four.
//!
//! These feed the response payload for operations staff but are not
//! part of the fixed classification condition set.

use report_types::Page;

use super::parse_decimal;
use crate::locator;
use crate::patterns::{
    COMPLAINT_PATTERNS, DEBT_RATIO_PATTERNS, LOAN_OVERDUE_PATTERNS, RATING_DROP_PATTERNS,
};

#[derive(Debug, Default, PartialEq)]
pub struct SupplementalMetrics {
    pub loan_overdue_days: Option<u32>,
    pub complaints_count: Option<u32>,
    pub rating_drop: Option<u32>,
    pub debt_to_equity: Option<f64>,
}

pub fn extract_supplemental(pages: &[Page]) -> SupplementalMetrics {
    SupplementalMetrics {
        loan_overdue_days: first_integer(pages, &LOAN_OVERDUE_PATTERNS, "Просрочка по займам"),
        complaints_count: first_integer(pages, &COMPLAINT_PATTERNS, "Обращения дольщиков"),
        rating_drop: first_integer(pages, &RATING_DROP_PATTERNS, "Снижение рейтинга"),
        debt_to_equity: first_decimal(pages, &DEBT_RATIO_PATTERNS, "Соотношение долга"),
    }
}

fn first_integer(pages: &[Page], patterns: &[regex::Regex], metric: &str) -> Option<u32> {
    for pattern in patterns {
        let Some(evidence) = locator::locate(pages, std::slice::from_ref(pattern), metric) else {
            continue;
        };
        if let Ok(value) = evidence.value.parse::<u32>() {
            return Some(value);
        }
    }
    None
}

fn first_decimal(pages: &[Page], patterns: &[regex::Regex], metric: &str) -> Option<f64> {
    for pattern in patterns {
        let Some(evidence) = locator::locate(pages, std::slice::from_ref(pattern), metric) else {
            continue;
        };
        if let Some(value) = parse_decimal(&evidence.value) {
            return Some(value);
        }
    }
    None
}
