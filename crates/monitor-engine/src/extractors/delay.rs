//! Schedule delay against the normative construction plan (ГПР).

use report_types::{DelayEvidence, Page};

use crate::locator;
use crate::patterns::{DELAY_DAY_PATTERNS, NORM_DURATION_PATTERNS};

/// Default normative construction duration in days (19 months), used
/// when the report does not state one explicitly.
pub const DEFAULT_NORM_DAYS: f64 = 570.0;

/// Extract the delay in days and derive the delay percentage.
///
/// The day count is resolved first; only when it is found is a second,
/// independent pattern chain searched for the normative duration in
/// months. The duration evidence nests under the delay evidence. The
/// percentage therefore never exists without the day count.
pub fn extract_delay(pages: &[Page]) -> (Option<f64>, Option<u32>, Option<DelayEvidence>) {
    let mut delay: Option<(u32, report_types::Evidence)> = None;
    for pattern in DELAY_DAY_PATTERNS.iter() {
        let Some(evidence) = locator::locate(pages, std::slice::from_ref(pattern), "Отставание")
        else {
            continue;
        };
        match evidence.value.parse::<u32>() {
            Ok(days) => {
                delay = Some((days, evidence));
                break;
            }
            Err(_) => continue,
        }
    }

    let Some((delay_days, delay_evidence)) = delay else {
        return (None, None, None);
    };

    let mut norm_months: Option<u32> = None;
    let mut norm_evidence = None;
    for pattern in NORM_DURATION_PATTERNS.iter() {
        let Some(evidence) =
            locator::locate(pages, std::slice::from_ref(pattern), "Нормативный срок")
        else {
            continue;
        };
        match evidence.value.parse::<u32>() {
            Ok(months) => {
                norm_months = Some(months);
                norm_evidence = Some(evidence);
                break;
            }
            Err(_) => continue,
        }
    }

    let norm_days = norm_months.map_or(DEFAULT_NORM_DAYS, |months| f64::from(months) * 30.0);
    let delay_percent = f64::from(delay_days) / norm_days * 100.0;

    (
        Some(delay_percent),
        Some(delay_days),
        Some(DelayEvidence {
            delay: delay_evidence,
            norm_period: norm_evidence,
        }),
    )
}
