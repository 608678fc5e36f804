//! Construction-completion percentage (СМР).

use report_types::{Evidence, Page};

use super::parse_decimal;
use crate::locator;
use crate::patterns::COMPLETION_PATTERNS;

/// Extract the reported completion percentage with its evidence.
///
/// Patterns are tried one at a time so that a match whose captured text
/// fails numeric conversion advances the chain instead of aborting the
/// extraction.
pub fn extract_completion(pages: &[Page]) -> (Option<f64>, Option<Evidence>) {
    for pattern in COMPLETION_PATTERNS.iter() {
        let Some(evidence) = locator::locate(pages, std::slice::from_ref(pattern), "СМР") else {
            continue;
        };
        match parse_decimal(&evidence.value) {
            Some(value) => return (Some(value), Some(evidence)),
            None => continue,
        }
    }
    (None, None)
}
