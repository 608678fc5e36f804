//! Guarantee-event flag.

use report_types::{Evidence, Page};

use crate::locator;
use crate::patterns::GUARANTEE_PATTERNS;

/// Check whether the report announces a guarantee event.
///
/// This metric signals occurrence, not magnitude: the boolean is the
/// extracted value, while the evidence records the matched phrase so the
/// context invariant still holds.
pub fn extract_guarantee(pages: &[Page]) -> (bool, Option<Evidence>) {
    for pattern in GUARANTEE_PATTERNS.iter() {
        if let Some(evidence) =
            locator::locate(pages, std::slice::from_ref(pattern), "Гарантийный случай")
        {
            return (true, Some(evidence));
        }
    }
    (false, None)
}
