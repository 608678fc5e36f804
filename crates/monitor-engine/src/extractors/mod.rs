//! One extractor per metric. Each owns its ordered pattern chain and the
//! metric-specific normalization applied after a match.

pub mod completion;
pub mod delay;
pub mod guarantee;
pub mod payments;
pub mod project;
pub mod supplemental;

/// Parse a percentage or ratio written with either decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}
