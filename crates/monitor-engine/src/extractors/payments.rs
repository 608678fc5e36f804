//! Buyer/dealer payment series (поступления по ДДУ).

use report_types::{Page, PaymentEvidence};

use super::parse_decimal;
use crate::locator;
use crate::patterns::PAYMENT_PATTERNS;
use crate::tables;

/// Result of the two-strategy payment extraction. Both sequences empty
/// means "unknown", which must never be coerced to zero downstream.
#[derive(Debug, Default)]
pub struct PaymentExtraction {
    /// Chronological percentage series, oldest first.
    pub percents: Vec<f64>,
    /// Absolute monthly amounts from the annex table, oldest first.
    pub monthly_values: Option<Vec<f64>>,
    pub evidence: Option<PaymentEvidence>,
}

/// Extract payments, table strategy first.
///
/// When the annex table yields a full 3-month series the percentage
/// list stays empty: downstream classification works from the monthly
/// series rather than a flat percentage. Otherwise a narrative
/// percentage is searched; the report states payments for the current
/// period only, so one figure is replicated across all three month
/// slots.
pub fn extract_payments(pages: &[Page]) -> PaymentExtraction {
    if let Some((values, table_evidence)) = tables::find_monthly_values(pages) {
        return PaymentExtraction {
            percents: Vec::new(),
            monthly_values: Some(values),
            evidence: Some(PaymentEvidence::Table(table_evidence)),
        };
    }

    for pattern in PAYMENT_PATTERNS.iter() {
        let Some(evidence) = locator::locate(pages, std::slice::from_ref(pattern), "ДДУ") else {
            continue;
        };
        match parse_decimal(&evidence.value) {
            Some(percent) => {
                return PaymentExtraction {
                    percents: vec![percent; tables::MONTHS_REQUIRED],
                    monthly_values: None,
                    evidence: Some(PaymentEvidence::Narrative(evidence)),
                };
            }
            None => continue,
        }
    }

    PaymentExtraction::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use report_types::TableGrid;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn annex_grid(amounts: &[&str]) -> TableGrid {
        let mut grid: TableGrid = (0..5)
            .map(|_| (0..7).map(|i| cell(&i.to_string())).collect())
            .collect();
        let amount_row: Vec<Option<String>> = std::iter::repeat(cell("x"))
            .take(7 - amounts.len())
            .chain(amounts.iter().map(|a| cell(a)))
            .collect();
        grid.push(amount_row);
        grid
    }

    #[test]
    fn table_strategy_wins_over_narrative() {
        let page = Page::with_tables(
            2,
            "Приложение 2 к Таблице 7. Вывод: 47,07 % от общего поступления денежных средств, средства дольщиков.",
            vec![annex_grid(&["200000", "300000", "400000"])],
        );
        let extraction = extract_payments(&[page]);

        assert!(extraction.percents.is_empty());
        assert_eq!(
            extraction.monthly_values,
            Some(vec![200_000.0, 300_000.0, 400_000.0])
        );
        assert!(matches!(
            extraction.evidence,
            Some(PaymentEvidence::Table(_))
        ));
    }

    #[test]
    fn partial_table_falls_back_to_narrative() {
        // Only two amounts in the annex grid: the table strategy must
        // not report a partial series.
        let page = Page::with_tables(
            2,
            "Приложение 2 к Таблице 7. Вывод: 47,07 % от общего поступления денежных средств, средства дольщиков.",
            vec![annex_grid(&["200000", "300000"])],
        );
        let extraction = extract_payments(&[page]);

        assert_eq!(extraction.percents, vec![47.07, 47.07, 47.07]);
        assert!(extraction.monthly_values.is_none());
        assert!(matches!(
            extraction.evidence,
            Some(PaymentEvidence::Narrative(_))
        ));
    }

    #[test]
    fn narrative_percent_is_replicated_across_three_slots() {
        let page = Page::new(4, "Средства дольщиков составили 81,5 % плана.");
        let extraction = extract_payments(&[page]);
        assert_eq!(extraction.percents, vec![81.5, 81.5, 81.5]);
    }

    #[test]
    fn unknown_payments_are_empty_not_zero() {
        let page = Page::new(1, "Сведения о финансировании отсутствуют.");
        let extraction = extract_payments(&[page]);
        assert!(extraction.percents.is_empty());
        assert!(extraction.monthly_values.is_none());
        assert!(extraction.evidence.is_none());
    }
}
