//! Rule-based risk-tier classification.
//!
//! Every condition is reported in a fixed order with a tri-state
//! outcome, so the reasoning trail reads the same for every report and
//! an unknown metric is never silently treated as a passing one.

use report_types::{ClassificationResult, ConditionId, ConditionReport, Metrics, RiskTier};

/// Completion below this marks condition "a".
pub const COMPLETION_THRESHOLD: f64 = 80.0;
/// Delay percentage above this marks condition "b1".
pub const DELAY_THRESHOLD: f64 = 30.0;
/// Any payment figure below this marks condition "b6".
pub const PAYMENT_THRESHOLD: f64 = 70.0;
/// Descending month-over-month ladder for the critical payment check,
/// oldest month first.
pub const CRITICAL_PAYMENT_LADDER: [f64; 3] = [70.0, 60.0, 50.0];

/// Classify a metric set into a risk tier with full condition reports.
///
/// The tier is critical only when all four critical conditions hold at
/// once, alarming when completion lags together with either schedule
/// or payment trouble, and normal otherwise.
pub fn classify(metrics: &Metrics) -> ClassificationResult {
    let (payments, series_kind) = effective_payment_series(metrics);

    let cond_a = evaluate_completion(metrics);
    let cond_b1 = evaluate_delay(metrics);
    let cond_b6 = evaluate_payments(&payments, series_kind);
    let cond_d1 = evaluate_guarantee(metrics);

    let critical_payment = payments.len() >= CRITICAL_PAYMENT_LADDER.len()
        && payments
            .iter()
            .zip(CRITICAL_PAYMENT_LADDER.iter())
            .all(|(value, threshold)| value < threshold);

    let tier = if cond_a.met && critical_payment && cond_b1.met && cond_d1.met {
        RiskTier::Critical
    } else if cond_a.met && (cond_b1.met || cond_b6.met) {
        RiskTier::Alarming
    } else {
        RiskTier::Normal
    };

    let conditions = vec![cond_a, cond_b1, cond_b6, cond_d1];
    let triggered_conditions = conditions
        .iter()
        .filter(|c| c.met)
        .map(|c| c.id)
        .collect();

    ClassificationResult {
        tier,
        triggered_conditions,
        conditions,
    }
}

/// Unit of the effective payment series; drives how condition
/// messages render the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Percent,
    Amount,
}

/// The series the payment conditions are judged on: explicit
/// percentages when present, otherwise raw monthly amounts. Raw
/// amounts in the hundreds of thousands sit far above every
/// percentage threshold, so an absolute series can clear the checks
/// but never fire them spuriously.
fn effective_payment_series(metrics: &Metrics) -> (Vec<f64>, SeriesKind) {
    if !metrics.payment_percents.is_empty() {
        return (metrics.payment_percents.clone(), SeriesKind::Percent);
    }
    (
        metrics.payment_monthly_values.clone().unwrap_or_default(),
        SeriesKind::Amount,
    )
}

fn evaluate_completion(metrics: &Metrics) -> ConditionReport {
    match metrics.completion_percent {
        Some(completion) if completion < COMPLETION_THRESHOLD => ConditionReport {
            id: ConditionId::A,
            evaluated: true,
            met: true,
            message: format!(
                "✓ Условие 'a' ВЫПОЛНЕНО: СМР {completion:.2}% < {COMPLETION_THRESHOLD:.0}% (критический порог)"
            ),
        },
        Some(completion) => ConditionReport {
            id: ConditionId::A,
            evaluated: true,
            met: false,
            message: format!(
                "✗ Условие 'a' НЕ ВЫПОЛНЕНО: СМР {completion:.2}% >= {COMPLETION_THRESHOLD:.0}% (в норме)"
            ),
        },
        None => ConditionReport {
            id: ConditionId::A,
            evaluated: false,
            met: false,
            message: "— Условие 'a' НЕ ОЦЕНЕНО: процент выполнения СМР не найден в отчёте"
                .to_string(),
        },
    }
}

fn evaluate_delay(metrics: &Metrics) -> ConditionReport {
    match metrics.delay_percent {
        Some(delay) if delay > DELAY_THRESHOLD => ConditionReport {
            id: ConditionId::B1,
            evaluated: true,
            met: true,
            message: format!(
                "✓ Условие 'b1' ВЫПОЛНЕНО: Отставание {delay:.2}% > {DELAY_THRESHOLD:.0}% ({} дней)",
                metrics.delay_days.unwrap_or(0)
            ),
        },
        Some(delay) => ConditionReport {
            id: ConditionId::B1,
            evaluated: true,
            met: false,
            message: format!(
                "✗ Условие 'b1' НЕ ВЫПОЛНЕНО: Отставание {delay:.2}% <= {DELAY_THRESHOLD:.0}% ({} дней - в допустимых пределах)",
                metrics.delay_days.unwrap_or(0)
            ),
        },
        None => ConditionReport {
            id: ConditionId::B1,
            evaluated: false,
            met: false,
            message: "— Условие 'b1' НЕ ОЦЕНЕНО: отставание от графика не найдено в отчёте"
                .to_string(),
        },
    }
}

fn evaluate_payments(payments: &[f64], kind: SeriesKind) -> ConditionReport {
    if payments.is_empty() {
        return ConditionReport {
            id: ConditionId::B6,
            evaluated: false,
            met: false,
            message: "— Условие 'b6' НЕ ОЦЕНЕНО: поступления по ДДУ не найдены в отчёте"
                .to_string(),
        };
    }

    // Absolute monthly amounts carry no percent sign in the trail.
    let render = |value: f64| match kind {
        SeriesKind::Percent => format!("{value:.2}%"),
        SeriesKind::Amount => format!("{value:.2}"),
    };
    let threshold = match kind {
        SeriesKind::Percent => format!("{PAYMENT_THRESHOLD:.0}%"),
        SeriesKind::Amount => format!("{PAYMENT_THRESHOLD:.0}"),
    };

    match payments.iter().find(|value| **value < PAYMENT_THRESHOLD) {
        Some(breach) => ConditionReport {
            id: ConditionId::B6,
            evaluated: true,
            met: true,
            message: format!(
                "✓ Условие 'b6' ВЫПОЛНЕНО: Поступления по ДДУ {} < {threshold} (критический порог)",
                render(*breach)
            ),
        },
        None => ConditionReport {
            id: ConditionId::B6,
            evaluated: true,
            met: false,
            message: format!(
                "✗ Условие 'b6' НЕ ВЫПОЛНЕНО: Поступления по ДДУ {} >= {threshold} (в норме)",
                render(payments[0])
            ),
        },
    }
}

fn evaluate_guarantee(metrics: &Metrics) -> ConditionReport {
    if metrics.guarantee_event {
        ConditionReport {
            id: ConditionId::D1,
            evaluated: true,
            met: true,
            message: "✓ Условие 'd1' ВЫПОЛНЕНО: Объявлен гарантийный случай (критическое событие)"
                .to_string(),
        }
    } else {
        ConditionReport {
            id: ConditionId::D1,
            evaluated: true,
            met: false,
            message: "✗ Условие 'd1' НЕ ВЫПОЛНЕНО: Гарантийный случай не объявлялся".to_string(),
        }
    }
}
