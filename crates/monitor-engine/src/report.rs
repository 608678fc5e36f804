//! Plain-text rendering of a finished analysis for operators.

use std::fmt::Write;

use report_types::{AnalysisReport, DelayEvidence, Evidence, PaymentEvidence, RiskTier};

const DIVIDER_WIDTH: usize = 120;

/// Render the full human-readable report: project identity, status,
/// per-metric evidence with page references, the reasoning trail and
/// tier-specific recommendations.
pub fn render_detailed_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let divider = "=".repeat(DIVIDER_WIDTH);

    let _ = writeln!(out, "{divider}");
    let _ = writeln!(out, "ОТЧЁТ О МОНИТОРИНГЕ СТРОИТЕЛЬСТВА");
    let _ = writeln!(out, "{divider}");

    let info = &report.project_info;
    let _ = writeln!(
        out,
        "Объект: {}",
        info.full_name.as_deref().unwrap_or("(требуется ручной ввод названия)")
    );
    if let Some(code) = &info.code {
        let _ = writeln!(out, "Код: {code}");
    }
    if let Some(period) = &info.report_period {
        let _ = writeln!(out, "Отчётный период: {period}");
    }
    if let Some(location) = &info.location {
        let _ = writeln!(out, "Адрес: {location}");
    }
    if let Some(customer) = &info.customer {
        let _ = writeln!(out, "Заказчик: {customer}");
    }

    let tier = report.classification.tier;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} СТАТУС ПРОЕКТА: {}",
        tier.icon(),
        tier.label().to_uppercase()
    );
    let _ = writeln!(out, "{divider}");

    let _ = writeln!(out, "ИЗВЛЕЧЁННЫЕ ПОКАЗАТЕЛИ");
    let _ = writeln!(out);
    write_completion_block(&mut out, report);
    write_delay_block(&mut out, report);
    write_payments_block(&mut out, report);
    write_guarantee_block(&mut out, report);

    let _ = writeln!(out, "{divider}");
    let _ = writeln!(out, "ОБОСНОВАНИЕ СТАТУСА");
    let _ = writeln!(out);
    for line in report.reasoning() {
        let _ = writeln!(out, "  {line}");
    }

    let _ = writeln!(out, "{divider}");
    let _ = writeln!(out, "РЕКОМЕНДАЦИИ");
    let _ = writeln!(out);
    for line in recommendations(tier, report.degraded) {
        let _ = writeln!(out, "  • {line}");
    }
    let _ = writeln!(out, "{divider}");

    out
}

fn write_evidence(out: &mut String, evidence: &Evidence) {
    let _ = writeln!(out, "    Страница: {}", evidence.page);
    let _ = writeln!(out, "    Контекст: {}", evidence.context);
}

fn write_completion_block(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "1. Выполнение СМР");
    match report.metrics.completion_percent {
        Some(value) => {
            let _ = writeln!(out, "    Значение: {value:.2}%");
            if let Some(evidence) = &report.evidence.completion {
                write_evidence(out, evidence);
            }
            let verdict = if value < 80.0 {
                "ниже критического порога 80%"
            } else {
                "в норме"
            };
            let _ = writeln!(out, "    Оценка: {verdict}");
        }
        None => {
            let _ = writeln!(out, "    Значение: не найдено в отчёте");
        }
    }
    let _ = writeln!(out);
}

fn write_delay_block(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "2. Отставание от графика (ГПР)");
    match (report.metrics.delay_percent, report.metrics.delay_days) {
        (Some(percent), Some(days)) => {
            let _ = writeln!(out, "    Значение: {days} дней ({percent:.2}%)");
            if let Some(DelayEvidence { delay, norm_period }) = &report.evidence.delay {
                write_evidence(out, delay);
                if let Some(norm) = norm_period {
                    let _ = writeln!(out, "    Нормативный срок: {} мес.", norm.value);
                }
            }
            let verdict = if percent > 30.0 {
                "превышает допустимые 30%"
            } else {
                "в допустимых пределах"
            };
            let _ = writeln!(out, "    Оценка: {verdict}");
        }
        _ => {
            let _ = writeln!(out, "    Значение: не найдено в отчёте");
        }
    }
    let _ = writeln!(out);
}

fn write_payments_block(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "3. Поступления по ДДУ");
    match &report.evidence.payments {
        Some(PaymentEvidence::Table(table)) => {
            let values = table
                .values
                .iter()
                .map(|v| format!("{v:.0}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "    Значения по месяцам: {values}");
            let _ = writeln!(out, "    Источник: {} (стр. {})", table.source, table.page);
            let _ = writeln!(out, "    Примечание: {}", table.note);
        }
        Some(PaymentEvidence::Narrative(evidence)) => {
            let _ = writeln!(out, "    Значение: {}%", evidence.value);
            write_evidence(out, evidence);
        }
        None => {
            let _ = writeln!(out, "    Значение: не найдено в отчёте");
        }
    }
    let _ = writeln!(out);
}

fn write_guarantee_block(out: &mut String, report: &AnalysisReport) {
    let _ = writeln!(out, "4. Гарантийный случай");
    if report.metrics.guarantee_event {
        let _ = writeln!(out, "    Значение: объявлен");
        if let Some(evidence) = &report.evidence.guarantee {
            write_evidence(out, evidence);
        }
        let _ = writeln!(out, "    Оценка: критическое событие");
    } else {
        let _ = writeln!(out, "    Значение: не объявлялся");
    }
    let _ = writeln!(out);
}

fn recommendations(tier: RiskTier, degraded: bool) -> Vec<&'static str> {
    if degraded {
        return vec![
            "Провести ручную проверку отчёта",
            "Убедиться, что документ содержит распознаваемый текст",
        ];
    }
    match tier {
        RiskTier::Critical => vec![
            "Незамедлительно уведомить уполномоченный орган",
            "Запросить у застройщика план восстановления графика",
            "Усилить периодичность мониторинга до еженедельной",
        ],
        RiskTier::Alarming => vec![
            "Запросить у застройщика пояснения по отклонениям",
            "Проверить динамику показателей по трём последним отчётам",
        ],
        RiskTier::Normal => vec!["Продолжить мониторинг в плановом режиме"],
    }
}
