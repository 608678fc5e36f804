//! Static pattern chains for metric extraction.
//!
//! Each chain is an ordered fallback list: extractors try the patterns
//! in priority order and take the first page match. The vocabulary is
//! the fixed Russian phrasing of engineering-company monitoring reports;
//! patterns are statically authored, never learned.

use lazy_static::lazy_static;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern must compile"))
        .collect()
}

lazy_static! {
    /// Construction completion percentage (СМР), highest-confidence
    /// phrasing first.
    pub static ref COMPLETION_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)Фактическое выполнение СМР.*?составляет\s*[–-]?\s*(\d+[.,]\d+)\s*%",
        r"(?si)СМР\s*выполнен[оа]?\s*:?\s*(\d+[.,]?\d*)\s*%",
        r"(?si)СМР\s*освоен[оа]?\s*(?:на)?\s*(\d+[.,]?\d*)\s*(?:процент|%)",
        r"(?si)[Вв]ыполнение\s*(?:строительно[- ]?монтажных\s*работ|СМР)\s*:?\s*(\d+[.,]?\d*)\s*%",
    ]);

    /// Schedule delay in days (отставание от ГПР).
    pub static ref DELAY_DAY_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)[Оо]тставание.*?(\d+)\s*дн",
        r"(?si)[Оо]тставани[яе]\s+от\s+[Гг][Пп][Рр]\s*[–-]?\s*(\d+)\s*дн",
        r"(?si)[Оо]тставание\s+от\s+графика.*?(\d+)\s*дн",
        r"(?si)[Зз]адержка\s*(?:работ)?\s*[–-]?\s*(\d+)\s*дн",
    ]);

    /// Normative construction duration in months, searched independently
    /// once a day count is found.
    pub static ref NORM_DURATION_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)[Нн]ормативный\s*срок.*?(\d+)\s*месяц",
        r"(?si)[Сс]рок\s*строительства\s*:?\s*(\d+)\s*(?:мес|месяц)",
    ]);

    /// Narrative payment percentage (поступления по ДДУ).
    pub static ref PAYMENT_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)([0-9]+[.,][0-9]+)\s*%\s*от\s*общего\s*поступления.*?средства\s*дольщиков",
        r"(?si)[Сс]редства\s*дольщиков.*?(\d+[.,]?\d*)\s*%",
        r"(?si)[Пп]оступления\s*(?:от|по)?\s*дольщиков.*?(\d+[.,]?\d*)\s*%",
        r"(?si)ДДУ\s*поступления\s*:?\s*(\d+[.,]?\d*)\s*%",
    ]);

    /// Guarantee-event phrases. Presence is the signal; no magnitude is
    /// captured.
    pub static ref GUARANTEE_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)гарантийного\s*случа[яй]",
        r"(?si)[Гг]арантийный\s*случай",
        r"(?si)наступлени[еи]\s*гарантийного\s*случая",
    ]);

    /// Loan overdue days (просрочка по займам).
    pub static ref LOAN_OVERDUE_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)просрочк[аи].*?(\d+)\s+дн",
        r"(?si)(\d+)\s+дн.*?просрочк",
    ]);

    /// Shareholder complaints count (обращения дольщиков).
    pub static ref COMPLAINT_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)обращени[еям].*?(\d+)",
        r"(?si)жалоб.*?(\d+)",
    ]);

    /// Builder rating drop in points.
    pub static ref RATING_DROP_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)рейтинг.*?(?:на|снижение).*?(\d+)",
        r"(?si)снижение.*?рейтинг.*?(\d+)",
    ]);

    /// Debt-to-equity ratio.
    pub static ref DEBT_RATIO_PATTERNS: Vec<Regex> = compile(&[
        r"(?si)(?:долг|заемн\w+).*?(?:капитал|собственн\w+).*?(\d+[.,]\d+)",
        r"(?si)соотношени[еям].*?(?:долг|заемн\w+).*?(\d+[.,]\d+)",
    ]);
}
