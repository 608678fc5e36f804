//! Project identity extraction from the first report page.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::{Page, ProjectInfo};

use crate::locator::collapse_whitespace;

lazy_static! {
    /// Full project name, highest-confidence phrasing first. The title
    /// block of these reports is noisy OCR-adjacent text, hence the
    /// long fallback chain.
    static ref NAME_QUOTED_AFTER_HEADER: Regex = Regex::new(
        r#"(?si)жилого\s+здания\)\s*"([^"]+?)"\.?\s*(?:Первая|вторая|первая)"#
    ).unwrap();
    static ref NAME_QUOTED_COMPLEX: Regex = Regex::new(
        r#"(?s)"(Многоквартирный[^"]+?)"(?:\s*\.|\s*Первая|\s*вторая|$)"#
    ).unwrap();
    static ref NAME_COMPLEX_DESCRIPTION: Regex = Regex::new(
        r"(?si)Многоквартирный\s+жилой\s+комплекс\s+со\s+встро[йн]{1,2}енн[ы]?м[и]?\s+помещениями[^.]*?(?:парким|паркингом)[^.]*?(?:по адресу|город)"
    ).unwrap();
    static ref NAME_ZHK_SHORT: Regex = Regex::new(
        r#"(?i)ЖК\s+"?([^"()]+?)"?(?:\s*\d|\s*оч|$)"#
    ).unwrap();
    static ref NAME_COMPLEX_LINE: Regex = Regex::new(
        r"(?i)(Многоквартирный[^\n]{50,300}?(?:город|адрес))"
    ).unwrap();
    static ref NAME_OBJECT_PARENS: Regex = Regex::new(
        r"(?i)объект[^:]*:\s*\(([^)]{20,}?(?:ЖК|город|район)[^)]*)\)"
    ).unwrap();
    static ref NAME_LABELED: Regex = Regex::new(
        r"(?:Объект|Название|Проект):\s*([А-Яа-яЁё][^.\n]*?(?:жилой|комплекс|ЖК)[^.\n]{0,100}[^.\n])"
    ).unwrap();
    static ref NAME_CYRILLIC_LINE: Regex = Regex::new(
        r"([А-Яа-яЁё]{10,}[^\n]*?(?:жилой|комплекс|ЖК)[^\n]*?(?:город|адрес)[^\n]{0,50})"
    ).unwrap();

    /// "(без наружных инженерных сетей)" suffix dropped from names.
    static ref NETWORKS_SUFFIX: Regex =
        Regex::new(r#"\s*\([^)]*наружных[^)]*\)\s*"?"#).unwrap();
    static ref TRAILING_PAGE_NUMBER: Regex = Regex::new(r"\s+\d+$").unwrap();

    static ref CUSTOMER_LABELED: Regex = Regex::new(
        r"(?i)(?:Заказчик|Застройщик|Инвестор):\s*([А-Яа-яЁё][^\n]+)"
    ).unwrap();
    static ref CUSTOMER_LEGAL_FORM: Regex = Regex::new(
        r#"(?:ООО|АО|ИП|БО|ТОО|СПД)\s+["']?([^'";\n]+)["']?"#
    ).unwrap();

    static ref PROJECT_CODE: Regex = Regex::new(
        r"Код:\s*\(номер сертификата\s*(\d+)\)\s*(ДПГ[^\s]+)"
    ).unwrap();
    static ref REPORT_PERIOD: Regex = Regex::new(r"Отчетный период:\s*(\d{4})(\d{2})").unwrap();

    static ref LOCATION_BY_ADDRESS: Regex = Regex::new(
        r"(?i)по адресу[:\s-]+([^\.]+(?:город|проспект|улица|район)[^\.]+)"
    ).unwrap();
    static ref LOCATION_LABELED: Regex = Regex::new(r"(?i)Адрес.*?:\s*([^\n]+)").unwrap();
}

/// Extract project identity from the first page.
///
/// `requires_manual_name` is set iff no name pattern matched; in that
/// case `full_name` stays `None` and the consumer must prompt for
/// manual entry rather than display a placeholder.
pub fn extract_project_info(pages: &[Page]) -> ProjectInfo {
    let Some(first_page) = pages.first() else {
        return ProjectInfo {
            requires_manual_name: true,
            ..ProjectInfo::default()
        };
    };
    let text = first_page.text.as_str();

    let full_name = extract_name(text);
    ProjectInfo {
        requires_manual_name: full_name.is_none(),
        full_name,
        code: extract_code(text),
        report_period: extract_report_period(text),
        location: extract_location(text),
        customer: extract_customer(text),
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn strip_networks_suffix(name: &str) -> String {
    NETWORKS_SUFFIX.replace_all(name, "").trim().to_string()
}

fn extract_name(text: &str) -> Option<String> {
    // 1. Quoted name right after the standard report header.
    if let Some(caps) = NAME_QUOTED_AFTER_HEADER.captures(text) {
        let name = strip_networks_suffix(&collapse_whitespace(&caps[1]));
        if char_len(&name) > 10 {
            return Some(name);
        }
    }

    // 2. Any quoted name starting with "Многоквартирный".
    if let Some(caps) = NAME_QUOTED_COMPLEX.captures(text) {
        let name = strip_networks_suffix(&collapse_whitespace(&caps[1]));
        if char_len(&name) > 10 {
            return Some(name);
        }
    }

    // 3. Unquoted complex description, cut after the city mention.
    if let Some(m) = NAME_COMPLEX_DESCRIPTION.find(text) {
        let mut desc = m.as_str().to_string();
        if let Some(idx) = desc.rfind("город") {
            let tail: String = desc[idx..].chars().take(20).collect();
            desc = format!("{}{}", &desc[..idx], tail);
        }
        let name = strip_networks_suffix(&collapse_whitespace(&desc));
        if char_len(&name) > 10 {
            return Some(name);
        }
    }

    // 4. Short "ЖК" name in quotes.
    if let Some(caps) = NAME_ZHK_SHORT.captures(text) {
        let name = caps[1].trim().to_string();
        if char_len(&name) > 3 && !name.contains("JM") && !name.contains("City") {
            return Some(name);
        }
    }

    // 5. A single line starting with "Многоквартирный".
    if let Some(caps) = NAME_COMPLEX_LINE.captures(text) {
        let name = strip_networks_suffix(&collapse_whitespace(&caps[1]));
        if char_len(&name) > 15 {
            return Some(name);
        }
    }

    // 6. Parenthesized description after "объект:".
    if let Some(caps) = NAME_OBJECT_PARENS.captures(text) {
        let name = caps[1].trim().to_string();
        if char_len(&name) > 15 {
            return Some(name);
        }
    }

    // 7. Explicitly labeled name.
    if let Some(caps) = NAME_LABELED.captures(text) {
        let name = caps[1].trim().to_string();
        if char_len(&name) > 10 {
            return Some(name);
        }
    }

    // 8. Any Cyrillic line carrying the keywords, page-number artifacts
    // stripped.
    if let Some(caps) = NAME_CYRILLIC_LINE.captures(text) {
        let name = TRAILING_PAGE_NUMBER.replace(caps[1].trim(), "").to_string();
        let name = strip_networks_suffix(&collapse_whitespace(&name));
        if char_len(&name) > 15 {
            return Some(name);
        }
    }

    None
}

fn extract_customer(text: &str) -> Option<String> {
    if let Some(caps) = CUSTOMER_LABELED.captures(text) {
        // The name normally fits on one line; cap it defensively.
        let customer: String = caps[1].trim().chars().take(100).collect();
        if char_len(&customer) > 3 {
            return Some(customer);
        }
    }

    if let Some(caps) = CUSTOMER_LEGAL_FORM.captures(text) {
        let customer = caps[1].trim().to_string();
        if char_len(&customer) > 3 {
            return Some(customer);
        }
    }

    None
}

fn extract_code(text: &str) -> Option<String> {
    PROJECT_CODE
        .captures(text)
        .map(|caps| format!("Сертификат №{}, {}", &caps[1], &caps[2]))
}

fn extract_report_period(text: &str) -> Option<String> {
    let caps = REPORT_PERIOD.captures(text)?;
    let year = &caps[1];
    let month = &caps[2];
    // Anything outside 01..12 is not a period stamp, just six digits.
    let month_name = match month {
        "01" => "января",
        "02" => "февраля",
        "03" => "марта",
        "04" => "апреля",
        "05" => "мая",
        "06" => "июня",
        "07" => "июля",
        "08" => "августа",
        "09" => "сентября",
        "10" => "октября",
        "11" => "ноября",
        "12" => "декабря",
        _ => return None,
    };
    Some(format!("{year}г {month_name}"))
}

fn extract_location(text: &str) -> Option<String> {
    for pattern in [&*LOCATION_BY_ADDRESS, &*LOCATION_LABELED] {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}
