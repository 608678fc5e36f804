//! Evidence location: ordered pattern scan over pages with
//! sentence-level context reconstruction.

use regex::Regex;
use report_types::{Evidence, Page};

/// Maximum characters walked on each side of a match when looking for a
/// sentence delimiter.
pub const CONTEXT_WINDOW: usize = 200;

/// Scan pages for the first match of an ordered pattern list.
///
/// Priority is purely positional: patterns are tried in list order and,
/// for each pattern, pages in page-number order. The first
/// (pattern, page) combination that matches wins; there is no scoring.
///
/// The returned evidence carries the capture group (or the whole match
/// when the pattern has no groups) and the reconstructed sentence
/// context. Pure function, no side effects.
pub fn locate(pages: &[Page], patterns: &[Regex], metric: &str) -> Option<Evidence> {
    for pattern in patterns {
        for page in pages {
            if let Some(caps) = pattern.captures(&page.text) {
                let whole = caps.get(0).expect("capture 0 always present");
                let value = caps.get(1).map_or(whole.as_str(), |g| g.as_str());
                return Some(Evidence {
                    metric: metric.to_string(),
                    value: collapse_whitespace(value),
                    page: page.number,
                    context: sentence_context(&page.text, whole.start(), whole.end()),
                    pattern_used: pattern.as_str().to_string(),
                });
            }
        }
    }
    None
}

/// Collapse whitespace runs to single spaces and trim the ends.
///
/// Applied to both the matched value and its context so the
/// "context contains value" invariant holds on the normalized forms.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reconstruct the sentence around a match span.
///
/// Walks backward from the match start and forward from the match end,
/// up to [`CONTEXT_WINDOW`] characters each way, stopping at the nearest
/// sentence delimiter (`.`, `!`, `?` or a line break). When no delimiter
/// falls inside the window the window boundary itself is used. Offsets
/// are byte positions on valid char boundaries; the walk itself is
/// char-wise so Cyrillic text is never split mid code point.
fn sentence_context(text: &str, start: usize, end: usize) -> String {
    let is_delimiter = |c: char| matches!(c, '.' | '!' | '?' | '\n');

    let mut ctx_start = start;
    let mut walked = 0;
    for (idx, ch) in text[..start].char_indices().rev() {
        if walked >= CONTEXT_WINDOW {
            break;
        }
        if is_delimiter(ch) {
            ctx_start = idx + ch.len_utf8();
            break;
        }
        ctx_start = idx;
        walked += 1;
    }

    let mut ctx_end = end;
    let mut walked = 0;
    for (offset, ch) in text[end..].char_indices() {
        if walked >= CONTEXT_WINDOW {
            break;
        }
        ctx_end = end + offset + ch.len_utf8();
        if is_delimiter(ch) {
            break;
        }
        walked += 1;
    }

    collapse_whitespace(&text[ctx_start..ctx_end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pages(texts: &[&str]) -> Vec<Page> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Page::new((i + 1) as u32, *t))
            .collect()
    }

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn first_pattern_wins_over_page_order() {
        // Both patterns match somewhere; the earlier pattern matches on a
        // later page, and must still win.
        let pages = pages(&["второй вариант 10", "первый вариант 20"]);
        let patterns = [re(r"первый вариант (\d+)"), re(r"второй вариант (\d+)")];

        let evidence = locate(&pages, &patterns, "тест").unwrap();
        assert_eq!(evidence.value, "20");
        assert_eq!(evidence.page, 2);
    }

    #[test]
    fn pages_scanned_in_order_for_one_pattern() {
        let pages = pages(&["нет совпадения", "значение 5", "значение 9"]);
        let patterns = [re(r"значение (\d+)")];

        let evidence = locate(&pages, &patterns, "тест").unwrap();
        assert_eq!(evidence.value, "5");
        assert_eq!(evidence.page, 2);
    }

    #[test]
    fn whole_match_used_when_no_capture_group() {
        let pages = pages(&["объявлен гарантийный случай."]);
        let patterns = [re(r"(?i)гарантийный\s*случай")];

        let evidence = locate(&pages, &patterns, "Гарантийный случай").unwrap();
        assert_eq!(evidence.value, "гарантийный случай");
    }

    #[test]
    fn context_is_bounded_by_sentence_delimiters() {
        let text = "Первое предложение. Отставание от гпр 76 дн. Третье предложение.";
        let pages = pages(&[text]);
        let patterns = [re(r"(?i)отставание.*?(\d+)\s*дн")];

        let evidence = locate(&pages, &patterns, "Отставание").unwrap();
        assert_eq!(evidence.context, "Отставание от гпр 76 дн.");
    }

    #[test]
    fn context_contains_value_after_whitespace_collapse() {
        let text = "Фактическое выполнение   СМР\nсоставляет –46,69% на конец периода.";
        let pages = pages(&[text]);
        let patterns = [re(r"(?si)выполнение\s*СМР.*?(\d+[.,]\d+)\s*%")];

        let evidence = locate(&pages, &patterns, "СМР").unwrap();
        assert!(evidence.context.contains(&evidence.value));
        assert!(!evidence.context.contains('\n'));
        assert!(!evidence.context.contains("  "));
    }

    #[test]
    fn window_boundary_used_without_delimiters() {
        // 300 characters of filler, no delimiters anywhere.
        let filler = "а".repeat(300);
        let text = format!("{filler} цель 42 {filler}");
        let pages = vec![Page::new(1, text)];
        let patterns = [re(r"цель (\d+)")];

        let evidence = locate(&pages, &patterns, "тест").unwrap();
        assert!(evidence.context.contains("цель 42"));
        // Window is 200 chars per side; the 300-char filler must be cut.
        assert!(evidence.context.chars().count() < 450);
    }

    #[test]
    fn no_match_returns_none() {
        let pages = pages(&["ничего интересного"]);
        let patterns = [re(r"значение (\d+)")];
        assert!(locate(&pages, &patterns, "тест").is_none());
    }

    #[test]
    fn empty_page_text_is_tolerated() {
        let pages = vec![Page::new(1, ""), Page::new(2, "значение 7")];
        let patterns = [re(r"значение (\d+)")];
        let evidence = locate(&pages, &patterns, "тест").unwrap();
        assert_eq!(evidence.page, 2);
    }
}
