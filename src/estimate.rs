//! Height estimation by character-count heuristics.
//!
//! Nothing is rendered: every section kind maps to a line count and a few
//! fixed paddings from [`LayoutMetrics`]. The result is deterministic and
//! never shrinks when text grows, but it is not a measurement; callers accept
//! occasional overflow.

use crate::markup;
use crate::metrics::LayoutMetrics;
use crate::section::{NormalizedItem, OptionEntry, Section, SectionBody};

/// Which character width to assume when wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// English prose.
    Latin,
    /// Korean translation text; glyphs are roughly twice as wide.
    Hangul,
}

impl Script {
    fn chars_per_line(self, metrics: &LayoutMetrics) -> usize {
        match self {
            Script::Latin => metrics.chars_per_line_en,
            Script::Hangul => metrics.chars_per_line_ko,
        }
    }
}

/// Number of wrapped lines for `text` at `chars_per_line`.
///
/// Each explicit line (split on `\n`) takes `ceil(chars / chars_per_line)`
/// lines; blank lines take none.
pub fn wrapped_lines(text: &str, chars_per_line: usize) -> usize {
    let per_line = chars_per_line.max(1);
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').chars().count())
        .filter(|&n| n > 0)
        .map(|n| n.div_ceil(per_line))
        .sum()
}

fn text_height(text: &str, script: Script, metrics: &LayoutMetrics) -> f32 {
    let lines = wrapped_lines(text, script.chars_per_line(metrics));
    lines as f32 * metrics.line_height + metrics.paragraph_padding
}

fn option_height(index: usize, option: &OptionEntry, metrics: &LayoutMetrics) -> f32 {
    let label_len = option.label.chars().count() + 1;
    let text_len = label_len + option.text.chars().count();
    let lines = text_len.div_ceil(metrics.option_chars_per_line.max(1)).max(1);
    let extra_lines = lines - 1;
    let mut height =
        metrics.option_line_height + extra_lines as f32 * metrics.option_wrap_line_height;
    if let Some(translation) = option.translation.as_deref() {
        let tr_lines = wrapped_lines(translation, metrics.chars_per_line_ko);
        height += tr_lines as f32 * metrics.option_wrap_line_height;
    }
    log::trace!("option {index}: {lines} line(s), {height:.1} units");
    height
}

/// Estimated height of one section.
pub fn estimate_section(section: &Section, metrics: &LayoutMetrics) -> f32 {
    match &section.body {
        SectionBody::Title { .. } => metrics.title_height,
        SectionBody::Instruction { .. } => metrics.instruction_height,
        SectionBody::Paragraph { text } => text_height(text, Script::Latin, metrics),
        SectionBody::HtmlFragment { html } => {
            text_height(&markup::visible_text(html), Script::Latin, metrics)
        }
        SectionBody::Translation { text } => text_height(text, Script::Hangul, metrics),
        SectionBody::OptionList { options } => {
            metrics.option_list_padding
                + options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| option_height(i, o, metrics))
                    .sum::<f32>()
        }
        SectionBody::Table { headers, rows } => {
            let header_rows = usize::from(headers.is_some());
            (rows.len() + header_rows) as f32 * metrics.table_row_height
        }
        SectionBody::AnswerBlock { items, description } => {
            let lines = items.len() + usize::from(description.is_some());
            lines as f32 * metrics.answer_item_height + metrics.answer_padding
        }
        SectionBody::List { items } => {
            items.len() as f32 * metrics.list_item_height + metrics.list_padding
        }
        SectionBody::Spacer { lines } => *lines as f32 * metrics.line_height,
    }
}

/// Sum of the estimated heights of every section in `item`.
pub fn estimate_item(item: &NormalizedItem, metrics: &LayoutMetrics) -> f32 {
    item.sections
        .iter()
        .map(|s| estimate_section(s, metrics))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Section {
        Section::new("p", SectionBody::Paragraph { text: text.into() })
    }

    #[test]
    fn wrapped_line_counts() {
        assert_eq!(wrapped_lines("", 10), 0);
        assert_eq!(wrapped_lines("abc", 10), 1);
        assert_eq!(wrapped_lines(&"a".repeat(10), 10), 1);
        assert_eq!(wrapped_lines(&"a".repeat(11), 10), 2);
        assert_eq!(wrapped_lines("a\n\nb", 10), 2);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 10 Hangul syllables are 30 bytes but one 10-char line.
        assert_eq!(wrapped_lines("가나다라마바사아자차", 10), 1);
    }

    #[test]
    fn title_and_instruction_are_fixed() {
        let m = LayoutMetrics::default();
        let short = Section::new("t", SectionBody::Title { text: "#1".into() });
        let long = Section::new("t", SectionBody::Title { text: "#1".repeat(200) });
        assert_eq!(estimate_section(&short, &m), m.title_height);
        assert_eq!(estimate_section(&long, &m), m.title_height);
    }

    #[test]
    fn paragraph_height_formula() {
        let m = LayoutMetrics::default();
        let text = "x".repeat(m.chars_per_line_en * 2 + 1);
        let expected = 3.0 * m.line_height + m.paragraph_padding;
        assert_eq!(estimate_section(&para(&text), &m), expected);
    }

    #[test]
    fn paragraph_is_monotonic_in_length() {
        let m = LayoutMetrics::default();
        let mut previous = 0.0;
        for n in 0..400 {
            let h = estimate_section(&para(&"word ".repeat(n)), &m);
            assert!(h >= previous, "height shrank at {n}: {h} < {previous}");
            previous = h;
        }
    }

    #[test]
    fn html_fragment_ignores_tags() {
        let m = LayoutMetrics::default();
        let plain = para("I like school.");
        let html = Section::new(
            "h",
            SectionBody::HtmlFragment {
                html: "I <ins class=\"answer\">like</ins> school.".into(),
            },
        );
        assert_eq!(estimate_section(&plain, &m), estimate_section(&html, &m));
    }

    #[test]
    fn translation_wraps_narrower_than_prose() {
        let m = LayoutMetrics::default();
        let text = "가".repeat(m.chars_per_line_ko + 1);
        let tr = Section::new("tr", SectionBody::Translation { text: text.clone() });
        assert!(estimate_section(&tr, &m) > estimate_section(&para(&text), &m));
    }

    #[test]
    fn option_list_adds_wrap_and_translation() {
        let m = LayoutMetrics::default();
        let entry = |text: &str, translation: Option<&str>| OptionEntry {
            label: "①".into(),
            text: text.into(),
            is_correct: None,
            translation: translation.map(str::to_string),
        };
        let short = Section::new(
            "o",
            SectionBody::OptionList { options: vec![entry("cat", None)] },
        );
        assert_eq!(
            estimate_section(&short, &m),
            m.option_list_padding + m.option_line_height
        );

        let wrapped = Section::new(
            "o",
            SectionBody::OptionList {
                options: vec![entry(&"w".repeat(m.option_chars_per_line * 2), None)],
            },
        );
        assert_eq!(
            estimate_section(&wrapped, &m),
            m.option_list_padding + m.option_line_height + 2.0 * m.option_wrap_line_height
        );

        let translated = Section::new(
            "o",
            SectionBody::OptionList { options: vec![entry("cat", Some("고양이"))] },
        );
        assert_eq!(
            estimate_section(&translated, &m),
            m.option_list_padding + m.option_line_height + m.option_wrap_line_height
        );
    }

    #[test]
    fn table_counts_header_row() {
        let m = LayoutMetrics::default();
        let rows = vec![vec!["a".to_string()]; 3];
        let bare = Section::new("t", SectionBody::Table { headers: None, rows: rows.clone() });
        let headed = Section::new(
            "t",
            SectionBody::Table { headers: Some(vec!["h".into()]), rows },
        );
        assert_eq!(estimate_section(&bare, &m), 3.0 * m.table_row_height);
        assert_eq!(estimate_section(&headed, &m), 4.0 * m.table_row_height);
    }

    #[test]
    fn answer_block_and_list() {
        let m = LayoutMetrics::default();
        let answer = Section::new(
            "a",
            SectionBody::AnswerBlock { items: vec!["③".into()], description: None },
        );
        assert_eq!(estimate_section(&answer, &m), m.answer_item_height + m.answer_padding);
        let list = Section::new(
            "l",
            SectionBody::List { items: vec!["a".into(), "b".into()] },
        );
        assert_eq!(estimate_section(&list, &m), 2.0 * m.list_item_height + m.list_padding);
    }
}
