//! Fill-in-the-blank formatting.
//!
//! A blank marker is a parenthesised run of underscores, e.g. `(_____)`.
//! Markers are matched left to right against the answers in order; markers
//! without an answer are left exactly as written.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::markup;

/// Pre-compiled blank marker: `(`, optional spaces, underscores, optional spaces, `)`.
static BLANK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*_+\s*\)").expect("valid blank marker regex"));

/// Number of blank markers in `text`.
pub fn count_blanks(text: &str) -> usize {
    BLANK_MARKER.find_iter(text).count()
}

/// Problem sheet: each answered marker becomes an underscore run as long as
/// its answer (in characters), capped at `max_width`.
pub fn format_problem(text: &str, answers: &[String], max_width: usize) -> String {
    let mut next = 0usize;
    BLANK_MARKER
        .replace_all(text, |caps: &Captures| {
            let replacement = match answers.get(next) {
                Some(answer) => {
                    let width = answer.chars().count().min(max_width).max(1);
                    format!("({})", "_".repeat(width))
                }
                None => caps[0].to_string(),
            };
            next += 1;
            replacement
        })
        .into_owned()
}

/// Answer sheet: each answered marker becomes the answer text wrapped in
/// `<ins>`. The result is markup. Plain surrounding text is escaped; text
/// that already carries inline markup passes through so its emphasis
/// survives. Answers are always escaped.
pub fn format_answer(text: &str, answers: &[String]) -> String {
    let keep_markup = markup::contains_markup(text);
    let segment = |s: &str| {
        if keep_markup {
            s.to_string()
        } else {
            markup::escape(s)
        }
    };

    let mut out = String::with_capacity(text.len() + answers.len() * 16);
    let mut last = 0usize;
    for (i, m) in BLANK_MARKER.find_iter(text).enumerate() {
        out.push_str(&segment(&text[last..m.start()]));
        match answers.get(i) {
            Some(answer) => {
                out.push_str("<ins>");
                out.push_str(&markup::escape(answer));
                out.push_str("</ins>");
            }
            None => out.push_str(m.as_str()),
        }
        last = m.end();
    }
    out.push_str(&segment(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn problem_run_matches_answer_length() {
        assert_eq!(
            format_problem("I (_____) school.", &answers(&["like"]), 15),
            "I (____) school."
        );
    }

    #[test]
    fn answer_mode_inserts_literal_answer() {
        assert_eq!(
            format_answer("I (_____) school.", &answers(&["like"])),
            "I <ins>like</ins> school."
        );
    }

    #[test]
    fn problem_run_is_capped() {
        let out = format_problem("(__)", &answers(&["extraordinarily"]), 5);
        assert_eq!(out, "(_____)");
    }

    #[test]
    fn counts_hangul_answers_by_character() {
        assert_eq!(format_problem("( _ )", &answers(&["학교"]), 15), "(__)");
    }

    #[test]
    fn consumes_in_order_and_leaves_extra_markers() {
        let text = "A (___) B ( ___ ) C (___)";
        assert_eq!(
            format_problem(text, &answers(&["xy", "zzz"]), 15),
            "A (__) B (___) C (___)"
        );
        assert_eq!(
            format_answer(text, &answers(&["xy", "zzz"])),
            "A <ins>xy</ins> B <ins>zzz</ins> C (___)"
        );
    }

    #[test]
    fn extra_answers_are_ignored() {
        assert_eq!(format_problem("(_)", &answers(&["a", "b"]), 15), "(_)");
        assert_eq!(format_answer("no blanks", &answers(&["a"])), "no blanks");
    }

    #[test]
    fn answer_mode_escapes_text() {
        assert_eq!(
            format_answer("Tom & (___) <3", &answers(&["Jerry"])),
            "Tom &amp; <ins>Jerry</ins> &lt;3"
        );
    }

    #[test]
    fn parenthesised_words_are_not_blanks() {
        assert_eq!(count_blanks("He (probably) left (__)."), 1);
    }

    #[test]
    fn inline_markup_survives_on_both_sheets() {
        let text = "She <u>really</u> (_____) it.";
        assert_eq!(
            format_problem(text, &answers(&["liked"]), 15),
            "She <u>really</u> (_____) it."
        );
        assert_eq!(
            format_answer(text, &answers(&["liked"])),
            "She <u>really</u> <ins>liked</ins> it."
        );
        assert_eq!(
            format_answer(text, &answers(&["<b>"])),
            "She <u>really</u> <ins>&lt;b&gt;</ins> it."
        );
    }
}
