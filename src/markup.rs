//! Markup helpers for opaque `html-fragment` sections.
//!
//! The engine never interprets markup. It only needs:
//! - the visible text of a fragment, with block-level breaks as `\n`, so the
//!   estimator can count characters
//! - escaping, so plain text can be embedded into a fragment
//! - a cheap check for whether raw text carries inline markup

// ---------------------------------------------------------------------------
// Visible text extraction
// ---------------------------------------------------------------------------

/// Strip tags and comments, decode entities, and turn line-breaking tags
/// (`<br>`, `</p>`, `</div>`, `</li>`, `</tr>`) into `\n`.
pub fn visible_text(html: &str) -> String {
    let mut scanner = Scanner::new(html);
    scanner.collect_text()
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn collect_text(&mut self) -> String {
        let mut out = String::with_capacity(self.input.len());
        while !self.eof() {
            if self.starts_with("<!--") {
                self.skip_comment();
            } else if self.starts_with("<") && self.looks_like_tag() {
                if self.skip_tag() {
                    out.push('\n');
                }
            } else {
                let start = self.pos;
                self.advance(1);
                while !self.eof() && !self.starts_with("<") {
                    self.advance(1);
                }
                out.push_str(&decode_entities(&self.input[start..self.pos]));
            }
        }
        out
    }

    /// `<` followed by a letter, `/` or `!`; a bare `<` in prose is text.
    fn looks_like_tag(&self) -> bool {
        self.input[self.pos + 1..]
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
            .unwrap_or(false)
    }

    /// Consume one tag. Returns true when the tag breaks the line.
    fn skip_tag(&mut self) -> bool {
        self.advance(1); // skip '<'
        let closing = self.starts_with("/");
        if closing {
            self.advance(1);
        }
        let name = self.parse_tag_name().to_ascii_lowercase();
        while !self.eof() && !self.starts_with(">") {
            self.advance(1);
        }
        if !self.eof() {
            self.advance(1); // skip '>'
        }
        match name.as_str() {
            "br" => true,
            "p" | "div" | "li" | "tr" => closing,
            _ => false,
        }
    }

    fn parse_tag_name(&mut self) -> &'a str {
        let start = self.pos;
        while !self.eof() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance(1);
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn skip_comment(&mut self) {
        self.advance(4); // skip <!--
        while !self.eof() && !self.starts_with("-->") {
            self.advance(1);
        }
        if !self.eof() {
            self.advance(3);
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn advance(&mut self, n: usize) {
        // Advance by `n` characters (not bytes).
        for _ in 0..n {
            if let Some(c) = self.input[self.pos..].chars().next() {
                self.pos += c.len_utf8();
            }
        }
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{00A0}")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// Authoring helpers
// ---------------------------------------------------------------------------

/// Escape plain text for embedding in an `html-fragment`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// True when `text` contains something that looks like an HTML tag
/// (`<u>`, `</b>`, `<span class=...>`), i.e. it needs the presentation
/// layer to interpret it.
pub fn contains_markup(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        if b != b'<' {
            return false;
        }
        let rest = &text[i + 1..];
        let name = rest.strip_prefix('/').unwrap_or(rest);
        name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) && rest.contains('>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        assert_eq!(
            visible_text("He <u>likes</u> <b class=\"x\">apples</b>."),
            "He likes apples."
        );
    }

    #[test]
    fn block_tags_become_line_breaks() {
        assert_eq!(visible_text("one<br>two<br/>three"), "one\ntwo\nthree");
        assert_eq!(visible_text("<p>a</p><p>b</p>"), "a\nb\n");
    }

    #[test]
    fn decodes_entities_and_skips_comments() {
        assert_eq!(visible_text("a &amp; b <!-- note --> &lt;c&gt;"), "a & b  <c>");
    }

    #[test]
    fn bare_angle_bracket_is_text() {
        assert_eq!(visible_text("3 < 5"), "3 < 5");
    }

    #[test]
    fn korean_text_survives() {
        assert_eq!(visible_text("<ins>학교</ins>에 간다"), "학교에 간다");
    }

    #[test]
    fn escape_then_strip_is_identity() {
        let raw = "Tom & Jerry <3 \"quotes\"";
        assert_eq!(visible_text(&escape(raw)), raw);
    }

    #[test]
    fn detects_markup() {
        assert!(contains_markup("the <u>word</u> here"));
        assert!(contains_markup("<span class=\"a\">x</span>"));
        assert!(!contains_markup("3 < 5 and 6 > 2"));
        assert!(!contains_markup("plain text"));
    }
}
