//! Page geometry and estimator calibration.
//!
//! All heights are abstract units; one text line is [`DEFAULT_LINE_HEIGHT`]
//! units and a column holds [`DEFAULT_COLUMN_CAPACITY`] units.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum estimated height of one print column.
pub const DEFAULT_COLUMN_CAPACITY: f32 = 1000.0;
pub const DEFAULT_TITLE_HEIGHT: f32 = 32.0;
pub const DEFAULT_INSTRUCTION_HEIGHT: f32 = 28.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;
pub const DEFAULT_PARAGRAPH_PADDING: f32 = 12.0;
/// English prose characters per column line.
pub const DEFAULT_CHARS_PER_LINE_EN: usize = 52;
/// Korean characters per column line (wider glyphs).
pub const DEFAULT_CHARS_PER_LINE_KO: usize = 30;
pub const DEFAULT_OPTION_CHARS_PER_LINE: usize = 44;
pub const DEFAULT_OPTION_LIST_PADDING: f32 = 10.0;
pub const DEFAULT_OPTION_LINE_HEIGHT: f32 = 22.0;
pub const DEFAULT_OPTION_WRAP_LINE_HEIGHT: f32 = 18.0;
pub const DEFAULT_TABLE_ROW_HEIGHT: f32 = 24.0;
pub const DEFAULT_ANSWER_ITEM_HEIGHT: f32 = 22.0;
pub const DEFAULT_ANSWER_PADDING: f32 = 14.0;
pub const DEFAULT_LIST_ITEM_HEIGHT: f32 = 22.0;
pub const DEFAULT_LIST_PADDING: f32 = 10.0;
/// Widest underscore run for a single-word blank.
pub const DEFAULT_BLANK_WORD_MAX: usize = 15;
/// Widest underscore run for a sentence blank.
pub const DEFAULT_BLANK_SENTENCE_MAX: usize = 40;
/// Labels for 1st..9th choices.
pub const OPTION_GLYPHS: [&str; 9] = ["①", "②", "③", "④", "⑤", "⑥", "⑦", "⑧", "⑨"];

/// Every tunable the estimator, splitter and packer read.
///
/// Deserialising a partial JSON object fills the missing fields with the
/// `DEFAULT_*` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub column_capacity: f32,
    pub title_height: f32,
    pub instruction_height: f32,
    pub line_height: f32,
    pub paragraph_padding: f32,
    pub chars_per_line_en: usize,
    pub chars_per_line_ko: usize,
    pub option_chars_per_line: usize,
    pub option_list_padding: f32,
    pub option_line_height: f32,
    pub option_wrap_line_height: f32,
    pub table_row_height: f32,
    pub answer_item_height: f32,
    pub answer_padding: f32,
    pub list_item_height: f32,
    pub list_padding: f32,
    pub blank_word_max: usize,
    pub blank_sentence_max: usize,
    pub option_glyphs: Vec<String>,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            column_capacity: DEFAULT_COLUMN_CAPACITY,
            title_height: DEFAULT_TITLE_HEIGHT,
            instruction_height: DEFAULT_INSTRUCTION_HEIGHT,
            line_height: DEFAULT_LINE_HEIGHT,
            paragraph_padding: DEFAULT_PARAGRAPH_PADDING,
            chars_per_line_en: DEFAULT_CHARS_PER_LINE_EN,
            chars_per_line_ko: DEFAULT_CHARS_PER_LINE_KO,
            option_chars_per_line: DEFAULT_OPTION_CHARS_PER_LINE,
            option_list_padding: DEFAULT_OPTION_LIST_PADDING,
            option_line_height: DEFAULT_OPTION_LINE_HEIGHT,
            option_wrap_line_height: DEFAULT_OPTION_WRAP_LINE_HEIGHT,
            table_row_height: DEFAULT_TABLE_ROW_HEIGHT,
            answer_item_height: DEFAULT_ANSWER_ITEM_HEIGHT,
            answer_padding: DEFAULT_ANSWER_PADDING,
            list_item_height: DEFAULT_LIST_ITEM_HEIGHT,
            list_padding: DEFAULT_LIST_PADDING,
            blank_word_max: DEFAULT_BLANK_WORD_MAX,
            blank_sentence_max: DEFAULT_BLANK_SENTENCE_MAX,
            option_glyphs: OPTION_GLYPHS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl LayoutMetrics {
    /// Default metrics with a different column capacity.
    pub fn with_capacity(column_capacity: f32) -> Self {
        Self {
            column_capacity,
            ..Self::default()
        }
    }

    /// Label for the 1-based choice `n`: a glyph when one exists, `(n)` otherwise.
    pub fn choice_label(&self, n: usize) -> String {
        n.checked_sub(1)
            .and_then(|i| self.option_glyphs.get(i))
            .cloned()
            .unwrap_or_else(|| format!("({n})"))
    }

    /// Reject geometry the engine cannot work with.
    ///
    /// The engine itself assumes valid metrics; this is for values that came
    /// from outside (CLI flags, FFI callers, JSON files).
    pub fn validate(&self) -> Result<()> {
        if self.column_capacity.is_nan() || self.column_capacity <= 0.0 {
            return Err(Error::InvalidMetrics(format!(
                "column capacity must be positive, got {}",
                self.column_capacity
            )));
        }
        if self.line_height.is_nan() || self.line_height <= 0.0 {
            return Err(Error::InvalidMetrics(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if self.chars_per_line_en == 0
            || self.chars_per_line_ko == 0
            || self.option_chars_per_line == 0
        {
            return Err(Error::InvalidMetrics(
                "characters per line must be non-zero".to_string(),
            ));
        }
        if self.option_glyphs.is_empty() {
            return Err(Error::InvalidMetrics("option glyph table is empty".to_string()));
        }
        Ok(())
    }

    /// Deserialise (possibly partial) metrics from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let metrics: Self = serde_json::from_str(json)?;
        metrics.validate()?;
        Ok(metrics)
    }
}
