//! Section model – the intermediate representation between normalization and
//! the presentation layer. A [`Document`] is the "frozen" structure that
//! encodes exactly which question fragments go in which print column.

use serde::{Deserialize, Serialize};

/// Problem sheet or answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Problem,
    Answer,
}

/// Discriminant of a [`SectionBody`], handy for visibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Title,
    Instruction,
    Paragraph,
    HtmlFragment,
    OptionList,
    Table,
    AnswerBlock,
    Translation,
    List,
    Spacer,
}

impl SectionKind {
    /// Title and instruction frame a question; everything else is content.
    pub fn is_content(self) -> bool {
        !matches!(self, SectionKind::Title | SectionKind::Instruction)
    }
}

/// One entry of an option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub label: String,
    pub text: String,
    /// Only set in answer mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Kind-specific payload of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SectionBody {
    Title {
        text: String,
    },
    Instruction {
        text: String,
    },
    Paragraph {
        text: String,
    },
    /// Pre-escaped markup. Opaque to everything but the presentation layer.
    HtmlFragment {
        html: String,
    },
    OptionList {
        options: Vec<OptionEntry>,
    },
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
    },
    AnswerBlock {
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Translation {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    /// Blank room, measured in text lines.
    Spacer {
        lines: u32,
    },
}

/// The atomic content block.
///
/// Sections are never edited after creation; the splitter only produces
/// re-keyed clones via [`Section::rekeyed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn new(key: impl Into<String>, body: SectionBody) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self.body {
            SectionBody::Title { .. } => SectionKind::Title,
            SectionBody::Instruction { .. } => SectionKind::Instruction,
            SectionBody::Paragraph { .. } => SectionKind::Paragraph,
            SectionBody::HtmlFragment { .. } => SectionKind::HtmlFragment,
            SectionBody::OptionList { .. } => SectionKind::OptionList,
            SectionBody::Table { .. } => SectionKind::Table,
            SectionBody::AnswerBlock { .. } => SectionKind::AnswerBlock,
            SectionBody::Translation { .. } => SectionKind::Translation,
            SectionBody::List { .. } => SectionKind::List,
            SectionBody::Spacer { .. } => SectionKind::Spacer,
        }
    }

    /// Clone with a new key; the payload is shared verbatim.
    pub fn rekeyed(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: self.body.clone(),
        }
    }
}

/// Which parts of a question a chunk shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMeta {
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub show_instruction: bool,
    pub show_options: bool,
    pub show_answer: bool,
    pub show_translation: bool,
}

impl ChunkMeta {
    /// Instruction on the first chunk, options/answer/translation on the last.
    pub fn for_chunk(chunk_index: usize, total_chunks: usize) -> Self {
        let last = chunk_index + 1 == total_chunks;
        Self {
            chunk_index,
            total_chunks,
            show_instruction: chunk_index == 0,
            show_options: last,
            show_answer: last,
            show_translation: last,
        }
    }
}

/// One logical question, or one fragment of it after splitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub work_type_id: u32,
    /// Stable identity of the question; shared by all of its chunks.
    pub key: String,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_meta: Option<ChunkMeta>,
}

impl NormalizedItem {
    pub fn new(work_type_id: u32, key: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            work_type_id,
            key: key.into(),
            sections,
            chunk_meta: None,
        }
    }

    pub fn title(&self) -> Option<&Section> {
        self.sections
            .first()
            .filter(|s| s.kind() == SectionKind::Title)
    }

    /// Sections other than title and instruction, in order.
    pub fn content_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.kind().is_content())
    }

    pub fn chunk_index(&self) -> usize {
        self.chunk_meta.map(|m| m.chunk_index).unwrap_or(0)
    }

    /// True when `other` is the same fragment of the same question.
    pub fn same_chunk(&self, other: &NormalizedItem) -> bool {
        self.key == other.key && self.chunk_index() == other.chunk_index()
    }
}

/// One print column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column {
    pub items: Vec<NormalizedItem>,
}

impl Column {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, item: NormalizedItem) {
        self.items.push(item);
    }
}

/// A printed page: left and right column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    pub columns: [Column; 2],
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    pub fn left(&self) -> &Column {
        &self.columns[0]
    }

    pub fn right(&self) -> &Column {
        &self.columns[1]
    }

    /// Index of the column holding `chunk`, if it is on this page.
    pub fn column_of(&self, chunk: &NormalizedItem) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.items.iter().any(|it| it.same_chunk(chunk)))
    }

    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }
}

/// A complete paginated worksheet ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "Document::default_title")]
    pub title: String,
    pub mode: Mode,
    /// Capacity the pages were packed against, in estimator units.
    pub column_capacity: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(mode: Mode, column_capacity: f32, pages: Vec<Page>) -> Self {
        Self {
            title: Self::default_title(),
            mode,
            column_capacity,
            pages,
        }
    }

    fn default_title() -> String {
        "worksheet".to_string()
    }

    /// Total number of chunks across every page and column.
    pub fn chunk_count(&self) -> usize {
        self.pages.iter().map(Page::item_count).sum()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
