//! Normalization – maps a raw record onto an ordered list of sections.
//!
//! Every work type is handled here and only here; the estimator, splitter
//! and packer only ever see [`Section`]s. Section order within an item is
//! always: title, instruction, body sections, option list (or choice table),
//! answer block, translation.

use log::{debug, warn};

use crate::blanks;
use crate::markup;
use crate::metrics::LayoutMetrics;
use crate::record::RawRecord;
use crate::section::{
    ChunkMeta, Mode, NormalizedItem, OptionEntry, Section, SectionBody, SectionKind,
};
use crate::work_type::WorkType;

/// Which optional parts of a question to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub instruction: bool,
    pub options: bool,
    pub answer: bool,
    pub translation: bool,
}

impl Visibility {
    pub const ALL: Visibility = Visibility {
        instruction: true,
        options: true,
        answer: true,
        translation: true,
    };

    fn keeps(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Instruction => self.instruction,
            SectionKind::OptionList | SectionKind::Table => self.options,
            SectionKind::AnswerBlock => self.answer,
            SectionKind::Translation => self.translation,
            _ => true,
        }
    }
}

impl From<&ChunkMeta> for Visibility {
    fn from(meta: &ChunkMeta) -> Self {
        Self {
            instruction: meta.show_instruction,
            options: meta.show_options,
            answer: meta.show_answer,
            translation: meta.show_translation,
        }
    }
}

/// Item key for `record`: `q<id>`, prefixed with `parent` for questions
/// nested in a composite session. Keys are only unique when ids are; the
/// pipeline disambiguates repeats.
pub fn item_key(record: &RawRecord, position: usize, parent: Option<&str>) -> String {
    let id = record.display_id(position);
    match parent {
        Some(p) => format!("{p}-q{id}"),
        None => format!("q{id}"),
    }
}

/// Accumulates sections under one item key.
struct ItemBuilder {
    key: String,
    sections: Vec<Section>,
}

impl ItemBuilder {
    fn new(key: String) -> Self {
        Self {
            key,
            sections: Vec::new(),
        }
    }

    fn push(&mut self, suffix: &str, body: SectionBody) {
        let key = format!("{}-{}", self.key, suffix);
        self.sections.push(Section::new(key, body));
    }

    /// Plain paragraph, or an html fragment when the text carries markup.
    fn push_text(&mut self, suffix: &str, text: &str) {
        let body = if markup::contains_markup(text) {
            SectionBody::HtmlFragment {
                html: text.to_string(),
            }
        } else {
            SectionBody::Paragraph {
                text: text.to_string(),
            }
        };
        self.push(suffix, body);
    }
}

/// Maps raw records onto [`NormalizedItem`]s for one mode.
pub struct Normalizer<'a> {
    mode: Mode,
    metrics: &'a LayoutMetrics,
}

impl<'a> Normalizer<'a> {
    pub fn new(mode: Mode, metrics: &'a LayoutMetrics) -> Self {
        Self { mode, metrics }
    }

    /// Normalize `record`. `position` (1-based) numbers records without an id.
    pub fn normalize(&self, record: &RawRecord, position: usize) -> NormalizedItem {
        let key = item_key(record, position, None);
        self.normalize_keyed(record, position, key, Visibility::ALL)
    }

    /// Normalize an already-split fragment: parts hidden by `meta` are
    /// omitted and the metadata is attached to the result.
    pub fn renormalize(
        &self,
        record: &RawRecord,
        position: usize,
        meta: &ChunkMeta,
    ) -> NormalizedItem {
        let key = item_key(record, position, None);
        let mut item = self.normalize_keyed(record, position, key, Visibility::from(meta));
        item.chunk_meta = Some(*meta);
        item
    }

    /// Normalize under an explicit item key and visibility.
    pub(crate) fn normalize_keyed(
        &self,
        record: &RawRecord,
        position: usize,
        key: String,
        visibility: Visibility,
    ) -> NormalizedItem {
        let id = record.display_id(position);

        let Some(work_type) = WorkType::from_id(record.work_type_id) else {
            warn!(
                "unknown work type {} for question {id}; dumping raw record",
                record.work_type_id
            );
            let text = record.dump();
            let sections = vec![Section::new(
                format!("{key}-raw"),
                SectionBody::Paragraph { text },
            )];
            return NormalizedItem::new(record.work_type_id, key, sections);
        };

        let mut b = ItemBuilder::new(key);
        b.push(
            "title",
            SectionBody::Title {
                text: format!("#{id}. {}", work_type.label()),
            },
        );
        let instruction = record
            .non_empty_text("instruction")
            .unwrap_or(work_type.default_instruction());
        b.push(
            "instruction",
            SectionBody::Instruction {
                text: instruction.to_string(),
            },
        );

        match work_type {
            WorkType::Vocabulary
            | WorkType::Grammar
            | WorkType::Irrelevant
            | WorkType::Topic
            | WorkType::Title
            | WorkType::Reference => {
                b.push_text("body", record.text("passage"));
                self.push_choices(&mut b, record);
            }
            WorkType::Insertion => {
                b.push_text("given", record.text("givenSentence"));
                b.push_text("body", record.text("passage"));
                self.push_choices(&mut b, record);
            }
            WorkType::Order => {
                b.push_text("intro", record.text("intro"));
                b.push(
                    "segments",
                    SectionBody::List {
                        items: record.string_list("segments"),
                    },
                );
                self.push_choices(&mut b, record);
            }
            WorkType::BlankWord | WorkType::BlankSentence => {
                self.push_blanks(&mut b, record, work_type);
            }
            WorkType::Summary => {
                b.push_text("body", record.text("passage"));
                b.push_text("summary", record.text("summary"));
                self.push_summary_choices(&mut b, record);
            }
            WorkType::Unscramble => {
                b.push(
                    "prompt",
                    SectionBody::Paragraph {
                        text: record.text("prompt").to_string(),
                    },
                );
                b.push(
                    "words",
                    SectionBody::List {
                        items: record.string_list("words"),
                    },
                );
                match self.mode {
                    Mode::Problem => b.push("space", SectionBody::Spacer { lines: 2 }),
                    Mode::Answer => {
                        let mut items = record.string_list("answers");
                        if items.is_empty() {
                            items.extend(record.non_empty_text("answer").map(str::to_string));
                        }
                        self.push_answer_tail(&mut b, record, items);
                    }
                }
            }
            WorkType::PassageTranslation => {
                b.push_text("body", record.text("passage"));
                self.push_answer_tail(&mut b, record, Vec::new());
            }
            WorkType::Composite => {
                if let Some(passage) = record.non_empty_text("passage") {
                    b.push_text("body", passage);
                }
            }
        }

        let ItemBuilder { key, sections } = b;
        let sections: Vec<Section> = sections
            .into_iter()
            .filter(|s| visibility.keeps(s.kind()))
            .collect();
        debug!("normalized {key}: {} section(s)", sections.len());
        NormalizedItem::new(work_type.id(), key, sections)
    }

    fn option_entries(&self, record: &RawRecord, correct: &[usize]) -> Vec<OptionEntry> {
        record
            .options()
            .into_iter()
            .enumerate()
            .map(|(i, opt)| {
                let answer = self.mode == Mode::Answer;
                OptionEntry {
                    label: self.metrics.choice_label(i + 1),
                    text: opt.text,
                    is_correct: answer.then(|| correct.contains(&(i + 1))),
                    translation: opt.translation.filter(|_| answer),
                }
            })
            .collect()
    }

    /// Option list plus, in answer mode, the glyph answer and translation.
    fn push_choices(&self, b: &mut ItemBuilder, record: &RawRecord) {
        let correct = record.answer_numbers();
        let options = self.option_entries(record, &correct);
        let items = self.choice_labels(&correct, options.len());
        b.push("options", SectionBody::OptionList { options });
        self.push_answer_tail(b, record, items);
    }

    fn push_summary_choices(&self, b: &mut ItemBuilder, record: &RawRecord) {
        let rows = record.rows("rows");
        if rows.is_empty() {
            self.push_choices(b, record);
            return;
        }
        let count = rows.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let mut row = Vec::with_capacity(cells.len() + 1);
                row.push(self.metrics.choice_label(i + 1));
                row.extend(cells);
                row
            })
            .collect();
        b.push(
            "choices",
            SectionBody::Table {
                headers: Some(vec![String::new(), "(A)".to_string(), "(B)".to_string()]),
                rows,
            },
        );
        let items = self.choice_labels(&record.answer_numbers(), count);
        self.push_answer_tail(b, record, items);
    }

    fn push_blanks(&self, b: &mut ItemBuilder, record: &RawRecord, work_type: WorkType) {
        let text = record.text("blankedText");
        let correct = record.answer_numbers();
        let options = record.options();
        let mut answers = record.string_list("answers");
        if answers.is_empty() {
            // Choice-style blanks: the correct options fill the markers.
            answers = correct
                .iter()
                .filter_map(|&n| n.checked_sub(1).and_then(|i| options.get(i)))
                .map(|o| o.text.clone())
                .collect();
        }
        let markers = blanks::count_blanks(text);
        if markers != answers.len() {
            debug!(
                "{}: {markers} blank marker(s) for {} answer(s)",
                b.key,
                answers.len()
            );
        }
        let cap = match work_type {
            WorkType::BlankSentence => self.metrics.blank_sentence_max,
            _ => self.metrics.blank_word_max,
        };

        match self.mode {
            Mode::Problem => b.push_text("body", &blanks::format_problem(text, &answers, cap)),
            Mode::Answer => b.push(
                "body",
                SectionBody::HtmlFragment {
                    html: blanks::format_answer(text, &answers),
                },
            ),
        }

        if options.is_empty() {
            self.push_answer_tail(b, record, answers);
        } else {
            self.push_choices(b, record);
        }
    }

    /// Glyph per correct choice; numbers past the last choice read `(n)`.
    fn choice_labels(&self, correct: &[usize], choices: usize) -> Vec<String> {
        correct
            .iter()
            .map(|&n| {
                if n <= choices {
                    self.metrics.choice_label(n)
                } else {
                    format!("({n})")
                }
            })
            .collect()
    }

    /// Answer-mode answer block and translation. No-op on problem sheets.
    fn push_answer_tail(&self, b: &mut ItemBuilder, record: &RawRecord, items: Vec<String>) {
        if self.mode != Mode::Answer {
            return;
        }
        if !items.is_empty() {
            b.push(
                "answer",
                SectionBody::AnswerBlock {
                    items,
                    description: record.non_empty_text("explanation").map(str::to_string),
                },
            );
        }
        if let Some(text) = record.non_empty_text("translation") {
            b.push(
                "translation",
                SectionBody::Translation {
                    text: text.to_string(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kinds(item: &NormalizedItem) -> Vec<SectionKind> {
        item.sections.iter().map(Section::kind).collect()
    }

    fn topic_record() -> RawRecord {
        RawRecord::new(
            8,
            json!({
                "id": 3,
                "passage": "Bees communicate by dancing.",
                "options": ["dance", {"text": "food", "translation": "음식"}, "hives", "flowers"],
                "answer": 1,
                "translation": "벌은 춤으로 소통한다.",
                "explanation": "첫 문장이 주제문이다."
            }),
        )
    }

    #[test]
    fn problem_mode_choice_item() {
        let m = LayoutMetrics::default();
        let item = Normalizer::new(Mode::Problem, &m).normalize(&topic_record(), 1);
        assert_eq!(item.key, "q3");
        assert_eq!(
            kinds(&item),
            vec![
                SectionKind::Title,
                SectionKind::Instruction,
                SectionKind::Paragraph,
                SectionKind::OptionList
            ]
        );
        assert_eq!(
            item.sections[0].body,
            SectionBody::Title { text: "#3. 주제 찾기".into() }
        );
        let SectionBody::OptionList { options } = &item.sections[3].body else {
            panic!("expected option list");
        };
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, "①");
        assert!(options.iter().all(|o| o.is_correct.is_none() && o.translation.is_none()));
    }

    #[test]
    fn answer_mode_adds_answer_and_translation() {
        let m = LayoutMetrics::default();
        let item = Normalizer::new(Mode::Answer, &m).normalize(&topic_record(), 1);
        assert_eq!(
            kinds(&item)[3..],
            [
                SectionKind::OptionList,
                SectionKind::AnswerBlock,
                SectionKind::Translation
            ]
        );
        let SectionBody::OptionList { options } = &item.sections[3].body else {
            panic!("expected option list");
        };
        assert_eq!(options[0].is_correct, Some(true));
        assert_eq!(options[1].is_correct, Some(false));
        assert_eq!(options[1].translation.as_deref(), Some("음식"));
        assert_eq!(
            item.sections[4].body,
            SectionBody::AnswerBlock {
                items: vec!["①".into()],
                description: Some("첫 문장이 주제문이다.".into())
            }
        );
    }

    #[test]
    fn answer_past_last_option_is_numbered() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(8, json!({"options": ["a", "b"], "answer": [2, 7]}));
        let item = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        assert_eq!(
            item.sections[4].body,
            SectionBody::AnswerBlock { items: vec!["②".into(), "(7)".into()], description: None }
        );
    }

    #[test]
    fn markup_body_becomes_html_fragment() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(2, json!({"passage": "She <u>go</u> to school."}));
        let item = Normalizer::new(Mode::Problem, &m).normalize(&record, 1);
        assert_eq!(item.sections[2].kind(), SectionKind::HtmlFragment);
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(1, json!({}));
        let item = Normalizer::new(Mode::Answer, &m).normalize(&record, 5);
        assert_eq!(item.key, "q5");
        assert_eq!(
            item.sections[2].body,
            SectionBody::Paragraph { text: String::new() }
        );
        assert_eq!(
            item.sections[3].body,
            SectionBody::OptionList { options: vec![] }
        );
        // No answer and no translation to show.
        assert_eq!(item.sections.len(), 4);
    }

    #[test]
    fn unknown_work_type_dumps_record() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(42, json!({"id": 9, "foo": "bar"}));
        let item = Normalizer::new(Mode::Problem, &m).normalize(&record, 1);
        assert_eq!(item.work_type_id, 42);
        assert_eq!(item.sections.len(), 1);
        let SectionBody::Paragraph { text } = &item.sections[0].body else {
            panic!("expected paragraph");
        };
        assert!(text.contains("\"foo\":\"bar\""));
        assert!(text.contains("\"workTypeId\":42"));
    }

    #[test]
    fn blank_word_problem_and_answer() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(
            3,
            json!({"blankedText": "I (_____) school.", "answers": ["like"]}),
        );
        let problem = Normalizer::new(Mode::Problem, &m).normalize(&record, 1);
        assert_eq!(
            problem.sections[2].body,
            SectionBody::Paragraph { text: "I (____) school.".into() }
        );
        assert_eq!(problem.sections.len(), 3);

        let answer = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        assert_eq!(
            answer.sections[2].body,
            SectionBody::HtmlFragment { html: "I <ins>like</ins> school.".into() }
        );
        assert_eq!(
            answer.sections[3].body,
            SectionBody::AnswerBlock { items: vec!["like".into()], description: None }
        );
    }

    #[test]
    fn blank_text_keeps_inline_emphasis_in_both_modes() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(
            3,
            json!({"blankedText": "She <u>really</u> (_____) it.", "answers": ["liked"]}),
        );
        let problem = Normalizer::new(Mode::Problem, &m).normalize(&record, 1);
        assert_eq!(
            problem.sections[2].body,
            SectionBody::HtmlFragment { html: "She <u>really</u> (_____) it.".into() }
        );
        let answer = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        assert_eq!(
            answer.sections[2].body,
            SectionBody::HtmlFragment { html: "She <u>really</u> <ins>liked</ins> it.".into() }
        );
    }

    #[test]
    fn blank_with_options_fills_from_correct_option() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(
            4,
            json!({
                "blankedText": "Rome (___).",
                "options": ["was not built in a day", "fell"],
                "answer": 1
            }),
        );
        let answer = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        assert_eq!(
            answer.sections[2].body,
            SectionBody::HtmlFragment { html: "Rome <ins>was not built in a day</ins>.".into() }
        );
        assert_eq!(answer.sections[3].kind(), SectionKind::OptionList);
        assert_eq!(
            answer.sections[4].body,
            SectionBody::AnswerBlock { items: vec!["①".into()], description: None }
        );
    }

    #[test]
    fn summary_rows_become_choice_table() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(
            10,
            json!({
                "passage": "p",
                "summary": "s (A) t (B)",
                "rows": [["fast", "slow"], ["big", "small"]],
                "answer": 2
            }),
        );
        let item = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        let SectionBody::Table { headers, rows } = &item.sections[4].body else {
            panic!("expected table");
        };
        assert_eq!(headers.as_ref().map(Vec::len), Some(3));
        assert_eq!(rows[1], vec!["②".to_string(), "big".into(), "small".into()]);
        assert_eq!(item.sections[5].kind(), SectionKind::AnswerBlock);
    }

    #[test]
    fn unscramble_reserves_writing_room() {
        let m = LayoutMetrics::default();
        let record = RawRecord::new(
            11,
            json!({"prompt": "나는 사과를 좋아한다.", "words": ["I", "apples", "like"], "answer": "I like apples."}),
        );
        let problem = Normalizer::new(Mode::Problem, &m).normalize(&record, 1);
        assert_eq!(problem.sections.last().map(Section::kind), Some(SectionKind::Spacer));
        let answer = Normalizer::new(Mode::Answer, &m).normalize(&record, 1);
        assert_eq!(
            answer.sections.last().map(|s| s.body.clone()),
            Some(SectionBody::AnswerBlock { items: vec!["I like apples.".into()], description: None })
        );
    }

    #[test]
    fn renormalize_respects_chunk_meta() {
        let m = LayoutMetrics::default();
        let n = Normalizer::new(Mode::Answer, &m);
        let first = n.renormalize(&topic_record(), 1, &ChunkMeta::for_chunk(0, 2));
        assert!(first.sections.iter().any(|s| s.kind() == SectionKind::Instruction));
        assert!(!first
            .sections
            .iter()
            .any(|s| matches!(s.kind(), SectionKind::OptionList | SectionKind::Translation)));
        assert_eq!(first.chunk_meta, Some(ChunkMeta::for_chunk(0, 2)));

        let last = n.renormalize(&topic_record(), 1, &ChunkMeta::for_chunk(1, 2));
        assert_eq!(last.sections[0].kind(), SectionKind::Title);
        assert!(!last.sections.iter().any(|s| s.kind() == SectionKind::Instruction));
        assert!(last.sections.iter().any(|s| s.kind() == SectionKind::Translation));
    }

    #[test]
    fn normalization_is_idempotent() {
        let m = LayoutMetrics::default();
        for mode in [Mode::Problem, Mode::Answer] {
            let n = Normalizer::new(mode, &m);
            assert_eq!(n.normalize(&topic_record(), 1), n.normalize(&topic_record(), 1));
        }
    }
}
