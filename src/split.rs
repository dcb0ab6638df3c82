//! Chunk splitting – cuts one question into column-sized fragments.
//!
//! Handles:
//! - Repeating the title at the top of every fragment
//! - Keeping the instruction on the first fragment only
//! - Keeping options, answer and translation together on the last fragment
//! - Oversized sections (placed alone, never dropped)

use log::{debug, warn};

use crate::estimate::estimate_section;
use crate::metrics::LayoutMetrics;
use crate::section::{ChunkMeta, NormalizedItem, Section, SectionKind};

/// Marker between a title key and its continuation number.
const CONTINUATION_SEP: &str = "~c";

/// A fragment under construction.
struct Draft {
    sections: Vec<Section>,
    height: f32,
    has_content: bool,
}

impl Draft {
    fn open(title: Option<&Section>, index: usize, metrics: &LayoutMetrics) -> Self {
        let mut draft = Draft {
            sections: Vec::new(),
            height: 0.0,
            has_content: false,
        };
        if let Some(title) = title {
            let title = if index == 0 {
                title.clone()
            } else {
                title.rekeyed(format!(
                    "{}{CONTINUATION_SEP}{index}",
                    base_key(&title.key)
                ))
            };
            draft.height += estimate_section(&title, metrics);
            draft.sections.push(title);
        }
        draft
    }

    fn push(&mut self, section: Section, height: f32) {
        self.has_content |= section.kind().is_content();
        self.height += height;
        self.sections.push(section);
    }
}

/// Strip a continuation suffix so re-splitting yields the same keys.
fn base_key(key: &str) -> &str {
    match key.rsplit_once(CONTINUATION_SEP) {
        Some((base, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => base,
        _ => key,
    }
}

/// Options, choice tables, answers and translations. They trail the body and
/// only ever appear on an item's last chunk.
fn is_tail(kind: SectionKind) -> bool {
    matches!(
        kind,
        SectionKind::OptionList
            | SectionKind::Table
            | SectionKind::AnswerBlock
            | SectionKind::Translation
    )
}

/// Split `item` into fragments that each fit `metrics.column_capacity`,
/// except fragments holding a single oversized section or an oversized tail.
///
/// The tail (see [`is_tail`]) is never divided: it lands whole on the last
/// fragment, so the [`ChunkMeta`] flags of every fragment describe what it
/// actually holds. Always returns at least one fragment.
pub fn split(item: &NormalizedItem, metrics: &LayoutMetrics) -> Vec<NormalizedItem> {
    let capacity = metrics.column_capacity;
    let title = item.title();
    let body = &item.sections[usize::from(title.is_some())..];
    let tail_height: f32 = body
        .iter()
        .filter(|s| is_tail(s.kind()))
        .map(|s| estimate_section(s, metrics))
        .sum();

    let mut closed: Vec<Vec<Section>> = Vec::new();
    let mut current: Option<Draft> = None;
    let mut in_tail = false;

    for section in body {
        let kind = section.kind();
        if kind == SectionKind::Instruction && !closed.is_empty() {
            continue;
        }
        let height = estimate_section(section, metrics);
        // The first tail section reserves room for the whole tail.
        let needed = if is_tail(kind) { tail_height } else { height };

        let mut draft = current
            .take()
            .unwrap_or_else(|| Draft::open(title, closed.len(), metrics));
        if !in_tail && draft.height + needed > capacity && draft.has_content {
            closed.push(draft.sections);
            draft = Draft::open(title, closed.len(), metrics);
        }
        if kind == SectionKind::Instruction && !closed.is_empty() {
            current = Some(draft);
            continue;
        }
        in_tail |= is_tail(kind);

        draft.push(section.clone(), height);
        if !in_tail && draft.height > capacity {
            warn!(
                "section {} ({height:.0} units) overflows column capacity {capacity:.0}",
                section.key
            );
            closed.push(draft.sections);
        } else {
            current = Some(draft);
        }
    }

    if let Some(draft) = current {
        if in_tail && draft.height > capacity {
            warn!(
                "tail of {} ({tail_height:.0} units) overflows column capacity {capacity:.0}",
                item.key
            );
        }
        closed.push(draft.sections);
    }
    if closed.is_empty() {
        closed.push(Draft::open(title, 0, metrics).sections);
    }

    let total = closed.len();
    if total > 1 {
        debug!("split {} into {total} chunks", item.key);
    }
    closed
        .into_iter()
        .enumerate()
        .map(|(i, sections)| NormalizedItem {
            work_type_id: item.work_type_id,
            key: item.key.clone(),
            sections,
            chunk_meta: Some(ChunkMeta::for_chunk(i, total)),
        })
        .collect()
}

/// Split every item, flattening the fragments in order.
pub fn split_all(items: &[NormalizedItem], metrics: &LayoutMetrics) -> Vec<NormalizedItem> {
    items.iter().flat_map(|item| split(item, metrics)).collect()
}
