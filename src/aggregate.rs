//! Trailing-translation pass for composite sessions.
//!
//! A composite session prints one translation, that of its last question,
//! after everything else has been packed. This runs on finished pages and
//! leaves the packer untouched.

use log::debug;

use crate::estimate::estimate_item;
use crate::metrics::LayoutMetrics;
use crate::pack::column_heights;
use crate::section::{ChunkMeta, NormalizedItem, Page, Section};

/// Append `trailing` after packing.
///
/// `anchor` is the session's last placed chunk. If it sits on the last page,
/// `trailing` goes to the bottom of the *other* column when it fits there;
/// in every other case it opens a new page in the left column.
pub fn append_trailing(
    mut pages: Vec<Page>,
    anchor: Option<&NormalizedItem>,
    trailing: NormalizedItem,
    metrics: &LayoutMetrics,
) -> Vec<Page> {
    let height = estimate_item(&trailing, metrics);

    let target = pages.last().and_then(|page| {
        let other = 1 - page.column_of(anchor?)?;
        let heights = column_heights(page, metrics);
        (heights[other] + height <= metrics.column_capacity).then_some(other)
    });

    if let (Some(column), Some(page)) = (target, pages.last_mut()) {
        debug!("trailing {} fits in column {column} of the last page", trailing.key);
        page.columns[column].push(trailing);
        return pages;
    }

    debug!("trailing {} starts page {}", trailing.key, pages.len() + 1);
    let mut page = Page::default();
    page.columns[0].push(trailing);
    pages.push(page);
    pages
}

/// Wrap a detached translation as a standalone, unsplit item.
pub fn trailing_item(
    work_type_id: u32,
    key: impl Into<String>,
    translation: Section,
) -> NormalizedItem {
    let mut item = NormalizedItem::new(work_type_id, key, vec![translation]);
    item.chunk_meta = Some(ChunkMeta::for_chunk(0, 1));
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack;
    use crate::section::SectionBody;

    fn chunk(key: &str, lines: u32) -> NormalizedItem {
        NormalizedItem::new(
            14,
            key,
            vec![Section::new(format!("{key}-s"), SectionBody::Spacer { lines })],
        )
    }

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            column_capacity: 100.0,
            line_height: 10.0,
            ..LayoutMetrics::default()
        }
    }

    #[test]
    fn goes_to_other_column_when_it_fits() {
        let m = metrics();
        // a -> L(50), b -> R(30): session ends in the right column.
        let pages = pack(vec![chunk("a", 5), chunk("b", 3)], &m);
        let anchor = pages[0].columns[1].items[0].clone();
        let pages = append_trailing(pages, Some(&anchor), chunk("tr", 4), &m);
        assert_eq!(pages.len(), 1);
        let left: Vec<&str> = pages[0].left().items.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(left, ["a", "tr"]);
    }

    #[test]
    fn new_page_when_other_column_is_full() {
        let m = metrics();
        let pages = pack(vec![chunk("a", 9), chunk("b", 3)], &m);
        let anchor = pages[0].columns[1].items[0].clone();
        let pages = append_trailing(pages, Some(&anchor), chunk("tr", 4), &m);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].left().items[0].key, "tr");
        assert!(pages[1].right().is_empty());
    }

    #[test]
    fn new_page_when_anchor_not_on_last_page() {
        let m = metrics();
        let pages = pack(vec![chunk("a", 9), chunk("b", 9), chunk("c", 2)], &m);
        assert_eq!(pages.len(), 2);
        let anchor = pages[0].columns[0].items[0].clone();
        let pages = append_trailing(pages, Some(&anchor), chunk("tr", 1), &m);
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn empty_document_gets_one_page() {
        let m = metrics();
        let pages = append_trailing(Vec::new(), None, chunk("tr", 1), &m);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].left().len(), 1);
    }
}
