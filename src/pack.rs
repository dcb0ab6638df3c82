//! Page packing – places chunks into two-column pages.
//!
//! Greedy and single-pass: each chunk goes to the currently shorter column
//! of the open page, else the other column, else a fresh page. Input order
//! is preserved within each column. A chunk taller than a whole column is
//! still placed (on an empty column) and allowed to overflow.

use log::{debug, warn};

use crate::estimate::estimate_item;
use crate::metrics::LayoutMetrics;
use crate::section::{NormalizedItem, Page};

/// Accumulator threaded through the fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackState {
    /// Pages already closed.
    pub pages: Vec<Page>,
    /// The page being filled.
    pub current: Page,
    /// Accumulated estimated height of each column of `current`.
    pub heights: [f32; 2],
}

impl PackState {
    /// Place one chunk of the given estimated height, returning the next state.
    pub fn place(self, chunk: NormalizedItem, height: f32, capacity: f32) -> PackState {
        let PackState {
            mut pages,
            mut current,
            mut heights,
        } = self;

        let candidate = if heights[1] < heights[0] { 1 } else { 0 };
        let other = 1 - candidate;
        let target = if heights[candidate] + height <= capacity {
            Some(candidate)
        } else if heights[other] + height <= capacity {
            Some(other)
        } else {
            None
        };

        let column = match target {
            Some(column) => column,
            None => {
                if !current.is_empty() {
                    debug!("page {} full, opening a new page", pages.len() + 1);
                    pages.push(std::mem::take(&mut current));
                    heights = [0.0; 2];
                }
                if height > capacity {
                    warn!(
                        "chunk {} ({height:.0} units) overflows column capacity {capacity:.0}",
                        chunk.key
                    );
                }
                0
            }
        };

        heights[column] += height;
        current.columns[column].push(chunk);
        PackState {
            pages,
            current,
            heights,
        }
    }

    /// Close the open page (if it holds anything) and return every page.
    pub fn finish(self) -> Vec<Page> {
        let PackState {
            mut pages, current, ..
        } = self;
        if !current.is_empty() {
            pages.push(current);
        }
        pages
    }
}

/// Pack `chunks` in input order into pages of two columns.
///
/// Never returns an empty page; returns no pages for no chunks.
pub fn pack(chunks: Vec<NormalizedItem>, metrics: &LayoutMetrics) -> Vec<Page> {
    let capacity = metrics.column_capacity;
    chunks
        .into_iter()
        .fold(PackState::default(), |state, chunk| {
            let height = estimate_item(&chunk, metrics);
            state.place(chunk, height, capacity)
        })
        .finish()
}

/// Estimated height of each column of `page`.
pub fn column_heights(page: &Page, metrics: &LayoutMetrics) -> [f32; 2] {
    let height = |i: usize| {
        page.columns[i]
            .items
            .iter()
            .map(|item| estimate_item(item, metrics))
            .sum::<f32>()
    };
    [height(0), height(1)]
}
