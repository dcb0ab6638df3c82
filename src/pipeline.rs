//! Pipeline – ties together normalization, splitting, packing and the
//! trailing-translation pass into a single function call.

use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{append_trailing, trailing_item};
use crate::error::{Error, Result};
use crate::metrics::LayoutMetrics;
use crate::normalize::{item_key, Normalizer, Visibility};
use crate::pack::pack;
use crate::record::RawRecord;
use crate::section::{Document, Mode, NormalizedItem, SectionKind};
use crate::split::split_all;
use crate::work_type::WorkType;

/// Everything one pagination run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    /// Document title passed through to the presentation layer.
    #[serde(default = "PrintJob::default_title")]
    pub title: String,
    #[serde(default)]
    pub mode: Mode,
    pub records: Vec<RawRecord>,
    /// Geometry overrides; missing fields take the defaults.
    #[serde(default)]
    pub metrics: LayoutMetrics,
}

impl PrintJob {
    pub fn new(records: Vec<RawRecord>, mode: Mode) -> Self {
        Self {
            title: Self::default_title(),
            mode,
            records,
            metrics: LayoutMetrics::default(),
        }
    }

    fn default_title() -> String {
        "worksheet".to_string()
    }

    /// Parse either a full job object or a bare array of records (problem
    /// mode, default metrics). Metrics are validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let job = match value {
            Value::Array(_) => Self::new(serde_json::from_value(value)?, Mode::Problem),
            Value::Object(_) => serde_json::from_value(value)?,
            other => {
                return Err(Error::InvalidInput(format!(
                    "expected a print job object or a record array, got {}",
                    json_type(&other)
                )))
            }
        };
        job.metrics.validate()?;
        Ok(job)
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A translation held back until after packing, and the item it follows.
struct Trailing {
    anchor_key: String,
    item: NormalizedItem,
}

/// Hands out item keys, suffixing repeats with the record position so two
/// questions never share a key.
#[derive(Default)]
struct KeyRegistry {
    seen: HashSet<String>,
}

impl KeyRegistry {
    fn claim(&mut self, record: &RawRecord, position: usize, parent: Option<&str>) -> String {
        let mut key = item_key(record, position, parent);
        while !self.seen.insert(key.clone()) {
            warn!("duplicate question key {key}; suffixing with position {position}");
            key = format!("{key}_{position}");
        }
        key
    }
}

/// Normalize every record, expanding composite sessions.
fn normalize_batch(
    records: &[RawRecord],
    normalizer: &Normalizer<'_>,
) -> (Vec<NormalizedItem>, Vec<Trailing>) {
    let mut items = Vec::with_capacity(records.len());
    let mut trailing = Vec::new();
    let mut keys = KeyRegistry::default();

    for (i, record) in records.iter().enumerate() {
        let position = i + 1;
        let key = keys.claim(record, position, None);
        let header = normalizer.normalize_keyed(record, position, key, Visibility::ALL);
        if WorkType::from_id(record.work_type_id) != Some(WorkType::Composite) {
            items.push(header);
            continue;
        }

        let session_key = header.key.clone();
        items.push(header);

        let subs = record.sub_records();
        let inline = Visibility {
            translation: false,
            ..Visibility::ALL
        };
        for (j, sub) in subs.iter().enumerate() {
            let last = j + 1 == subs.len();
            let visibility = if last { Visibility::ALL } else { inline };
            let sub_key = keys.claim(sub, j + 1, Some(&session_key));
            let mut item = normalizer.normalize_keyed(sub, j + 1, sub_key, visibility);
            if last && item.sections.last().map(|s| s.kind()) == Some(SectionKind::Translation) {
                if let Some(section) = item.sections.pop() {
                    trailing.push(Trailing {
                        anchor_key: item.key.clone(),
                        item: trailing_item(
                            WorkType::Composite.id(),
                            format!("{session_key}-translation"),
                            section,
                        ),
                    });
                }
            }
            items.push(item);
        }
    }
    (items, trailing)
}

/// Paginate `records` for one mode.
pub fn paginate(records: &[RawRecord], mode: Mode, metrics: &LayoutMetrics) -> Document {
    let normalizer = Normalizer::new(mode, metrics);
    let (items, trailing) = normalize_batch(records, &normalizer);

    let chunks = split_all(&items, metrics);
    let chunk_count = chunks.len();
    // Resolve each session's last chunk before the packer takes ownership.
    let anchored: Vec<(Option<NormalizedItem>, NormalizedItem)> = trailing
        .into_iter()
        .map(|t| {
            let anchor = chunks.iter().rev().find(|c| c.key == t.anchor_key).cloned();
            (anchor, t.item)
        })
        .collect();

    let mut pages = pack(chunks, metrics);
    for (anchor, item) in anchored {
        pages = append_trailing(pages, anchor.as_ref(), item, metrics);
    }

    info!(
        "paginated {} record(s) into {chunk_count} chunk(s) on {} page(s) ({:?} mode)",
        records.len(),
        pages.len(),
        mode
    );
    Document::new(mode, metrics.column_capacity, pages)
}

/// Paginate a full job, carrying its title into the document.
pub fn paginate_job(job: &PrintJob) -> Document {
    let mut document = paginate(&job.records, job.mode, &job.metrics);
    document.title = job.title.clone();
    document
}
