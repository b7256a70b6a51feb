//! Content store: the JSON list of paper records.
//!
//! The store is read once per command. Records are never mutated; renderers
//! work from a `PaperView`, the defaulted projection of one record.

use crate::config::SiteConfig;
use crate::date::{Clock, NormalizedDate, normalize_date};
use crate::error::SiteError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_CATEGORY: &str = "Research";

/// One entry of the content store's `papers` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<String>,
}

impl PaperRecord {
    /// The identifier, when present and non-empty.
    pub fn filename(&self) -> Option<&str> {
        non_empty(self.filename.as_deref())
    }

    /// Title shown in reports: the display name, else the filename.
    pub fn label(&self) -> &str {
        non_empty(self.display_name.as_deref())
            .or_else(|| self.filename())
            .unwrap_or("<unnamed>")
    }

    /// Compact JSON of the record, for skip diagnostics.
    pub fn summary(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// The parsed content store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    pub papers: Vec<PaperRecord>,
}

impl ContentStore {
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, SiteError> {
        serde_json::from_str(text).map_err(|source| SiteError::ContentParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse the store at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&text, path)?;
        log::info!(
            "event=content_loaded module=content path={} papers={}",
            path.display(),
            store.papers.len()
        );
        Ok(store)
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Filenames carried by more than one record, in first-seen order.
    ///
    /// Uniqueness is not enforced: the last record wins on disk.
    pub fn duplicate_filenames(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut order = Vec::new();
        for filename in self.papers.iter().filter_map(PaperRecord::filename) {
            let count = counts.entry(filename).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(filename.to_string());
            }
        }
        order
    }
}

/// A record with its defaults applied, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperView<'a> {
    pub filename: &'a str,
    pub display_name: &'a str,
    pub category: &'a str,
    pub keywords: String,
    /// Description, or the category-derived fallback.
    pub description: String,
    pub slides: Option<&'a str>,
    /// Raw record date, when present and non-empty.
    pub raw_date: Option<&'a str>,
    pub date: NormalizedDate,
    pub page_url: String,
    pub pdf_url: String,
}

impl<'a> PaperView<'a> {
    /// Project `record`; `None` when it has no filename.
    pub fn from_record(
        record: &'a PaperRecord,
        config: &SiteConfig,
        clock: &dyn Clock,
    ) -> Option<Self> {
        let filename = record.filename()?;
        let display_name = non_empty(record.display_name.as_deref()).unwrap_or(filename);
        let category = non_empty(record.category.as_deref()).unwrap_or(DEFAULT_CATEGORY);
        let keywords = match non_empty(record.keywords.as_deref()) {
            Some(keywords) => keywords.to_string(),
            None => format!("{}, {}", config.default_keyword, title_case(category)),
        };
        let description = non_empty(record.description.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Research paper on {category}"));
        let raw_date = non_empty(record.date.as_deref());

        Some(Self {
            filename,
            display_name,
            category,
            keywords,
            description,
            slides: non_empty(record.slides.as_deref()),
            raw_date,
            date: normalize_date(raw_date, clock),
            page_url: config.page_url(filename),
            pdf_url: config.pdf_url(filename),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("word regex must compile"))
}

/// Uppercase the first character of each word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    word_re()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = first.to_uppercase().collect::<String>();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .into_owned()
}
