//! Google Scholar compliance checks over generated pages, PDFs and robots.
//!
//! Severity model:
//! - critical: missing filename, missing landing page, missing required
//!   citation tag, robots file not allowing the crawler;
//! - warning: PDF missing or larger than the size ceiling;
//! - advisory: recommended citation tag missing.
//!
//! Only critical findings reject the run.

use crate::config::{SiteConfig, SiteLayout};
use crate::content::PaperRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const COMPLIANCE_CHECK_KIND: &str = "scholar.compliance.check.v1";

pub const REQUIRED_TAGS: [(&str, &str); 3] = [
    ("citation_title", "Title"),
    ("citation_author", "Author"),
    ("citation_publication_date", "Publication Date"),
];

pub const RECOMMENDED_TAGS: [(&str, &str); 6] = [
    ("citation_pdf_url", "PDF URL"),
    ("citation_abstract_html_url", "Abstract URL"),
    ("citation_online_date", "Online Date"),
    ("citation_language", "Language"),
    ("citation_keywords", "Keywords"),
    ("citation_technical_report_institution", "Institution"),
];

const ROBOTS_ALLOW_ALL: &str = "Allow: /";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagCheck {
    pub tag: String,
    pub label: String,
    /// Content of the first matching tag; `None` when absent.
    pub value: Option<String>,
}

impl TagCheck {
    pub fn present(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageCheck {
    pub path: PathBuf,
    pub found: bool,
    pub required: Vec<TagCheck>,
    pub recommended: Vec<TagCheck>,
}

impl LandingPageCheck {
    pub fn passes(&self) -> bool {
        self.found && self.required.iter().all(TagCheck::present)
    }

    pub fn missing_recommended(&self) -> usize {
        self.recommended.iter().filter(|tag| !tag.present()).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PdfCheck {
    Missing { path: PathBuf },
    WithinLimit { path: PathBuf, bytes: u64 },
    Oversize { path: PathBuf, bytes: u64 },
}

impl PdfCheck {
    pub fn passes(&self) -> bool {
        matches!(self, PdfCheck::WithinLimit { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            PdfCheck::Missing { path }
            | PdfCheck::WithinLimit { path, .. }
            | PdfCheck::Oversize { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaperCompliance {
    pub filename: Option<String>,
    pub display_name: String,
    /// `None` when the record has no filename.
    pub landing_page: Option<LandingPageCheck>,
    pub pdf: Option<PdfCheck>,
}

impl PaperCompliance {
    pub fn critical(&self) -> bool {
        !self
            .landing_page
            .as_ref()
            .is_some_and(LandingPageCheck::passes)
    }

    pub fn warning(&self) -> bool {
        self.pdf.as_ref().is_some_and(|pdf| !pdf.passes())
    }

    pub fn advisories(&self) -> usize {
        self.landing_page
            .as_ref()
            .map_or(0, LandingPageCheck::missing_recommended)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotsCheck {
    pub path: PathBuf,
    pub crawler: String,
    pub found: bool,
    pub allows_crawler: bool,
}

impl RobotsCheck {
    pub fn passes(&self) -> bool {
        self.found && self.allows_crawler
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub paper_count: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub advisory_count: usize,
    pub max_pdf_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub check_kind: String,
    pub result: String,
    pub papers: Vec<PaperCompliance>,
    pub robots: RobotsCheck,
    pub summary: ComplianceSummary,
}

impl ComplianceReport {
    pub fn accepted(&self) -> bool {
        self.result == "accepted"
    }
}

fn tag_patterns() -> &'static Vec<(&'static str, Regex)> {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        REQUIRED_TAGS
            .iter()
            .chain(RECOMMENDED_TAGS.iter())
            .map(|(tag, _)| {
                let pattern = format!(
                    r#"(?i)<meta name="{}" content="([^"]+)""#,
                    regex::escape(tag)
                );
                (
                    *tag,
                    Regex::new(&pattern).expect("meta tag regex must compile"),
                )
            })
            .collect()
    })
}

/// Content of the `<meta name="{tag}">` element in `html`, if any.
pub fn find_meta_content(html: &str, tag: &str) -> Option<String> {
    tag_patterns()
        .iter()
        .find(|(name, _)| *name == tag)
        .and_then(|(_, re)| re.captures(html))
        .map(|caps| caps[1].to_string())
}

fn check_tags(html: &str, tags: &[(&str, &str)]) -> Vec<TagCheck> {
    tags.iter()
        .map(|(tag, label)| TagCheck {
            tag: tag.to_string(),
            label: label.to_string(),
            value: find_meta_content(html, tag),
        })
        .collect()
}

/// Check required and recommended citation tags in a page's markup.
pub fn check_landing_page_html(html: &str, path: &Path) -> LandingPageCheck {
    LandingPageCheck {
        path: path.to_path_buf(),
        found: true,
        required: check_tags(html, &REQUIRED_TAGS),
        recommended: check_tags(html, &RECOMMENDED_TAGS),
    }
}

/// Check the landing page at `path`. An unreadable page counts as missing.
pub fn check_landing_page(path: &Path) -> LandingPageCheck {
    match fs::read_to_string(path) {
        Ok(html) => check_landing_page_html(&html, path),
        Err(err) => {
            log::debug!(
                "event=page_unreadable module=compliance path={} error={err}",
                path.display()
            );
            LandingPageCheck {
                path: path.to_path_buf(),
                found: false,
                required: Vec::new(),
                recommended: Vec::new(),
            }
        }
    }
}

/// Check that `path` exists and is no larger than `max_bytes`.
pub fn check_pdf(path: &Path, max_bytes: u64) -> PdfCheck {
    let path = path.to_path_buf();
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {
            let bytes = meta.len();
            if bytes > max_bytes {
                PdfCheck::Oversize { path, bytes }
            } else {
                PdfCheck::WithinLimit { path, bytes }
            }
        }
        _ => PdfCheck::Missing { path },
    }
}

/// Whether robots text names `crawler` and allows the site root.
pub fn robots_allows(text: &str, crawler: &str) -> bool {
    text.contains(crawler) && text.contains(ROBOTS_ALLOW_ALL)
}

pub fn check_robots(path: &Path, crawler: &str) -> RobotsCheck {
    let (found, allows_crawler) = match fs::read_to_string(path) {
        Ok(text) => (true, robots_allows(&text, crawler)),
        Err(_) => (false, false),
    };
    RobotsCheck {
        path: path.to_path_buf(),
        crawler: crawler.to_string(),
        found,
        allows_crawler,
    }
}

/// Check one record's page and PDF.
pub fn check_paper(record: &PaperRecord, layout: &SiteLayout, config: &SiteConfig) -> PaperCompliance {
    let display_name = record.label().to_string();
    match record.filename() {
        Some(filename) => PaperCompliance {
            filename: Some(filename.to_string()),
            display_name,
            landing_page: Some(check_landing_page(&layout.page_path(filename))),
            pdf: Some(check_pdf(&layout.pdf_path(filename), config.max_pdf_bytes)),
        },
        None => PaperCompliance {
            filename: None,
            display_name,
            landing_page: None,
            pdf: None,
        },
    }
}

/// Validate every record plus the robots file.
pub fn check_site(
    records: &[PaperRecord],
    layout: &SiteLayout,
    config: &SiteConfig,
) -> ComplianceReport {
    let papers: Vec<PaperCompliance> = records
        .iter()
        .map(|record| check_paper(record, layout, config))
        .collect();
    let robots = check_robots(&layout.robots_path, &config.crawler);

    let critical_count = papers.iter().filter(|paper| paper.critical()).count()
        + usize::from(!robots.passes());
    let warning_count = papers.iter().filter(|paper| paper.warning()).count();
    let advisory_count = papers.iter().map(PaperCompliance::advisories).sum();
    let result = if critical_count == 0 {
        "accepted"
    } else {
        "rejected"
    };

    log::info!(
        "event=compliance_checked module=compliance papers={} critical={} warnings={} advisories={}",
        papers.len(),
        critical_count,
        warning_count,
        advisory_count
    );

    ComplianceReport {
        check_kind: COMPLIANCE_CHECK_KIND.to_string(),
        result: result.to_string(),
        summary: ComplianceSummary {
            paper_count: papers.len(),
            critical_count,
            warning_count,
            advisory_count,
            max_pdf_bytes: config.max_pdf_bytes,
        },
        papers,
        robots,
    }
}
