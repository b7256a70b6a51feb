//! Generation passes: render pages and the sitemap and write them to disk.
//!
//! Every run rewrites all outputs in full.

use crate::config::{SiteConfig, SiteLayout};
use crate::content::{ContentStore, PaperRecord, PaperView};
use crate::date::Clock;
use crate::error::SiteError;
use crate::page::render_landing_page;
use crate::sitemap::{SitemapEntry, paper_entries, render_sitemap_entries, sort_newest_first};
use std::fs;
use std::path::PathBuf;

/// A record left out because it has no filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub record: String,
}

/// A page that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageGenerationSummary {
    pub paper_count: usize,
    pub created_papers_dir: bool,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedRecord>,
    pub failed: Vec<FailedPage>,
    pub duplicates: Vec<String>,
}

impl PageGenerationSummary {
    pub fn error_count(&self) -> usize {
        self.skipped.len() + self.failed.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapSummary {
    pub paper_count: usize,
    /// `None` when there were no papers and nothing was written.
    pub path: Option<PathBuf>,
    /// Paper entries in content-store order, for the preview.
    pub entries: Vec<SitemapEntry>,
}

impl SitemapSummary {
    /// Landing-page plus PDF URLs written for papers.
    pub fn paper_url_count(&self) -> usize {
        self.entries.len() * 2
    }
}

fn write_page(
    record: &PaperRecord,
    layout: &SiteLayout,
    config: &SiteConfig,
    clock: &dyn Clock,
) -> Option<Result<PathBuf, FailedPage>> {
    let view = PaperView::from_record(record, config, clock)?;
    let path = layout.page_path(view.filename);
    let html = render_landing_page(&view, config);
    Some(match fs::write(&path, html) {
        Ok(()) => {
            log::debug!("event=page_written module=generate path={}", path.display());
            Ok(path)
        }
        Err(err) => Err(FailedPage {
            filename: view.filename.to_string(),
            message: err.to_string(),
        }),
    })
}

/// Render and write one landing page per record.
///
/// Fails only when the papers directory cannot be created; per-record
/// problems are collected in the summary.
pub fn generate_pages(
    store: &ContentStore,
    layout: &SiteLayout,
    config: &SiteConfig,
    clock: &dyn Clock,
) -> Result<PageGenerationSummary, SiteError> {
    let mut summary = PageGenerationSummary {
        paper_count: store.len(),
        ..PageGenerationSummary::default()
    };
    if store.is_empty() {
        log::info!("event=pages_skipped module=generate reason=no_papers");
        return Ok(summary);
    }

    if !layout.papers_dir.exists() {
        fs::create_dir_all(&layout.papers_dir).map_err(|source| SiteError::CreateDir {
            path: layout.papers_dir.clone(),
            source,
        })?;
        summary.created_papers_dir = true;
    }

    summary.duplicates = store.duplicate_filenames();
    for filename in &summary.duplicates {
        log::warn!("event=duplicate_filename module=generate filename={filename} policy=last_wins");
    }

    for (index, record) in store.papers.iter().enumerate() {
        match write_page(record, layout, config, clock) {
            None => {
                log::warn!("event=record_skipped module=generate index={index} reason=missing_filename");
                summary.skipped.push(SkippedRecord {
                    index,
                    record: record.summary(),
                });
            }
            Some(Ok(path)) => summary.written.push(path),
            Some(Err(failure)) => {
                log::error!(
                    "event=page_write_failed module=generate filename={} error={}",
                    failure.filename,
                    failure.message
                );
                summary.failed.push(failure);
            }
        }
    }

    log::info!(
        "event=pages_generated module=generate written={} skipped={} failed={}",
        summary.written.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Render and write the sitemap. A write failure is fatal.
pub fn update_sitemap(
    store: &ContentStore,
    layout: &SiteLayout,
    config: &SiteConfig,
    clock: &dyn Clock,
) -> Result<SitemapSummary, SiteError> {
    let mut summary = SitemapSummary {
        paper_count: store.len(),
        ..SitemapSummary::default()
    };
    if store.is_empty() {
        log::info!("event=sitemap_skipped module=generate reason=no_papers");
        return Ok(summary);
    }

    let entries = paper_entries(&store.papers, config, clock);
    let mut ordered = entries.clone();
    sort_newest_first(&mut ordered);
    let xml = render_sitemap_entries(&ordered, config, clock);
    if let Some(parent) = layout.sitemap_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| SiteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&layout.sitemap_path, xml).map_err(|source| SiteError::Write {
        path: layout.sitemap_path.clone(),
        source,
    })?;
    log::info!(
        "event=sitemap_written module=generate path={} entries={}",
        layout.sitemap_path.display(),
        entries.len()
    );

    summary.path = Some(layout.sitemap_path.clone());
    summary.entries = entries;
    Ok(summary)
}
