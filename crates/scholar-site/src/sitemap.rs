//! Sitemap renderer.
//!
//! The sitemap lists three fixed site pages followed by one landing-page and
//! one PDF entry per paper, newest first.

use crate::config::SiteConfig;
use crate::content::{PaperRecord, PaperView};
use crate::date::{Clock, today_iso};
use crate::markup::escape;
use chrono::NaiveDate;
use std::fmt::Write as _;

const PAPER_PAGE_PRIORITY: &str = "0.9";
const PAPER_PDF_PRIORITY: &str = "0.7";

/// A fixed top-level page.
struct StaticPage {
    path: &'static str,
    comment: &'static str,
    changefreq: &'static str,
    priority: &'static str,
}

const STATIC_PAGES: [StaticPage; 3] = [
    StaticPage {
        path: "/",
        comment: "Homepage",
        changefreq: "weekly",
        priority: "1.0",
    },
    StaticPage {
        path: "/papers.html",
        comment: "Papers index",
        changefreq: "monthly",
        priority: "0.9",
    },
    StaticPage {
        path: "/notes.html",
        comment: "Research notes index",
        changefreq: "weekly",
        priority: "0.9",
    },
];

/// One paper's sitemap coordinates, as shown in the update preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub display_name: String,
    pub page_url: String,
    pub pdf_url: String,
    pub lastmod: String,
    /// Sort key; `None` for absent, sentinel or free-text dates.
    pub published: Option<NaiveDate>,
}

/// Papers with a filename, in content-store order.
pub fn paper_entries(
    records: &[PaperRecord],
    config: &SiteConfig,
    clock: &dyn Clock,
) -> Vec<SitemapEntry> {
    records
        .iter()
        .filter_map(|record| PaperView::from_record(record, config, clock))
        .map(|view| SitemapEntry {
            display_name: view.display_name.to_string(),
            page_url: view.page_url,
            pdf_url: view.pdf_url,
            published: view.date.parsed,
            lastmod: view.date.iso,
        })
        .collect()
}

/// Stable sort, newest first; undated entries keep their order at the end.
pub fn sort_newest_first(entries: &mut [SitemapEntry]) {
    entries.sort_by(|a, b| b.published.cmp(&a.published));
}

/// Papers with a filename, sorted newest first.
pub fn sorted_entries(
    records: &[PaperRecord],
    config: &SiteConfig,
    clock: &dyn Clock,
) -> Vec<SitemapEntry> {
    let mut entries = paper_entries(records, config, clock);
    sort_newest_first(&mut entries);
    entries
}

fn push_url(out: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    let _ = write!(
        out,
        "    <url>\n        <loc>{}</loc>\n        <lastmod>{}</lastmod>\n        <changefreq>{}</changefreq>\n        <priority>{}</priority>\n    </url>\n",
        escape(loc),
        escape(lastmod),
        changefreq,
        priority
    );
}

/// Render the full sitemap document from pre-sorted entries.
pub fn render_sitemap_entries(
    entries: &[SitemapEntry],
    config: &SiteConfig,
    clock: &dyn Clock,
) -> String {
    let today = today_iso(clock);
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
        http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">
"#,
    );

    for page in &STATIC_PAGES {
        let _ = writeln!(xml, "\n    <!-- {} -->", page.comment);
        push_url(
            &mut xml,
            &format!("{}{}", config.base_url, page.path),
            &today,
            page.changefreq,
            page.priority,
        );
    }

    xml.push_str("\n    <!-- Paper landing pages -->\n");
    for entry in entries {
        push_url(
            &mut xml,
            &entry.page_url,
            &entry.lastmod,
            "never",
            PAPER_PAGE_PRIORITY,
        );
    }

    xml.push_str("\n    <!-- Paper PDFs -->\n");
    for entry in entries {
        push_url(
            &mut xml,
            &entry.pdf_url,
            &entry.lastmod,
            "never",
            PAPER_PDF_PRIORITY,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render the sitemap for all `records`.
pub fn render_sitemap(records: &[PaperRecord], config: &SiteConfig, clock: &dyn Clock) -> String {
    let entries = sorted_entries(records, config, clock);
    render_sitemap_entries(&entries, config, clock)
}
