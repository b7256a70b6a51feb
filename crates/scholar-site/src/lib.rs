//! # scholar-site
//!
//! Content pipeline for a paper archive:
//! - `ContentStore` / `PaperRecord` (the JSON list of papers)
//! - date normalization against an injectable `Clock`
//! - landing-page and sitemap renderers (pure, string in / string out)
//! - Google Scholar compliance checks over the generated site
//! - generation passes that write pages and the sitemap
//!
//! Version control lives in `scholar-git`; console reporting in the CLI.
//!
//! ## Data flow
//!
//! ```text
//! config/content.json
//!     │  ContentStore::load
//! PaperRecord ──► PaperView ──► render_landing_page ──► papers/{f}.html
//!     │                     └─► render_sitemap      ──► sitemap.xml
//!     └──────────────────────────► check_site (pages, pdfs/, robots.txt)
//! ```

pub mod compliance;
pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod generate;
pub mod markup;
pub mod page;
pub mod sitemap;

pub use compliance::{
    COMPLIANCE_CHECK_KIND, ComplianceReport, ComplianceSummary, LandingPageCheck,
    PaperCompliance, PdfCheck, RECOMMENDED_TAGS, REQUIRED_TAGS, RobotsCheck, TagCheck,
    check_site,
};
pub use config::{DEFAULT_MAX_PDF_BYTES, SiteConfig, SiteLayout};
pub use content::{ContentStore, PaperRecord, PaperView};
pub use date::{Clock, DateKind, FixedClock, NormalizedDate, SystemClock, normalize_date};
pub use error::SiteError;
pub use generate::{
    FailedPage, PageGenerationSummary, SitemapSummary, SkippedRecord, generate_pages,
    update_sitemap,
};
pub use page::render_landing_page;
pub use sitemap::{SitemapEntry, render_sitemap};
