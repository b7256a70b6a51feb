//! Site configuration and on-disk layout.
//!
//! `SiteConfig` carries the identity baked into every generated page (base
//! URL, author, institution, license) plus the compliance thresholds. It is
//! read from an optional `scholar.toml`; every field has a default so a bare
//! site root works without one.
//!
//! `SiteLayout` resolves the fixed relative paths (content store, papers,
//! PDFs, sitemap, robots) against a site root.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "scholar.toml";
pub const CONTENT_STORE_PATH: &str = "config/content.json";
pub const PAPERS_DIR: &str = "papers";
pub const PDFS_DIR: &str = "pdfs";
pub const SITEMAP_PATH: &str = "sitemap.xml";
pub const ROBOTS_PATH: &str = "robots.txt";

/// Google Scholar's PDF size ceiling.
pub const DEFAULT_MAX_PDF_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_BASE_URL: &str = "https://www.unrulyabstractions.com";
const DEFAULT_IDENTITY: &str = "Unruly Abstractions";
const DEFAULT_TWITTER_CREATOR: &str = "@unrulyabstract";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_LICENSE_URL: &str = "https://creativecommons.org/licenses/by/4.0/";
const DEFAULT_KEYWORD: &str = "AI Safety";
const DEFAULT_CRAWLER: &str = "Googlebot-Scholar";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site URL without a trailing slash.
    pub base_url: String,
    pub site_name: String,
    pub author: String,
    pub institution: String,
    pub twitter_creator: String,
    pub language: String,
    pub license_url: String,
    /// Leading keyword used when a record has no `keywords`.
    pub default_keyword: String,
    /// Crawler that `robots.txt` must allow.
    pub crawler: String,
    pub max_pdf_bytes: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_IDENTITY.to_string(),
            author: DEFAULT_IDENTITY.to_string(),
            institution: DEFAULT_IDENTITY.to_string(),
            twitter_creator: DEFAULT_TWITTER_CREATOR.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            license_url: DEFAULT_LICENSE_URL.to_string(),
            default_keyword: DEFAULT_KEYWORD.to_string(),
            crawler: DEFAULT_CRAWLER.to_string(),
            max_pdf_bytes: DEFAULT_MAX_PDF_BYTES,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML document, filling unspecified fields with defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, SiteError> {
        let mut config: SiteConfig =
            toml::from_str(text).map_err(|source| SiteError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!(
                "event=config_default module=config path={}",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        log::info!(
            "event=config_loaded module=config path={} base_url={}",
            path.display(),
            config.base_url
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if self.base_url.is_empty() {
            return Err(SiteError::InvalidConfig("base_url cannot be empty".to_string()));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(SiteError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got `{}`",
                self.base_url
            )));
        }
        if self.crawler.trim().is_empty() {
            return Err(SiteError::InvalidConfig("crawler cannot be empty".to_string()));
        }
        if self.max_pdf_bytes == 0 {
            return Err(SiteError::InvalidConfig(
                "max_pdf_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page_url(&self, filename: &str) -> String {
        format!("{}/{PAPERS_DIR}/{filename}.html", self.base_url)
    }

    pub fn pdf_url(&self, filename: &str) -> String {
        format!("{}/{PDFS_DIR}/{filename}.pdf", self.base_url)
    }
}

/// Fixed relative paths resolved against one site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub root: PathBuf,
    pub content_path: PathBuf,
    pub papers_dir: PathBuf,
    pub pdfs_dir: PathBuf,
    pub sitemap_path: PathBuf,
    pub robots_path: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            content_path: root.join(CONTENT_STORE_PATH),
            papers_dir: root.join(PAPERS_DIR),
            pdfs_dir: root.join(PDFS_DIR),
            sitemap_path: root.join(SITEMAP_PATH),
            robots_path: root.join(ROBOTS_PATH),
            root,
        }
    }

    pub fn default_config_path(&self) -> PathBuf {
        self.root.join(DEFAULT_CONFIG_FILE)
    }

    pub fn page_path(&self, filename: &str) -> PathBuf {
        self.papers_dir.join(format!("{filename}.html"))
    }

    pub fn pdf_path(&self, filename: &str) -> PathBuf {
        self.pdfs_dir.join(format!("{filename}.pdf"))
    }

    /// Paths the deploy step stages, relative to the root.
    pub fn staged_paths() -> [&'static str; 3] {
        ["papers/", SITEMAP_PATH, CONTENT_STORE_PATH]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = SiteConfig::from_toml_str("", Path::new("scholar.toml"))
            .expect("empty config should parse");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.max_pdf_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn partial_toml_overrides_and_trims_base_url() {
        let config = SiteConfig::from_toml_str(
            "base_url = \"https://example.org/\"\nauthor = \"A. Researcher\"\n",
            Path::new("scholar.toml"),
        )
        .expect("partial config should parse");
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.author, "A. Researcher");
        assert_eq!(config.crawler, "Googlebot-Scholar");
        assert_eq!(config.page_url("p1"), "https://example.org/papers/p1.html");
        assert_eq!(config.pdf_url("p1"), "https://example.org/pdfs/p1.pdf");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SiteConfig::from_toml_str("colour = \"blue\"\n", Path::new("scholar.toml"))
            .expect_err("unknown key should fail");
        assert!(matches!(err, SiteError::ConfigParse { .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = SiteConfig::from_toml_str("base_url = \"ftp://x\"\n", Path::new("s.toml"))
            .expect_err("ftp base url should fail");
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let config = SiteConfig::load_or_default(dir.path().join("scholar.toml"))
            .expect("missing config should default");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn layout_resolves_fixed_paths() {
        let layout = SiteLayout::new("/site");
        assert_eq!(layout.content_path, PathBuf::from("/site/config/content.json"));
        assert_eq!(layout.page_path("p1"), PathBuf::from("/site/papers/p1.html"));
        assert_eq!(layout.pdf_path("p1"), PathBuf::from("/site/pdfs/p1.pdf"));
        assert_eq!(layout.robots_path, PathBuf::from("/site/robots.txt"));
    }
}
