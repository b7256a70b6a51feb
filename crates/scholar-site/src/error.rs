//! Error types for site generation and validation.

use std::path::PathBuf;

/// Fatal errors: the invoking command cannot continue.
///
/// Per-record problems (missing filename, a single page failing to write)
/// are not errors at this level; the generation passes count them in their
/// summaries instead.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content store {}: {source}", path.display())]
    ContentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse site config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid site config: {0}")]
    InvalidConfig(String),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
