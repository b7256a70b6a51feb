use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scholar",
    about = "Scholar: landing pages, sitemap and Google Scholar compliance for a paper archive",
    version
)]
pub struct Cli {
    /// Site root containing config/content.json, papers/, pdfs/ and robots.txt
    #[arg(long, global = true, default_value = ".")]
    pub root: String,

    /// Site config TOML (defaults to <root>/scholar.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Pin "today" (YYYY-MM-DD) for fallback dates and sitemap lastmod
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Log level for stderr diagnostics: trace|debug|info|warn|error|off
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one landing page per paper under papers/
    GeneratePages,

    /// Rewrite sitemap.xml from the content store
    UpdateSitemap,

    /// Check pages, PDFs and robots.txt against Google Scholar requirements
    Validate {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate pages and sitemap, validate, then stage outputs with git
    Deploy {
        /// Skip `git add` and `git status`
        #[arg(long)]
        no_stage: bool,
    },
}
