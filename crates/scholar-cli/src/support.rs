use crate::cli::Cli;
use chrono::NaiveDate;
use console::style;
use flexi_logger::{Logger, LoggerHandle};
use scholar_site::{Clock, ContentStore, FixedClock, SiteConfig, SiteLayout, SystemClock};
use std::fmt::Display;
use std::path::{Path, PathBuf};

const MIB: f64 = 1024.0 * 1024.0;
pub const RULE: &str = "─────────────────────────────────────────────────────";

/// Everything a command needs besides the content store.
pub struct SiteContext {
    pub layout: SiteLayout,
    pub config: SiteConfig,
    pub clock: Box<dyn Clock>,
}

impl SiteContext {
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// `path` relative to the site root, for display.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.layout.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

pub fn fail_exit(message: impl Display) -> ! {
    eprintln!("{} {message}", style("error:").red().bold());
    std::process::exit(1);
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

/// Start stderr logging. `RUST_LOG` takes precedence over `level`.
pub fn init_logging_or_exit(level: &str) -> LoggerHandle {
    let spec = normalize_level(level).unwrap_or_else(|e| fail_exit(e));
    Logger::try_with_env_or_str(spec)
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
        })
        .unwrap_or_else(|e| fail_exit(format!("failed to start logger: {e}")))
}

pub fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid --today `{raw}` (expected YYYY-MM-DD): {e}"))
}

pub fn load_context_or_exit(cli: &Cli) -> SiteContext {
    let layout = SiteLayout::new(&cli.root);
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| layout.default_config_path());
    if cli.config.is_some() && !config_path.exists() {
        fail_exit(format!("site config not found: {}", config_path.display()));
    }
    let config = SiteConfig::load_or_default(&config_path).unwrap_or_else(|e| fail_exit(e));

    let clock: Box<dyn Clock> = match cli.today.as_deref() {
        Some(raw) => Box::new(FixedClock(parse_today(raw).unwrap_or_else(|e| fail_exit(e)))),
        None => Box::new(SystemClock),
    };

    SiteContext {
        layout,
        config,
        clock,
    }
}

pub fn load_store_or_exit(ctx: &SiteContext) -> ContentStore {
    ContentStore::load(&ctx.layout.content_path).unwrap_or_else(|e| fail_exit(e))
}

pub fn heading(text: impl Display) {
    println!("{}", style(text).cyan().bold());
}

pub fn banner(text: impl Display) {
    println!("{}", style(text).blue().bold());
}

pub fn ok_line(indent: usize, text: impl Display) {
    println!("{:indent$}{} {text}", "", style("✓").green());
}

pub fn fail_line(indent: usize, text: impl Display) {
    println!("{:indent$}{} {}", "", style("✗").red(), style(text).red());
}

pub fn warn_line(indent: usize, text: impl Display) {
    println!("{:indent$}{} {}", "", style("!").yellow(), style(text).yellow());
}

/// Bytes as mebibytes with two decimals.
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB)
}

/// A byte ceiling as whole mebibytes when exact, else two decimals.
pub fn format_limit(bytes: u64) -> String {
    if bytes % (1024 * 1024) == 0 {
        (bytes / (1024 * 1024)).to_string()
    } else {
        format_mib(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").expect("INFO should normalize"), "info");
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn parse_today_requires_iso_dates() {
        assert_eq!(
            parse_today("2024-03-05").expect("iso date should parse"),
            NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
        );
        assert!(parse_today("March 5").is_err());
    }

    #[test]
    fn sizes_render_in_mebibytes() {
        assert_eq!(format_mib(5 * 1024 * 1024), "5.00");
        assert_eq!(format_mib(1024 * 1024 + 512 * 1024), "1.50");
        assert_eq!(format_limit(5 * 1024 * 1024), "5");
        assert_eq!(format_limit(1536 * 1024), "1.50");
    }
}
