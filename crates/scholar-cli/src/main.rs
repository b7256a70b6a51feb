//! Scholar CLI: the `scholar` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let _logger = support::init_logging_or_exit(&cli.log_level);
    let ctx = support::load_context_or_exit(&cli);

    match cli.command {
        Commands::GeneratePages => commands::generate_pages::run(&ctx),

        Commands::UpdateSitemap => commands::update_sitemap::run(&ctx),

        Commands::Validate { json } => commands::validate::run(&ctx, json),

        Commands::Deploy { no_stage } => commands::deploy::run(&ctx, no_stage),
    }
}
