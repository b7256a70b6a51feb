use crate::commands::{generate_pages, update_sitemap, validate};
use crate::support::{
    SiteContext, banner, fail_exit, heading, load_store_or_exit, ok_line, warn_line,
};
use scholar_git::{GitClient, GitError};
use scholar_site::SiteLayout;

const FRAME: &str = "════════════════════════════════════════════════════════════";

fn stage_outputs(ctx: &SiteContext) {
    let git = GitClient::new(&ctx.layout.root);

    heading("\nStaging files for commit...");
    match git.stage(&SiteLayout::staged_paths()) {
        Ok(()) => ok_line(0, format!("Files staged in {}", git.work_dir().display())),
        Err(GitError::NotARepository { path }) => {
            warn_line(
                0,
                format!("{} is not a git repository; nothing staged", path.display()),
            );
            return;
        }
        Err(e) => {
            log::warn!("event=stage_failed module=deploy error={e}");
            warn_line(0, "No changes staged");
        }
    }

    heading("\nGit status:");
    match git.status_short() {
        Ok(status) if status.trim().is_empty() => println!("  (clean)"),
        Ok(status) => print!("{status}"),
        Err(e) => log::debug!("event=status_failed module=deploy error={e}"),
    }
}

/// Run every step in order. Generation failures abort with exit 1; a
/// rejected validation is reported but still stages the outputs.
pub fn run(ctx: &SiteContext, no_stage: bool) {
    banner(format!("\n{FRAME}\n  DEPLOYMENT BUILD\n{FRAME}"));

    let store = load_store_or_exit(ctx);

    heading("\nStep 1/3: Generating paper landing pages...");
    let pages = generate_pages::execute(ctx, &store)
        .unwrap_or_else(|e| fail_exit(format!("page generation failed: {e}")));
    generate_pages::print_summary(ctx, &pages);

    heading("\nStep 2/3: Updating sitemap...");
    let sitemap = update_sitemap::execute(ctx, &store)
        .unwrap_or_else(|e| fail_exit(format!("sitemap update failed: {e}")));
    update_sitemap::print_summary(ctx, &sitemap);

    heading("\nStep 3/3: Validating Google Scholar compliance");
    let validation_passed = validate::report(ctx, &store, false);

    if no_stage {
        heading("\nSkipping git staging (--no-stage)");
    } else {
        stage_outputs(ctx);
    }

    banner(format!("\n{FRAME}\n  DEPLOYMENT COMPLETE\n{FRAME}"));
    if !validation_passed {
        warn_line(0, "WARNING: Validation found issues. Review output above.");
        warn_line(
            0,
            "You can still commit, but fix issues for optimal Google Scholar indexing.",
        );
    }

    heading("\nNext steps:");
    println!("  1. Review the changes above");
    println!("  2. Commit: git commit -m \"Your message\"");
    println!("  3. Push: git push");
    println!();
}
