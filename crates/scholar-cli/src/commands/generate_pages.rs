use crate::support::{
    SiteContext, banner, fail_exit, fail_line, heading, load_store_or_exit, ok_line, warn_line,
};
use scholar_site::{ContentStore, PageGenerationSummary, SiteError, generate_pages};

pub fn execute(ctx: &SiteContext, store: &ContentStore) -> Result<PageGenerationSummary, SiteError> {
    generate_pages(store, &ctx.layout, &ctx.config, ctx.clock())
}

pub fn print_summary(ctx: &SiteContext, summary: &PageGenerationSummary) {
    if summary.paper_count == 0 {
        warn_line(0, "No papers found in content store");
        return;
    }
    if summary.created_papers_dir {
        ok_line(0, format!("Created {}", ctx.relative(&ctx.layout.papers_dir)));
    }
    println!("Found {} paper(s) in content store\n", summary.paper_count);

    for skipped in &summary.skipped {
        warn_line(
            0,
            format!(
                "Skipping paper #{} without filename: {}",
                skipped.index + 1,
                skipped.record
            ),
        );
    }
    for path in &summary.written {
        ok_line(0, format!("Generated: {}", ctx.relative(path)));
    }
    for failure in &summary.failed {
        fail_line(
            0,
            format!("Error generating {}.html: {}", failure.filename, failure.message),
        );
    }
    for filename in &summary.duplicates {
        warn_line(
            0,
            format!("Duplicate filename `{filename}`: later records overwrite earlier pages"),
        );
    }

    println!();
    banner("Summary:");
    ok_line(3, format!("Success: {}", summary.written.len()));
    if summary.error_count() > 0 {
        fail_line(3, format!("Errors: {}", summary.error_count()));
    }
}

pub fn run(ctx: &SiteContext) {
    heading("Generating paper landing pages from content store...\n");
    let store = load_store_or_exit(ctx);
    let summary = execute(ctx, &store).unwrap_or_else(|e| fail_exit(e));
    print_summary(ctx, &summary);
}
