use crate::support::{SiteContext, fail_exit, heading, load_store_or_exit, ok_line, warn_line};
use scholar_site::{ContentStore, SiteError, SitemapSummary, update_sitemap};

pub fn execute(ctx: &SiteContext, store: &ContentStore) -> Result<SitemapSummary, SiteError> {
    update_sitemap(store, &ctx.layout, &ctx.config, ctx.clock())
}

pub fn print_summary(ctx: &SiteContext, summary: &SitemapSummary) {
    let Some(path) = &summary.path else {
        warn_line(0, "No papers found in content store");
        return;
    };
    println!("Found {} paper(s)", summary.paper_count);
    ok_line(
        0,
        format!(
            "Updated {} with {} paper URLs\n",
            ctx.relative(path),
            summary.paper_url_count()
        ),
    );

    println!("Preview:");
    for entry in &summary.entries {
        println!("   - {}", entry.display_name);
        println!("     HTML: {}", entry.page_url);
        println!("     PDF:  {}", entry.pdf_url);
    }
}

pub fn run(ctx: &SiteContext) {
    heading("Updating sitemap from content store...\n");
    let store = load_store_or_exit(ctx);
    let summary = execute(ctx, &store).unwrap_or_else(|e| fail_exit(e));
    print_summary(ctx, &summary);
}
