use crate::support::{
    RULE, SiteContext, banner, fail_exit, fail_line, format_limit, format_mib, heading,
    load_store_or_exit, ok_line, warn_line,
};
use scholar_site::{
    COMPLIANCE_CHECK_KIND, ComplianceReport, ContentStore, PaperCompliance, PdfCheck, RobotsCheck,
    TagCheck, check_site,
};
use serde_json::json;

/// `None` when the store has no papers and nothing was checked.
pub fn execute(ctx: &SiteContext, store: &ContentStore) -> Option<ComplianceReport> {
    if store.is_empty() {
        return None;
    }
    Some(check_site(&store.papers, &ctx.layout, &ctx.config))
}

fn print_tags(tags: &[TagCheck], required: bool) {
    for tag in tags {
        match (&tag.value, required) {
            (Some(value), _) => ok_line(4, format!("{}: {value}", tag.label)),
            (None, true) => fail_line(4, format!("{}: MISSING", tag.label)),
            (None, false) => warn_line(4, format!("{}: not present (optional)", tag.label)),
        }
    }
}

fn print_pdf(ctx: &SiteContext, pdf: &PdfCheck) {
    let limit = format_limit(ctx.config.max_pdf_bytes);
    match pdf {
        PdfCheck::WithinLimit { bytes, .. } => {
            ok_line(2, format!("PDF size: {} MB (within limits)", format_mib(*bytes)));
        }
        PdfCheck::Oversize { path, bytes } => {
            warn_line(
                2,
                format!(
                    "PDF size: {} MB (exceeds {limit} MB Google Scholar limit)",
                    format_mib(*bytes)
                ),
            );
            warn_line(2, format!("Consider compressing: {}", ctx.relative(path)));
        }
        PdfCheck::Missing { path } => {
            warn_line(2, format!("PDF file not found: {}", ctx.relative(path)));
        }
    }
}

fn print_paper(ctx: &SiteContext, index: usize, total: usize, paper: &PaperCompliance) {
    banner(format!("\n[{}/{total}] {}", index + 1, paper.display_name));
    banner(RULE);

    heading("\n  HTML landing page:");
    match &paper.landing_page {
        None => fail_line(2, "Record has no filename; no landing page can exist"),
        Some(page) if !page.found => {
            fail_line(2, format!("HTML file not found: {}", ctx.relative(&page.path)));
        }
        Some(page) => {
            heading("  Required Google Scholar tags:");
            print_tags(&page.required, true);
            heading("\n  Recommended tags:");
            print_tags(&page.recommended, false);
        }
    }

    if let Some(pdf) = &paper.pdf {
        heading("\n  PDF file:");
        print_pdf(ctx, pdf);
    }
}

fn print_robots(ctx: &SiteContext, robots: &RobotsCheck) {
    heading(format!("\n\n{} check:", ctx.relative(&robots.path)));
    banner(RULE);
    if !robots.found {
        fail_line(0, format!("{} not found", ctx.relative(&robots.path)));
    } else if robots.allows_crawler {
        ok_line(0, format!("robots.txt allows {}", robots.crawler));
    } else {
        fail_line(
            0,
            format!("robots.txt does not explicitly allow {}", robots.crawler),
        );
    }
}

pub fn print_report(ctx: &SiteContext, report: &ComplianceReport) {
    heading(format!("Validating {} paper(s)", report.summary.paper_count));
    let total = report.papers.len();
    for (index, paper) in report.papers.iter().enumerate() {
        print_paper(ctx, index, total, paper);
    }
    print_robots(ctx, &report.robots);

    let summary = &report.summary;
    banner("\n\nValidation summary:");
    banner("═════════════════════════════════════════════════════");
    if summary.critical_count == 0 && summary.warning_count == 0 {
        ok_line(
            0,
            "All checks passed! The site is ready for Google Scholar indexing.",
        );
    } else {
        if summary.critical_count > 0 {
            fail_line(0, format!("{} critical issue(s) found", summary.critical_count));
        }
        if summary.warning_count > 0 {
            warn_line(0, format!("{} warning(s) found", summary.warning_count));
        }
        warn_line(
            0,
            "Please address the issues above before submitting to Google Scholar.",
        );
    }
    if summary.advisory_count > 0 {
        println!(
            "  ({} recommended tag(s) missing; advisory only)",
            summary.advisory_count
        );
    }
    println!();
}

fn print_json(report: Option<&ComplianceReport>) {
    let payload = match report {
        Some(report) => json!({
            "schema": 1,
            "checkKind": report.check_kind,
            "result": report.result,
            "papers": report.papers,
            "robots": report.robots,
            "summary": report.summary,
        }),
        None => json!({
            "schema": 1,
            "checkKind": COMPLIANCE_CHECK_KIND,
            "result": "skipped",
            "reason": "no_papers",
        }),
    };
    let rendered = serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|e| fail_exit(format!("failed to render validate payload: {e}")));
    println!("{rendered}");
}

/// Validate and print; returns whether the run had no critical issue.
pub fn report(ctx: &SiteContext, store: &ContentStore, json_output: bool) -> bool {
    let report = execute(ctx, store);
    if json_output {
        print_json(report.as_ref());
    } else {
        match &report {
            Some(report) => print_report(ctx, report),
            None => warn_line(0, "No papers found in content store"),
        }
    }
    report.as_ref().is_none_or(ComplianceReport::accepted)
}

pub fn run(ctx: &SiteContext, json_output: bool) {
    if !json_output {
        banner("\nGoogle Scholar compliance validation\n");
    }
    let store = load_store_or_exit(ctx);
    if !report(ctx, &store, json_output) {
        std::process::exit(1);
    }
}
