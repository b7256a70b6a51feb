//! Landing-page renderer.
//!
//! Produces one self-contained HTML document per paper. The head carries
//! Google Scholar `citation_*` tags, Dublin Core, Open Graph, Twitter Card,
//! a canonical link and a schema.org `ScholarlyArticle` JSON-LD block.
//! Rendering is pure; writing happens in `generate`.

use crate::config::SiteConfig;
use crate::content::{PaperView, title_case};
use crate::markup::{escape, script_safe_json};
use serde_json::json;
use std::fmt::Write as _;

const STYLESHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 2rem;
            background: #f5f5f5;
            color: #333;
        }
        .paper-container {
            background: white;
            padding: 2rem;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 {
            color: #2c3e50;
            margin-bottom: 0.5rem;
        }
        .meta {
            color: #7f8c8d;
            margin-bottom: 2rem;
            font-size: 0.9rem;
        }
        .links {
            display: flex;
            gap: 1rem;
            margin-top: 2rem;
            flex-wrap: wrap;
        }
        .btn {
            display: inline-block;
            padding: 0.75rem 1.5rem;
            background: #3498db;
            color: white;
            text-decoration: none;
            border-radius: 4px;
            transition: background 0.2s;
        }
        .btn:hover {
            background: #2980b9;
        }
        .btn-secondary {
            background: #95a5a6;
        }
        .btn-secondary:hover {
            background: #7f8c8d;
        }
        .abstract {
            background: #f8f9fa;
            padding: 1.5rem;
            border-left: 4px solid #3498db;
            margin: 1.5rem 0;
            border-radius: 4px;
        }
        .abstract h2 {
            margin-top: 0;
            font-size: 1rem;
            color: #2c3e50;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }
"#;

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"    <meta name="{name}" content="{}">"#,
        escape(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"    <meta property="{property}" content="{}">"#,
        escape(content)
    );
}

/// schema.org description of the paper, serialized for a script block.
pub fn structured_data(paper: &PaperView<'_>, config: &SiteConfig) -> String {
    let value = json!({
        "@context": "https://schema.org",
        "@type": "ScholarlyArticle",
        "headline": paper.display_name,
        "name": paper.display_name,
        "author": {
            "@type": "Person",
            "name": config.author,
            "url": config.base_url,
        },
        "datePublished": paper.date.iso,
        "description": paper.description,
        "keywords": paper.keywords,
        "inLanguage": config.language,
        "isAccessibleForFree": true,
        "license": config.license_url,
        "url": paper.page_url,
        "mainEntityOfPage": paper.page_url,
        "genre": paper.category,
        "encoding": {
            "@type": "MediaObject",
            "contentUrl": paper.pdf_url,
            "encodingFormat": "application/pdf",
        },
    });
    // Serializing a `Value` built from strings and bools cannot fail.
    let rendered = serde_json::to_string_pretty(&value).unwrap_or_default();
    script_safe_json(&rendered)
}

fn render_head(out: &mut String, paper: &PaperView<'_>, config: &SiteConfig) {
    let citation_date = paper.date.citation.as_str();
    let iso_date = paper.date.iso.as_str();

    out.push_str("<!DOCTYPE html>\n<html lang=\"");
    out.push_str(&escape(&config.language));
    out.push_str("\">\n<head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\n",
    );

    let _ = writeln!(
        out,
        "    <title>{} | {}</title>\n",
        escape(paper.display_name),
        escape(&config.site_name)
    );

    out.push_str("    <!-- Google Scholar Meta Tags -->\n");
    meta_name(out, "citation_title", paper.display_name);
    meta_name(out, "citation_author", &config.author);
    meta_name(out, "citation_publication_date", citation_date);
    meta_name(out, "citation_online_date", citation_date);
    meta_name(out, "citation_pdf_url", &paper.pdf_url);
    meta_name(out, "citation_abstract_html_url", &paper.page_url);
    meta_name(out, "citation_language", &config.language);
    meta_name(out, "citation_keywords", &paper.keywords);
    meta_name(
        out,
        "citation_technical_report_institution",
        &config.institution,
    );

    out.push_str("\n    <!-- Dublin Core Meta Tags -->\n");
    meta_name(out, "DC.title", paper.display_name);
    meta_name(out, "DC.creator", &config.author);
    meta_name(out, "DC.date", iso_date);
    meta_name(out, "DC.type", "Text");
    meta_name(out, "DC.format", "application/pdf");
    meta_name(out, "DC.language", &config.language);
    meta_name(out, "DC.subject", &paper.keywords.replace(',', ";"));

    out.push_str("\n    <!-- Standard Meta Tags -->\n");
    meta_name(
        out,
        "description",
        &format!("{} - {}", paper.display_name, paper.description),
    );
    meta_name(out, "keywords", &paper.keywords);
    meta_name(out, "author", &config.author);

    out.push_str("\n    <!-- Open Graph Meta Tags -->\n");
    meta_property(out, "og:title", paper.display_name);
    meta_property(out, "og:description", &paper.description);
    meta_property(out, "og:type", "article");
    meta_property(out, "og:url", &paper.page_url);
    meta_property(out, "article:published_time", iso_date);
    meta_property(out, "article:author", &config.author);
    meta_property(out, "article:tag", paper.category);

    out.push_str("\n    <!-- Twitter Card Meta Tags -->\n");
    meta_name(out, "twitter:card", "summary");
    meta_name(out, "twitter:title", paper.display_name);
    meta_name(out, "twitter:description", &paper.description);
    meta_name(out, "twitter:creator", &config.twitter_creator);

    let _ = writeln!(
        out,
        "\n    <link rel=\"canonical\" href=\"{}\">\n",
        escape(&paper.page_url)
    );

    out.push_str("    <script type=\"application/ld+json\">\n");
    for line in structured_data(paper, config).lines() {
        let _ = writeln!(out, "    {line}");
    }
    out.push_str("    </script>\n\n");

    out.push_str("    <style>\n");
    out.push_str(STYLESHEET);
    out.push_str("    </style>\n</head>\n");
}

fn render_body(out: &mut String, paper: &PaperView<'_>, config: &SiteConfig) {
    out.push_str("<body>\n    <div class=\"paper-container\">\n");
    let _ = writeln!(out, "        <h1>{}</h1>", escape(paper.display_name));

    out.push_str("        <div class=\"meta\">\n");
    let _ = writeln!(
        out,
        "            <p><strong>Author:</strong> {}</p>",
        escape(&config.author)
    );
    if paper.raw_date.is_some() {
        let _ = writeln!(
            out,
            "            <p><strong>Date:</strong> {}</p>",
            escape(&paper.date.display)
        );
    }
    let _ = writeln!(
        out,
        "            <p><strong>Category:</strong> {}</p>",
        escape(&title_case(paper.category))
    );
    out.push_str("        </div>\n");

    out.push_str("        <div class=\"abstract\">\n");
    out.push_str("            <h2>Abstract</h2>\n");
    let _ = writeln!(out, "            <p>{}</p>", escape(&paper.description));
    out.push_str("        </div>\n");

    out.push_str("        <div class=\"links\">\n");
    let _ = writeln!(
        out,
        "            <a href=\"../pdfs/{}.pdf\" class=\"btn\" target=\"_blank\" rel=\"noopener noreferrer\">View PDF</a>",
        escape(paper.filename)
    );
    if let Some(slides) = paper.slides {
        let _ = writeln!(
            out,
            "            <a href=\"{}\" class=\"btn btn-secondary\" target=\"_blank\" rel=\"noopener noreferrer\">View Slides</a>",
            escape(slides)
        );
    }
    out.push_str("            <a href=\"../\" class=\"btn btn-secondary\">Back to Home</a>\n");
    out.push_str("        </div>\n    </div>\n</body>\n</html>\n");
}

/// Render the landing page for one paper.
pub fn render_landing_page(paper: &PaperView<'_>, config: &SiteConfig) -> String {
    let mut out = String::with_capacity(8 * 1024);
    render_head(&mut out, paper, config);
    render_body(&mut out, paper, config);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PaperRecord;
    use crate::date::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"))
    }

    fn paper_one() -> PaperRecord {
        PaperRecord {
            filename: Some("p1".to_string()),
            display_name: Some("Paper One".to_string()),
            date: Some("2024-03-05".to_string()),
            ..PaperRecord::default()
        }
    }

    fn render(record: &PaperRecord) -> String {
        let config = SiteConfig::default();
        let view = PaperView::from_record(record, &config, &clock()).expect("view should build");
        render_landing_page(&view, &config)
    }

    #[test]
    fn page_carries_citation_tags() {
        let html = render(&paper_one());
        assert!(html.contains(r#"<meta name="citation_title" content="Paper One">"#));
        assert!(html.contains(r#"<meta name="citation_author" content="Unruly Abstractions">"#));
        assert!(html.contains(r#"<meta name="citation_publication_date" content="2024/03/05">"#));
        assert!(html.contains(r#"<meta name="citation_online_date" content="2024/03/05">"#));
        assert!(html.contains(
            r#"<meta name="citation_pdf_url" content="https://www.unrulyabstractions.com/pdfs/p1.pdf">"#
        ));
        assert!(html.contains(
            r#"<meta name="citation_abstract_html_url" content="https://www.unrulyabstractions.com/papers/p1.html">"#
        ));
        assert!(html.contains(r#"<meta name="citation_keywords" content="AI Safety, Research">"#));
        assert!(html.contains(r#"<meta name="DC.subject" content="AI Safety; Research">"#));
        assert!(html.contains(r#"<meta name="DC.date" content="2024-03-05">"#));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://www.unrulyabstractions.com/papers/p1.html">"#
        ));
        assert!(html.contains("<title>Paper One | Unruly Abstractions</title>"));
    }

    #[test]
    fn structured_data_is_valid_json() {
        let config = SiteConfig::default();
        let record = paper_one();
        let view = PaperView::from_record(&record, &config, &clock()).expect("view should build");
        let value: serde_json::Value =
            serde_json::from_str(&structured_data(&view, &config)).expect("json-ld should parse");
        assert_eq!(value["@type"], "ScholarlyArticle");
        assert_eq!(value["datePublished"], "2024-03-05");
        assert_eq!(value["license"], "https://creativecommons.org/licenses/by/4.0/");
        assert_eq!(
            value["encoding"]["contentUrl"],
            "https://www.unrulyabstractions.com/pdfs/p1.pdf"
        );
    }

    #[test]
    fn optional_body_sections_follow_the_record() {
        let bare = render(&PaperRecord {
            filename: Some("p2".to_string()),
            ..PaperRecord::default()
        });
        assert!(!bare.contains("<strong>Date:</strong>"));
        assert!(!bare.contains("View Slides"));
        assert!(bare.contains(r#"content="Research paper on Research""#));

        let categorized = render(&PaperRecord {
            filename: Some("p3".to_string()),
            category: Some("interpretability".to_string()),
            ..PaperRecord::default()
        });
        assert!(categorized.contains(
            "<div class=\"abstract\">\n            <h2>Abstract</h2>\n            <p>Research paper on interpretability</p>"
        ));

        let full = render(&PaperRecord {
            description: Some("We study things.".to_string()),
            slides: Some("https://slides.example/deck".to_string()),
            ..paper_one()
        });
        assert!(full.contains("<p><strong>Date:</strong> March 5, 2024</p>"));
        assert!(full.contains("<p>We study things.</p>"));
        assert!(full.contains(r#"<a href="https://slides.example/deck""#));
    }

    #[test]
    fn ongoing_date_displays_literal() {
        let html = render(&PaperRecord {
            date: Some("ongoing".to_string()),
            ..paper_one()
        });
        assert!(html.contains("<p><strong>Date:</strong> Ongoing</p>"));
        assert!(html.contains(r#"<meta name="citation_publication_date" content="2026/01/15">"#));
    }

    #[test]
    fn record_markup_is_escaped() {
        let html = render(&PaperRecord {
            display_name: Some(r#"Evil "</title><script>x()</script>"#.to_string()),
            description: Some("a < b & c".to_string()),
            ..paper_one()
        });
        assert!(!html.contains("</title><script>"));
        assert!(html.contains(
            r#"<meta name="citation_title" content="Evil &quot;&lt;/title&gt;&lt;script&gt;x()&lt;/script&gt;">"#
        ));
        assert!(html.contains("<p>a &lt; b &amp; c</p>"));
        assert!(html.contains(r#"<\/title><script>x()<\/script>"#));
    }

    #[test]
    fn rendering_is_deterministic_for_a_fixed_clock() {
        let record = PaperRecord {
            date: None,
            ..paper_one()
        };
        assert_eq!(render(&record), render(&record));
    }
}
