//! Markdown rendering of a session's current page.
//!
//! Layout, top to bottom: heading, advisory (if any), result counts, one
//! block per article, then the pagination bar. Links are only emitted for
//! navigable articles; offline articles render their title as plain text.

use std::fmt::Write;

use crate::models::{Article, PAGE_SIZE};
use crate::pagination::{showing_range, visible_pages, PageMarker};
use crate::session::{Session, Theme};
use crate::utils::format_published_at;

/// Render the session's current result as Markdown.
pub fn render(session: &Session) -> String {
    let result = &session.result;
    let total_pages = result.total_pages();
    let mut md = String::new();

    writeln!(md, "# Latest Cybersecurity News\n").unwrap();
    writeln!(
        md,
        "_{} · {}_\n",
        session.country.display_name(),
        session.language.display_name()
    )
    .unwrap();

    if let Some(advisory) = &session.advisory {
        writeln!(md, "> **Note:** {advisory}\n").unwrap();
    }

    let mut counts = if result.total_results > 0 {
        format!("{} total articles", result.total_results)
    } else {
        format!("{} articles found", result.articles.len())
    };
    if total_pages > 1 {
        write!(counts, " • Page {} of {}", result.current_page, total_pages).unwrap();
    }
    writeln!(md, "{counts}\n").unwrap();

    let rule = rule(session.theme);
    for article in &result.articles {
        render_article(&mut md, article);
        writeln!(md, "{rule}\n").unwrap();
    }

    if !result.articles.is_empty() && total_pages > 1 {
        let (start, end) = showing_range(result.current_page, result.total_results);
        writeln!(
            md,
            "Showing {start}-{end} of {} articles ({PAGE_SIZE} per page)\n",
            result.total_results
        )
        .unwrap();
        let bar = visible_pages(result.current_page, total_pages)
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(n) if n == result.current_page => format!("**{n}**"),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(md, "Pages: {bar}").unwrap();
    }

    md
}

fn render_article(md: &mut String, article: &Article) {
    match article.url.as_deref() {
        Some(url) if article.is_navigable() => {
            writeln!(md, "## [{}]({})\n", escape_link_text(&article.title), url).unwrap();
        }
        _ => writeln!(md, "## {}\n", article.title).unwrap(),
    }
    writeln!(
        md,
        "*{}* · {}\n",
        article.source_name(),
        format_published_at(&article.published_at)
    )
    .unwrap();
    if let Some(description) = article.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writeln!(md, "{description}\n").unwrap();
    }
}

/// Backslash-escape characters that would end the link text early.
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Separator between articles; the only thing the theme changes in text output.
fn rule(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "---",
        Theme::Dark => "***",
    }
}
