use hl_core::{DisplayRow, NewsRow};
use hl_feed::FeedState;

const PREVIEW_CHARS: usize = 80;

pub fn render_row(index: usize, row: &DisplayRow) -> String {
    match row {
        DisplayRow::SearchField(field) => {
            format!("🔎 {}", field.text.as_deref().unwrap_or("Search news"))
        }
        DisplayRow::News(news) => format!(
            "{:>3}. {}\n     {} · {}",
            index, news.title, news.author, news.published_at
        ),
    }
}

/// Renders the search field plus news rows `start..start + len`, numbered from zero.
pub fn render_list(state: &FeedState, start: usize, len: usize) -> String {
    let mut out = Vec::new();
    let rows = state.display_rows();
    if let Some(field) = rows.first() {
        out.push(render_row(0, field));
    }
    for (index, row) in rows.iter().skip(1).enumerate().skip(start).take(len) {
        out.push(render_row(index, row));
    }
    if state.is_loading() {
        out.push("⏳ Loading...".to_string());
    }
    if let Some(message) = state.error_message() {
        out.push(format!("⚠️  {}", message));
    }
    out.join("\n")
}

pub fn render_detail(row: &NewsRow) -> String {
    let mut out = vec![row.title.clone(), "=".repeat(row.title.chars().count().min(PREVIEW_CHARS))];
    let byline = match &row.source {
        Some(source) => format!("{} ({})", row.author, source),
        None => row.author.clone(),
    };
    out.push(format!("{} · {}", byline, row.published_at));
    if let Some(description) = &row.description {
        out.push(String::new());
        out.push(description.clone());
    }
    if let Some(content) = &row.content {
        out.push(String::new());
        out.push(content.clone());
    }
    if let Some(url) = &row.url {
        out.push(String::new());
        out.push(format!("🔗 {}", url));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::SearchFieldRow;

    fn row() -> NewsRow {
        NewsRow {
            author: "B".to_string(),
            title: "A".to_string(),
            published_at: "2024-01-01 00:00:00 ".to_string(),
            content: Some("Body".to_string()),
            description: None,
            url: Some("https://example.com/a".to_string()),
            source: Some("Wire".to_string()),
        }
    }

    #[test]
    fn test_render_rows() {
        let field = DisplayRow::SearchField(SearchFieldRow::default());
        assert_eq!(render_row(0, &field), "🔎 Search news");

        let news = render_row(4, &DisplayRow::News(row()));
        assert!(news.starts_with("  4. A"));
        assert!(news.contains("B · 2024-01-01 00:00:00"));
    }

    #[test]
    fn test_render_detail() {
        let detail = render_detail(&row());
        assert!(detail.starts_with("A\n="));
        assert!(detail.contains("B (Wire)"));
        assert!(detail.contains("Body"));
        assert!(detail.ends_with("🔗 https://example.com/a"));
    }

    #[test]
    fn test_render_empty_list() {
        let state = FeedState::default();
        assert_eq!(render_list(&state, 0, 10), "🔎 Search news");
    }
}
