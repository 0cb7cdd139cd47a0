use serde::Serialize;

/// One entry of the rendered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DisplayRow {
    News(NewsRow),
    SearchField(SearchFieldRow),
}

impl DisplayRow {
    pub fn as_news(&self) -> Option<&NewsRow> {
        match self {
            DisplayRow::News(row) => Some(row),
            DisplayRow::SearchField(_) => None,
        }
    }
}

/// A news item ready for display. Missing article fields have already been
/// replaced with placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsRow {
    pub author: String,
    pub title: String,
    pub published_at: String,
    pub content: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFieldRow {
    pub text: Option<String>,
}
