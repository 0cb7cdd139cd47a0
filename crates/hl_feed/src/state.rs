use hl_core::mapper::map_response;
use hl_core::{DisplayRow, Error, NewsRow, Response, Result, SearchFieldRow};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a new query; replaces the rows.
    Fresh,
    /// Following page; appended to the rows.
    NextPage,
}

/// A fetch the state asked for. The driver turns it into a URL and runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub kind: FetchKind,
    pub query: String,
    pub page_size: u32,
    pub page: u32,
}

#[derive(Debug)]
pub enum Action {
    Search(Option<String>),
    LoadMore,
    Completed {
        generation: u64,
        kind: FetchKind,
        result: Result<Response>,
    },
    DismissError,
}

/// State behind the article list screen.
///
/// All mutation goes through [`FeedState::reduce`]. `rows` only holds news
/// rows; the search field is kept aside so that the page cursor is simply
/// `rows.len() / page_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    rows: Vec<NewsRow>,
    search_field: SearchFieldRow,
    is_loading: bool,
    error_message: Option<String>,
    last_query: String,
    page_size: u32,
    generation: u64,
    exhausted: bool,
}

impl FeedState {
    pub fn new(page_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            search_field: SearchFieldRow::default(),
            is_loading: false,
            error_message: None,
            last_query: String::new(),
            page_size: page_size.max(1),
            generation: 0,
            exhausted: false,
        }
    }

    pub fn rows(&self) -> &[NewsRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&NewsRow> {
        self.rows.get(index)
    }

    pub fn search_field(&self) -> &SearchFieldRow {
        &self.search_field
    }

    /// Search field first, then every news row in order.
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        std::iter::once(DisplayRow::SearchField(self.search_field.clone()))
            .chain(self.rows.iter().cloned().map(DisplayRow::News))
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        (self.rows.len() / self.page_size as usize) as u32
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a follow-up page came back with no articles at all for the
    /// current query. Pages whose articles were all filtered out don't count.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn reduce(&mut self, action: Action) -> Option<FetchRequest> {
        match action {
            Action::Search(query) => self.search(query),
            Action::LoadMore => self.load_more(),
            Action::Completed { generation, kind, result } => {
                self.complete(generation, kind, result);
                None
            }
            Action::DismissError => {
                self.error_message = None;
                None
            }
        }
    }

    fn search(&mut self, query: Option<String>) -> Option<FetchRequest> {
        let query = query.filter(|q| !q.is_empty())?;

        self.generation += 1;
        self.last_query = query.clone();
        self.search_field.text = Some(query.clone());
        self.rows.clear();
        self.error_message = None;
        self.exhausted = false;
        self.is_loading = true;

        Some(FetchRequest {
            generation: self.generation,
            kind: FetchKind::Fresh,
            query,
            page_size: self.page_size,
            page: 0,
        })
    }

    fn load_more(&mut self) -> Option<FetchRequest> {
        if self.is_loading || self.last_query.is_empty() || self.exhausted {
            return None;
        }
        self.is_loading = true;

        Some(FetchRequest {
            generation: self.generation,
            kind: FetchKind::NextPage,
            query: self.last_query.clone(),
            page_size: self.page_size,
            page: self.current_page(),
        })
    }

    fn complete(&mut self, generation: u64, kind: FetchKind, result: Result<Response>) {
        if generation != self.generation {
            debug!(
                "Discarding stale {:?} result (generation {} != {})",
                kind, generation, self.generation
            );
            return;
        }
        self.is_loading = false;

        let mapped = result.and_then(|response| {
            let received = response.articles.as_ref().map_or(0, Vec::len);
            map_response(&response).map(|rows| (received, rows))
        });

        match mapped {
            Ok((received, rows)) => {
                debug!(
                    "Applying {} rows ({} articles) from {:?} fetch",
                    rows.len(),
                    received,
                    kind
                );
                self.error_message = None;
                match kind {
                    FetchKind::Fresh => self.rows = rows,
                    FetchKind::NextPage => {
                        if received == 0 {
                            self.exhausted = true;
                        }
                        self.rows.extend(rows);
                    }
                }
            }
            Err(e) => {
                warn!("{:?} fetch for {:?} failed: {}", kind, self.last_query, e);
                if kind == FetchKind::Fresh {
                    self.rows.clear();
                }
                self.error_message = Some(e.user_message());
            }
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(hl_client::config::DEFAULT_PAGE_SIZE)
    }
}

/// Convenience for building a failed completion.
pub fn failed(request: &FetchRequest, error: Error) -> Action {
    Action::Completed {
        generation: request.generation,
        kind: request.kind,
        result: Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::Article;

    fn response(titles: &[&str]) -> Response {
        Response {
            status: "ok".to_string(),
            total_results: Some(titles.len() as u32),
            articles: Some(
                titles
                    .iter()
                    .map(|t| Article {
                        title: Some(t.to_string()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            code: None,
            message: None,
        }
    }

    fn titles(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("article {}", i)).collect()
    }

    fn complete(state: &mut FeedState, request: &FetchRequest, titles: &[String]) {
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        state.reduce(Action::Completed {
            generation: request.generation,
            kind: request.kind,
            result: Ok(response(&titles)),
        });
    }

    #[test]
    fn test_empty_search_is_noop() {
        let mut state = FeedState::default();
        let before = state.clone();
        assert_eq!(state.reduce(Action::Search(None)), None);
        assert_eq!(state.reduce(Action::Search(Some(String::new()))), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_search_requests_first_page() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        assert_eq!(request.kind, FetchKind::Fresh);
        assert_eq!(request.page, 0);
        assert_eq!(request.page_size, 20);
        assert!(state.is_loading());
        assert_eq!(state.last_query(), "rust");
        assert_eq!(state.search_field().text.as_deref(), Some("rust"));
    }

    #[test]
    fn test_search_replaces_and_load_more_appends() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(20));
        assert_eq!(state.rows().len(), 20);
        assert_eq!(state.current_page(), 1);

        let request = state.reduce(Action::LoadMore).unwrap();
        assert_eq!(request.page, 1);
        complete(&mut state, &request, &titles(5));
        assert_eq!(state.rows().len(), 25);
        assert_eq!(state.current_page(), 1);
        assert!(!state.is_loading());

        let request = state.reduce(Action::Search(Some("go".to_string()))).unwrap();
        assert!(state.rows().is_empty());
        complete(&mut state, &request, &titles(3));
        assert_eq!(state.rows().len(), 3);
    }

    #[test]
    fn test_twenty_five_rows_request_page_one() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(25));
        assert_eq!(state.reduce(Action::LoadMore).unwrap().page, 1);
    }

    #[test]
    fn test_load_more_while_loading_is_noop() {
        let mut state = FeedState::default();
        state.reduce(Action::Search(Some("rust".to_string())));
        assert_eq!(state.reduce(Action::LoadMore), None);

        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(20));
        assert!(state.reduce(Action::LoadMore).is_some());
        assert_eq!(state.reduce(Action::LoadMore), None);
    }

    #[test]
    fn test_load_more_without_query_is_noop() {
        let mut state = FeedState::default();
        assert_eq!(state.reduce(Action::LoadMore), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_error_status_sets_message() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        state.reduce(Action::Completed {
            generation: request.generation,
            kind: request.kind,
            result: Ok(Response {
                status: "error".to_string(),
                total_results: None,
                articles: None,
                code: None,
                message: None,
            }),
        });
        assert!(state.rows().is_empty());
        assert!(state.error_message().is_some());
        assert!(!state.is_loading());

        state.reduce(Action::DismissError);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_load_more_failure_sets_message() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(20));

        let request = state.reduce(Action::LoadMore).unwrap();
        state.reduce(failed(&request, Error::Transport("connection reset".to_string())));
        assert_eq!(state.rows().len(), 20);
        assert!(!state.is_loading());
        assert!(state.error_message().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = FeedState::default();
        let old = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        let new = state.reduce(Action::Search(Some("rustlang".to_string()))).unwrap();

        complete(&mut state, &old, &titles(20));
        assert!(state.rows().is_empty());
        assert!(state.is_loading());

        complete(&mut state, &new, &titles(2));
        assert_eq!(state.rows().len(), 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_empty_next_page_marks_exhausted() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(20));
        let request = state.reduce(Action::LoadMore).unwrap();
        complete(&mut state, &request, &[]);
        assert!(state.is_exhausted());
        assert_eq!(state.reduce(Action::LoadMore), None);

        state.reduce(Action::Search(Some("rust".to_string())));
        assert!(!state.is_exhausted());
    }

    #[test]
    fn test_removed_only_page_keeps_paging() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(20));

        let request = state.reduce(Action::LoadMore).unwrap();
        complete(&mut state, &request, &vec!["[Removed]".to_string(); 20]);
        assert_eq!(state.rows().len(), 20);
        assert!(!state.is_exhausted());
        assert!(!state.is_loading());

        let request = state.reduce(Action::LoadMore).unwrap();
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_display_rows_lead_with_search_field() {
        let mut state = FeedState::default();
        let request = state.reduce(Action::Search(Some("rust".to_string()))).unwrap();
        complete(&mut state, &request, &titles(2));

        let rows = state.display_rows();
        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[0], DisplayRow::SearchField(f) if f.text.as_deref() == Some("rust")));
        assert_eq!(rows[1].as_news().map(|r| r.title.as_str()), Some("article 0"));
    }
}
