use std::sync::Arc;
use hl_client::{everything_url, ClientConfig};
use hl_core::{Error, NewsFetcher, NewsRow, Response, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use crate::state::{failed, Action, FeedState, FetchKind, FetchRequest};

/// Result of a spawned fetch, waiting to be applied on the owning task.
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub kind: FetchKind,
    pub result: Result<Response>,
}

/// Drives a [`FeedState`] against a [`NewsFetcher`].
///
/// Fetches run on spawned tokio tasks and report back over a channel; only
/// [`FeedViewModel::apply`] touches the state, so whoever owns the view-model
/// is the single place mutations happen. Every change is published on a
/// watch channel.
pub struct FeedViewModel<F> {
    fetcher: Arc<F>,
    config: ClientConfig,
    state: FeedState,
    publisher: watch::Sender<FeedState>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: Option<AbortHandle>,
}

impl<F> FeedViewModel<F>
where
    F: NewsFetcher + 'static,
{
    pub fn new(fetcher: F, config: ClientConfig) -> Self {
        let state = FeedState::new(config.page_size);
        let (publisher, _) = watch::channel(state.clone());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            fetcher: Arc::new(fetcher),
            config,
            state,
            publisher,
            completions_tx,
            completions_rx,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn row(&self, index: usize) -> Option<&NewsRow> {
        self.state.row(index)
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.publisher.subscribe()
    }

    /// Starts a new query. Anything still in flight for the old query is
    /// cancelled and its result, if it already arrived, is dropped.
    pub fn search(&mut self, query: Option<&str>) {
        self.dispatch(Action::Search(query.map(str::to_string)));
    }

    pub fn load_more(&mut self) {
        self.dispatch(Action::LoadMore);
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::DismissError);
    }

    /// Waits for the next fetch to finish. Returns `None` when nothing is
    /// loading.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if !self.state.is_loading() {
            return None;
        }
        self.completions_rx.recv().await
    }

    pub fn apply(&mut self, completion: Completion) {
        debug!(
            "Fetch completed: {:?} generation {} ({})",
            completion.kind,
            completion.generation,
            if completion.result.is_ok() { "ok" } else { "failed" }
        );
        self.dispatch(Action::Completed {
            generation: completion.generation,
            kind: completion.kind,
            result: completion.result,
        });
    }

    /// Applies completions until nothing is loading.
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    fn dispatch(&mut self, action: Action) {
        let effect = self.state.reduce(action);
        self.publisher.send_replace(self.state.clone());
        if let Some(request) = effect {
            self.spawn(request);
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        let url = match everything_url(
            &self.config.base_url,
            &self.config.api_key,
            &request.query,
            request.page_size,
            request.page,
        ) {
            Ok(url) => url,
            Err(e) => {
                self.dispatch(failed(&request, e));
                return;
            }
        };

        if request.kind == FetchKind::Fresh {
            if let Some(handle) = self.in_flight.take() {
                handle.abort();
            }
        }

        debug!(
            "Fetching {:?} page {} for {:?} (generation {})",
            request.kind, request.page, request.query, request.generation
        );

        let fetcher = Arc::clone(&self.fetcher);
        let fetch = tokio::spawn(async move { fetcher.fetch(&url).await });
        self.in_flight = Some(fetch.abort_handle());

        // A fetch that panics still has to report back, or `is_loading`
        // never clears.
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    warn!("Fetch task for generation {} failed: {}", request.generation, e);
                    Err(Error::Transport(format!("fetch task failed: {}", e)))
                }
            };
            let _ = tx.send(Completion {
                generation: request.generation,
                kind: request.kind,
                result,
            });
        });
    }
}

impl<F> Drop for FeedViewModel<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
