use anyhow::Result;
use hl_core::NewsFetcher;
use hl_feed::{debounce_queries, Debouncer, FeedViewModel, ScrollTrigger};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use crate::render::{render_detail, render_list};

/// Height of one rendered row, in the units the scroll trigger works with.
const ROW_HEIGHT: f64 = 44.0;

#[derive(Debug, PartialEq)]
enum Command {
    Text(String),
    More,
    Next,
    Open(usize),
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Command::Text(line.to_string());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("more"), None) => Command::More,
            (Some("next"), None) => Command::Next,
            (Some("quit" | "q"), None) => Command::Quit,
            (Some("open"), Some(index)) => match index.parse() {
                Ok(index) => Command::Open(index),
                Err(_) => Command::Unknown(line.to_string()),
            },
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// The slice of the list currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    first: usize,
    window: usize,
}

impl Viewport {
    fn new(window: usize) -> Self {
        Self { first: 0, window: window.max(1) }
    }

    fn reset(&mut self) {
        self.first = 0;
    }

    fn scroll_down(&mut self, total: usize) {
        self.first = (self.first + self.window).min(total.saturating_sub(self.window));
    }

    fn offset(&self) -> f64 {
        self.first as f64 * ROW_HEIGHT
    }

    fn frame_height(&self) -> f64 {
        self.window as f64 * ROW_HEIGHT
    }

    fn content_height(total: usize) -> f64 {
        total as f64 * ROW_HEIGHT
    }
}

/// Interactive loop over stdin. Plain lines are search-text edits and go
/// through the debouncer; lines starting with `:` are commands.
pub async fn run<F: NewsFetcher + 'static>(vm: &mut FeedViewModel<F>, window: usize) -> Result<()> {
    let (text_tx, text_rx) = mpsc::channel(32);
    let mut text_tx = Some(text_tx);
    let (query_tx, mut query_rx) = mpsc::channel(8);
    let debouncer = tokio::spawn(debounce_queries(text_rx, query_tx, Debouncer::default()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = vm.subscribe();
    let mut viewport = Viewport::new(window);
    let trigger = ScrollTrigger::default();
    let mut stdin_open = true;
    let mut queries_open = true;

    println!("{}", render_list(vm.state(), viewport.first, viewport.window));
    info!("Type to search; :next scrolls, :more loads, :open N shows an article, :quit exits");

    loop {
        if !stdin_open && !queries_open && !vm.state().is_loading() {
            break;
        }
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                None => {
                    stdin_open = false;
                    text_tx = None;
                }
                Some(line) => match Command::parse(&line) {
                    Command::Text(text) => {
                        if let Some(tx) = &text_tx {
                            let _ = tx.send(text).await;
                        }
                    }
                    Command::More => vm.load_more(),
                    Command::Next => {
                        let total = vm.state().rows().len();
                        viewport.scroll_down(total);
                        if trigger.should_load_more(
                            viewport.offset(),
                            Viewport::content_height(total),
                            viewport.frame_height(),
                        ) {
                            debug!("Viewport near the end, loading more");
                            vm.load_more();
                        }
                        println!("{}", render_list(vm.state(), viewport.first, viewport.window));
                    }
                    Command::Open(index) => match vm.row(index) {
                        Some(row) => println!("{}", render_detail(row)),
                        None => println!("No article #{}", index),
                    },
                    Command::Quit => break,
                    Command::Unknown(line) => println!("Unknown command: {}", line),
                },
            },
            query = query_rx.recv(), if queries_open => match query {
                Some(query) => {
                    info!("🔎 Searching for {:?}", query);
                    viewport.reset();
                    vm.search(Some(&query));
                }
                None => queries_open = false,
            },
            Some(completion) = vm.next_completion() => vm.apply(completion),
            Ok(()) = updates.changed() => {
                let state = updates.borrow_and_update().clone();
                if !state.is_loading() {
                    println!("{}", render_list(&state, viewport.first, viewport.window));
                }
            },
            else => break,
        }
    }

    drop(text_tx);
    debouncer.abort();
    if let Some(message) = vm.state().error_message() {
        tracing::warn!("Last error: {}", message);
    }
    Ok(())
}
