pub mod debounce;
pub mod scroll;
pub mod state;
pub mod view_model;

pub use debounce::{debounce_queries, Debouncer};
pub use scroll::ScrollTrigger;
pub use state::{Action, FeedState, FetchKind, FetchRequest};
pub use view_model::{Completion, FeedViewModel};

pub mod prelude {
    pub use super::{FeedState, FeedViewModel, ScrollTrigger};
    pub use hl_core::{DisplayRow, NewsRow, Result, Error};
}
