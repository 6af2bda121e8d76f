//! Core wiki types.
//!
//! These types enforce protocol invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod api_url;
mod direction;
mod title;

pub use api_url::ApiUrl;
pub use direction::{Direction, RedirectFilter, SearchWhat, SortOrder};
pub use title::Title;
