//! Feed traits: the seam between the HTTP client and the pipeline
//!
//! `BggClient` implements both traits against the live API; tests inject
//! in-memory fakes.

use bgrecap_common::{GameId, Result};

use crate::plays::PlaysPage;
use crate::things::GameDetail;

/// A source of paginated play-log pages.
#[allow(async_fn_in_trait)]
pub trait PlayFeed {
    /// Fetch one page (fixed size of 100 records) of plays for the user and
    /// year. Page numbers start at 1.
    async fn fetch_plays_page(&self, username: &str, year: i32, page: u32) -> Result<PlaysPage>;
}

/// A source of per-game detail records (image, category and mechanic links).
#[allow(async_fn_in_trait)]
pub trait DetailFeed {
    /// Fetch detail records for every id in one batched request.
    async fn fetch_game_details(&self, ids: &[GameId]) -> Result<Vec<GameDetail>>;
}
