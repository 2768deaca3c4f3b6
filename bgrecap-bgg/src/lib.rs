//! BoardGameGeek XML API2 client and feed schemas for bgrecap

pub mod client;
pub mod feed;
pub mod plays;
pub mod things;

// Re-export commonly used types
pub use client::{BggClient, BggConfig, DEFAULT_BASE_URL};
pub use feed::{DetailFeed, PlayFeed};
pub use plays::{fetch_all_plays, parse_plays_page, PlaysPage, PAGE_SIZE};
pub use things::{parse_game_details, GameDetail, TagLink};
