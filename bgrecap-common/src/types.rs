//! Domain type definitions and newtype wrappers shared across the pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A BoardGameGeek game (thing) id.
///
/// Ids are numeric on the wire but carried as opaque strings; the pipeline
/// never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One logged play, validated at the feed boundary.
///
/// A `length_minutes` of 0 means the duration is unknown. `quantity` is the
/// repeat count for the session and is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub game_id: GameId,
    pub game_name: String,
    pub date: NaiveDate,
    pub length_minutes: u32,
    pub quantity: u32,
}
