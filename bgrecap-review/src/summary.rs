//! Output models for the year-in-review summary
//!
//! Field names on the wire are camelCase and match the shape consumed by the
//! web front end. `TagTally` counts how many of the referenced games carry a
//! tag; its wire name `playCount` is a compatibility alias.

use bgrecap_common::GameId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The single longest logged session of the year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestSession {
    pub id: GameId,
    pub name: String,
    pub length: u32,
    pub date: NaiveDate,
}

/// One date tied for the most plays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlays {
    pub date: NaiveDate,
    pub plays: u32,
}

/// The month with the most plays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPlays {
    pub month: String,
    pub play_count: u32,
}

/// A game promoted into a top-N list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGame {
    pub id: GameId,
    pub name: String,
    pub play_count: u32,
    pub total_minutes: u64,
}

/// How many of the referenced games carry one category or mechanic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTally {
    pub id: String,
    pub name: String,
    #[serde(rename = "playCount")]
    pub game_count: u32,
}

/// The complete year-in-review summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub total_played: u64,
    pub unique_played: usize,
    pub total_time_played: u64,
    pub longest_play_session: Option<LongestSession>,
    pub days_most_played: Vec<DayPlays>,
    pub month_most_played: Option<MonthPlays>,
    pub days_played: usize,
    pub most_played_by_count: Vec<RankedGame>,
    pub most_played_by_time: Vec<RankedGame>,
    pub categories: Vec<TagTally>,
    pub mechanics: Vec<TagTally>,
    pub images: HashMap<GameId, String>,
}
