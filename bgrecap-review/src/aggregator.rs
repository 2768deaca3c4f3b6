//! Single-pass aggregation of play records into per-game, per-day and
//! per-month totals

use bgrecap_common::{GameId, PlayRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::summary::LongestSession;

/// Running totals for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAggregate {
    pub game_id: GameId,
    pub name: String,
    pub play_count: u32,
    pub total_minutes: u64,
}

/// Owned single-writer accumulator over one play-record sequence.
///
/// Feed every record through [`PlayAggregator::record`], then call
/// [`PlayAggregator::finish`]. Games are kept in first-seen order so the
/// ranking stage's tie-breaks are deterministic.
#[derive(Debug, Default)]
pub struct PlayAggregator {
    total_played: u64,
    total_time_played: u64,
    games: Vec<GameAggregate>,
    index: HashMap<GameId, usize>,
    days: BTreeMap<NaiveDate, u32>,
    months: [u32; 12],
    longest: Option<LongestSession>,
}

/// Finalized aggregates after one full pass
#[derive(Debug, Clone)]
pub struct PlayStats {
    pub total_played: u64,
    pub total_time_played: u64,
    /// Per-game aggregates in first-seen order
    pub games: Vec<GameAggregate>,
    /// Quantity sums per date, chronological
    pub days: BTreeMap<NaiveDate, u32>,
    /// Quantity sums per calendar month, index = month - 1
    pub months: [u32; 12],
    pub longest: Option<LongestSession>,
}

impl PlayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into every aggregate dimension.
    pub fn record(&mut self, play: &PlayRecord) {
        let quantity = play.quantity;
        self.total_played += u64::from(quantity);

        if play.length_minutes > 0 {
            self.total_time_played += u64::from(play.length_minutes);

            // Strict comparison: the first-seen record wins length ties.
            let is_longer = self
                .longest
                .as_ref()
                .map_or(true, |current| play.length_minutes > current.length);
            if is_longer {
                self.longest = Some(LongestSession {
                    id: play.game_id.clone(),
                    name: play.game_name.clone(),
                    length: play.length_minutes,
                    date: play.date,
                });
            }
        }

        match self.index.get(&play.game_id) {
            Some(&slot) => {
                let game = &mut self.games[slot];
                game.play_count += quantity;
                game.total_minutes += u64::from(play.length_minutes);
            }
            None => {
                self.index.insert(play.game_id.clone(), self.games.len());
                self.games.push(GameAggregate {
                    game_id: play.game_id.clone(),
                    name: play.game_name.clone(),
                    play_count: quantity,
                    total_minutes: u64::from(play.length_minutes),
                });
            }
        }

        *self.days.entry(play.date).or_insert(0) += quantity;
        self.months[play.date.month0() as usize] += quantity;
    }

    /// Finalize the pass.
    pub fn finish(self) -> PlayStats {
        debug!(
            games = self.games.len(),
            days = self.days.len(),
            total_played = self.total_played,
            "aggregation pass complete"
        );
        PlayStats {
            total_played: self.total_played,
            total_time_played: self.total_time_played,
            games: self.games,
            days: self.days,
            months: self.months,
            longest: self.longest,
        }
    }
}

impl PlayStats {
    /// Count of distinct games seen
    pub fn unique_played(&self) -> usize {
        self.games.len()
    }

    /// Count of distinct dates played on
    pub fn days_played(&self) -> usize {
        self.days.len()
    }
}

/// Aggregate a full record sequence in one pass.
pub fn aggregate_plays(records: &[PlayRecord]) -> PlayStats {
    let mut aggregator = PlayAggregator::new();
    for record in records {
        aggregator.record(record);
    }
    aggregator.finish()
}
