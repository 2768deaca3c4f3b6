//! Top-N and most-played views over finalized aggregates
//!
//! All comparisons are on integers and all sorts are stable, so ties resolve
//! to first-seen order.

use crate::aggregator::{GameAggregate, PlayStats};
use crate::summary::{DayPlays, MonthPlays, RankedGame};

/// Size of the top-games lists
pub const TOP_GAMES: usize = 5;

/// Size of the category/mechanic tallies
pub const TOP_TAGS: usize = 3;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn ranked(game: &GameAggregate) -> RankedGame {
    RankedGame {
        id: game.game_id.clone(),
        name: game.name.clone(),
        play_count: game.play_count,
        total_minutes: game.total_minutes,
    }
}

fn top_by<K: Ord>(stats: &PlayStats, n: usize, metric: impl Fn(&GameAggregate) -> K) -> Vec<RankedGame> {
    let mut games: Vec<&GameAggregate> = stats.games.iter().collect();
    games.sort_by(|a, b| metric(b).cmp(&metric(a)));
    games.truncate(n);
    games.into_iter().map(ranked).collect()
}

/// The n most played games by play count, descending.
pub fn top_by_count(stats: &PlayStats, n: usize) -> Vec<RankedGame> {
    top_by(stats, n, |game| game.play_count)
}

/// The n most played games by minutes played, descending.
pub fn top_by_time(stats: &PlayStats, n: usize) -> Vec<RankedGame> {
    top_by(stats, n, |game| game.total_minutes)
}

/// Every date tied for the most plays, chronological.
pub fn most_played_days(stats: &PlayStats) -> Vec<DayPlays> {
    let Some(max) = stats.days.values().copied().max() else {
        return Vec::new();
    };

    stats
        .days
        .iter()
        .filter(|(_, &plays)| plays == max)
        .map(|(&date, &plays)| DayPlays { date, plays })
        .collect()
}

/// The calendar month with the most plays; the earliest month wins ties.
pub fn most_played_month(stats: &PlayStats) -> Option<MonthPlays> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, &plays) in stats.months.iter().enumerate() {
        if plays > 0 && best.map_or(true, |(_, top)| plays > top) {
            best = Some((slot, plays));
        }
    }

    best.map(|(slot, plays)| MonthPlays {
        month: MONTH_NAMES[slot].to_string(),
        play_count: plays,
    })
}
