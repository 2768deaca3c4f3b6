//! The year-in-review boundary operation
//!
//! Two sequential fetch stages connected by an explicit derived id set:
//! plays are paged in and aggregated, the ranked results determine which
//! games need enrichment, and the final summary is pure composition.

use bgrecap_bgg::{fetch_all_plays, DetailFeed, PlayFeed};
use bgrecap_common::{validate_non_empty, GameId, RecapError, Result};
use tracing::{info, instrument};

use crate::aggregator::aggregate_plays;
use crate::enrichment::tally_enrichment;
use crate::ranking::{most_played_days, most_played_month, top_by_count, top_by_time, TOP_GAMES};
use crate::summary::YearSummary;

/// Years the plays feed can meaningfully answer for
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1970..=2100;

/// Compute the year-in-review summary for one user and year.
///
/// Fails with `BadRequest` on malformed input, `NotFound` for an unknown
/// user or a year without plays, and `Upstream`/`Decode`/`Network` when the
/// feeds misbehave. There is no partial result: any feed failure aborts the
/// whole computation.
#[instrument(skip(feed))]
pub async fn year_in_review<F>(feed: &F, username: &str, year: i32) -> Result<YearSummary>
where
    F: PlayFeed + DetailFeed,
{
    let username = validate_non_empty(username, "username")?.to_lowercase();
    if !YEAR_RANGE.contains(&year) {
        return Err(RecapError::bad_request(format!(
            "year {year} is out of range"
        )));
    }

    let records = fetch_all_plays(feed, &username, year).await?;
    let stats = aggregate_plays(&records);

    let most_played_by_count = top_by_count(&stats, TOP_GAMES);
    let most_played_by_time = top_by_time(&stats, TOP_GAMES);

    // Union of ranked ids plus the longest session's game, first-encounter
    // order, deduplicated.
    let mut game_ids: Vec<GameId> = Vec::new();
    let referenced = most_played_by_count
        .iter()
        .map(|game| &game.id)
        .chain(most_played_by_time.iter().map(|game| &game.id))
        .chain(stats.longest.iter().map(|session| &session.id));
    for id in referenced {
        if !game_ids.contains(id) {
            game_ids.push(id.clone());
        }
    }

    let details = feed.fetch_game_details(&game_ids).await?;
    let enrichment = tally_enrichment(&details);

    info!(
        total_played = stats.total_played,
        unique_played = stats.unique_played(),
        enriched = game_ids.len(),
        "year in review computed"
    );

    Ok(YearSummary {
        total_played: stats.total_played,
        unique_played: stats.unique_played(),
        total_time_played: stats.total_time_played,
        days_most_played: most_played_days(&stats),
        month_most_played: most_played_month(&stats),
        days_played: stats.days_played(),
        longest_play_session: stats.longest,
        most_played_by_count,
        most_played_by_time,
        categories: enrichment.categories,
        mechanics: enrichment.mechanics,
        images: enrichment.images,
    })
}
