//! Typed schema for the plays feed and the pagination driver
//!
//! The feed is XML with one `<plays total=".." page="..">` document per page
//! and one `<play>` element per logged play. A page holding a single play is
//! still a one-element list after deserialization. A bad username comes back
//! as an HTML error box under HTTP 200, so the marker is checked before the
//! document is parsed.

use bgrecap_common::{GameId, PlayRecord, RecapError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::feed::PlayFeed;

/// Fixed page size of the plays feed
pub const PAGE_SIZE: u64 = 100;

/// One parsed, validated page of the plays feed
#[derive(Debug, Clone)]
pub struct PlaysPage {
    /// Total record count reported by the feed (meaningful on page 1)
    pub total: u64,
    /// Page number this response covers
    pub page: u32,
    /// Validated records in feed order
    pub plays: Vec<PlayRecord>,
}

/// Raw wire shape of a plays page
#[derive(Debug, Deserialize)]
struct PlaysDocument {
    #[serde(rename = "@total")]
    total: u64,
    #[serde(rename = "@page", default = "first_page")]
    page: u32,
    #[serde(rename = "play", default)]
    plays: Vec<RawPlay>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct RawPlay {
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@quantity")]
    quantity: u32,
    #[serde(rename = "@length")]
    length: u32,
    item: RawPlayItem,
}

#[derive(Debug, Deserialize)]
struct RawPlayItem {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@objectid")]
    object_id: String,
}

/// The error box BGG serves under HTTP 200 for an unknown username
#[derive(Debug, Deserialize)]
struct MessageBox {
    #[serde(rename = "@class")]
    class: String,
}

impl RawPlay {
    fn into_record(self) -> Result<PlayRecord> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            RecapError::decode_with_source(format!("unparseable play date {:?}", self.date), e)
        })?;

        Ok(PlayRecord {
            game_id: GameId::from(self.item.object_id),
            game_name: self.item.name,
            date,
            length_minutes: self.length,
            // The feed should never report less than one play per record;
            // coerce a stray 0 instead of failing the whole year.
            quantity: self.quantity.max(1),
        })
    }
}

/// Parse one plays-feed response body into a validated page.
///
/// Checks the bad-username error marker first: a successful HTTP status does
/// not guarantee valid data.
pub fn parse_plays_page(body: &str) -> Result<PlaysPage> {
    if let Ok(marker) = quick_xml::de::from_str::<MessageBox>(body) {
        if marker.class == "messagebox error" {
            return Err(RecapError::NotFound);
        }
    }

    let document: PlaysDocument = quick_xml::de::from_str(body)
        .map_err(|e| RecapError::decode_with_source("malformed plays feed response", e))?;

    let plays = document
        .plays
        .into_iter()
        .map(RawPlay::into_record)
        .collect::<Result<Vec<_>>>()?;

    Ok(PlaysPage {
        total: document.total,
        page: document.page,
        plays,
    })
}

/// Fetch every page of plays for the user and year, in page order.
///
/// The reported total is read from page 1 only; subsequent pages are fetched
/// sequentially until the fetched counter (advancing by the fixed page size)
/// reaches it. Any page failure aborts the whole operation with no partial
/// result.
#[instrument(skip(feed))]
pub async fn fetch_all_plays<F: PlayFeed>(
    feed: &F,
    username: &str,
    year: i32,
) -> Result<Vec<PlayRecord>> {
    let first = feed.fetch_plays_page(username, year, 1).await?;
    if first.total == 0 {
        return Err(RecapError::NotFound);
    }

    let total = first.total;
    let mut records = first.plays;
    let mut fetched = PAGE_SIZE;
    let mut page = 2;

    while fetched < total {
        debug!(page, fetched, total, "fetching next plays page");
        let next = feed.fetch_plays_page(username, year, page).await?;
        records.extend(next.plays);
        fetched += PAGE_SIZE;
        page += 1;
    }

    info!(total, records = records.len(), "fetched all plays");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const TWO_PLAYS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<plays username="alice" userid="42" total="2" page="1">
    <play id="101" date="2023-04-12" quantity="1" length="75" incomplete="0" nowinstats="0" location="">
        <item name="Wingspan" objecttype="thing" objectid="266192">
            <subtypes><subtype value="boardgame"/></subtypes>
        </item>
    </play>
    <play id="102" date="2023-04-13" quantity="2" length="0" incomplete="0" nowinstats="0" location="">
        <item name="Azul" objecttype="thing" objectid="230802">
            <subtypes><subtype value="boardgame"/></subtypes>
        </item>
    </play>
</plays>"#;

    const SINGLE_PLAY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<plays username="alice" userid="42" total="150" page="2">
    <play id="103" date="2023-06-01" quantity="1" length="30">
        <item name="Patchwork" objecttype="thing" objectid="163412"/>
    </play>
</plays>"#;

    const BAD_USERNAME: &str =
        r#"<div class="messagebox error">Invalid object or user</div>"#;

    #[test]
    fn test_parse_plays_page() {
        let page = parse_plays_page(TWO_PLAYS).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.plays.len(), 2);

        let first = &page.plays[0];
        assert_eq!(first.game_id, GameId::from("266192"));
        assert_eq!(first.game_name, "Wingspan");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 4, 12).unwrap());
        assert_eq!(first.length_minutes, 75);
        assert_eq!(first.quantity, 1);

        // Unknown duration comes through as 0
        assert_eq!(page.plays[1].length_minutes, 0);
        assert_eq!(page.plays[1].quantity, 2);
    }

    #[test]
    fn test_single_play_page_is_one_element_list() {
        let page = parse_plays_page(SINGLE_PLAY).unwrap();
        assert_eq!(page.total, 150);
        assert_eq!(page.page, 2);
        assert_eq!(page.plays.len(), 1);
        assert_eq!(page.plays[0].game_name, "Patchwork");
    }

    #[test]
    fn test_error_marker_is_not_found() {
        assert!(matches!(
            parse_plays_page(BAD_USERNAME),
            Err(RecapError::NotFound)
        ));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        assert!(matches!(
            parse_plays_page("<plays><play></plays>"),
            Err(RecapError::Decode { .. })
        ));
        assert!(matches!(
            parse_plays_page(r#"<div class="messagebox">note</div>"#),
            Err(RecapError::Decode { .. })
        ));
    }

    #[test]
    fn test_unparseable_date_is_decode_error() {
        let body = r#"<plays total="1" page="1">
            <play id="1" date="not-a-date" quantity="1" length="10">
                <item name="X" objectid="9"/>
            </play>
        </plays>"#;
        assert!(matches!(
            parse_plays_page(body),
            Err(RecapError::Decode { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_coerced_to_one() {
        let body = r#"<plays total="1" page="1">
            <play id="1" date="2023-01-01" quantity="0" length="10">
                <item name="X" objectid="9"/>
            </play>
        </plays>"#;
        let page = parse_plays_page(body).unwrap();
        assert_eq!(page.plays[0].quantity, 1);
    }

    fn record(id: &str, date: &str) -> PlayRecord {
        PlayRecord {
            game_id: GameId::from(id),
            game_name: format!("game {id}"),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            length_minutes: 0,
            quantity: 1,
        }
    }

    fn page_of(total: u64, page: u32, count: usize) -> PlaysPage {
        PlaysPage {
            total,
            page,
            plays: (0..count)
                .map(|i| record(&format!("{page}-{i}"), "2023-03-01"))
                .collect(),
        }
    }

    /// In-memory play feed serving canned pages, recording requested page
    /// numbers, with an optional page that fails.
    struct FakePlayFeed {
        pages: Vec<PlaysPage>,
        fail_on_page: Option<(u32, u16)>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakePlayFeed {
        fn new(pages: Vec<PlaysPage>) -> Self {
            Self {
                pages,
                fail_on_page: None,
                requested: RefCell::new(Vec::new()),
            }
        }

        fn failing_at(mut self, page: u32, status: u16) -> Self {
            self.fail_on_page = Some((page, status));
            self
        }
    }

    impl PlayFeed for FakePlayFeed {
        async fn fetch_plays_page(
            &self,
            _username: &str,
            _year: i32,
            page: u32,
        ) -> Result<PlaysPage> {
            self.requested.borrow_mut().push(page);
            if let Some((fail_page, status)) = self.fail_on_page {
                if page == fail_page {
                    return Err(RecapError::upstream(status));
                }
            }
            Ok(self.pages[(page - 1) as usize].clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_all_plays_two_pages() {
        let feed = FakePlayFeed::new(vec![page_of(150, 1, 100), page_of(150, 2, 50)]);
        let records = fetch_all_plays(&feed, "alice", 2023).await.unwrap();

        assert_eq!(records.len(), 150);
        assert_eq!(*feed.requested.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_plays_single_page() {
        let feed = FakePlayFeed::new(vec![page_of(100, 1, 100)]);
        let records = fetch_all_plays(&feed, "alice", 2023).await.unwrap();

        assert_eq!(records.len(), 100);
        assert_eq!(*feed.requested.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn test_fetch_all_plays_zero_total_is_not_found() {
        let feed = FakePlayFeed::new(vec![page_of(0, 1, 0)]);
        assert!(matches!(
            fetch_all_plays(&feed, "alice", 2023).await,
            Err(RecapError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_fetch_all_plays_page_failure_aborts() {
        let feed = FakePlayFeed::new(vec![
            page_of(250, 1, 100),
            page_of(250, 2, 100),
            page_of(250, 3, 50),
        ])
        .failing_at(2, 500);

        let err = fetch_all_plays(&feed, "alice", 2023).await.unwrap_err();
        assert!(matches!(err, RecapError::Upstream { status: 500 }));
        // Nothing after the failing page was requested
        assert_eq!(*feed.requested.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_plays_total_read_from_page_one_only() {
        // Later pages report a bogus total; the driver must ignore it.
        let mut second = page_of(150, 2, 50);
        second.total = 9999;
        let feed = FakePlayFeed::new(vec![page_of(150, 1, 100), second]);

        let records = fetch_all_plays(&feed, "alice", 2023).await.unwrap();
        assert_eq!(records.len(), 150);
        assert_eq!(*feed.requested.borrow(), vec![1, 2]);
    }
}
