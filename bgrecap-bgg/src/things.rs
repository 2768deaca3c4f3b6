//! Typed schema for the thing (game detail) feed
//!
//! One batched response carries every requested game: its cover image plus
//! typed links, of which only category and mechanic links are kept.

use bgrecap_common::{GameId, RecapError, Result};
use serde::Deserialize;

const CATEGORY_LINK: &str = "boardgamecategory";
const MECHANIC_LINK: &str = "boardgamemechanic";

/// A category or mechanic attached to a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLink {
    pub id: String,
    pub name: String,
}

/// Detail record for one game as returned by the thing feed
#[derive(Debug, Clone)]
pub struct GameDetail {
    pub game_id: GameId,
    pub image: Option<String>,
    pub categories: Vec<TagLink>,
    pub mechanics: Vec<TagLink>,
}

/// Raw wire shape of the thing feed
#[derive(Debug, Deserialize)]
struct ItemsDocument {
    #[serde(rename = "item", default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "@id")]
    id: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "@type")]
    link_type: String,
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@value")]
    value: String,
}

impl RawItem {
    fn into_detail(self) -> GameDetail {
        let mut categories = Vec::new();
        let mut mechanics = Vec::new();

        for link in self.links {
            let tag = TagLink {
                id: link.id,
                name: link.value,
            };
            match link.link_type.as_str() {
                CATEGORY_LINK => categories.push(tag),
                MECHANIC_LINK => mechanics.push(tag),
                _ => {}
            }
        }

        GameDetail {
            game_id: GameId::from(self.id),
            image: self.image,
            categories,
            mechanics,
        }
    }
}

/// Parse one thing-feed response body into detail records, in feed order.
pub fn parse_game_details(body: &str) -> Result<Vec<GameDetail>> {
    let document: ItemsDocument = quick_xml::de::from_str(body)
        .map_err(|e| RecapError::decode_with_source("malformed thing feed response", e))?;

    Ok(document.items.into_iter().map(RawItem::into_detail).collect())
}
