//! Tallies over fetched game details: cover images and the most shared
//! categories and mechanics
//!
//! A tally counts referenced games carrying a tag, not logged plays. The
//! first occurrence of a tag id establishes its display name and its
//! position for tie-breaking.

use bgrecap_bgg::{GameDetail, TagLink};
use bgrecap_common::GameId;
use std::collections::HashMap;

use crate::ranking::TOP_TAGS;
use crate::summary::TagTally;

/// Enrichment data derived from one batch of game details
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub images: HashMap<GameId, String>,
    pub categories: Vec<TagTally>,
    pub mechanics: Vec<TagTally>,
}

/// First-seen-ordered tag counter
#[derive(Debug, Default)]
struct TagCounter {
    tallies: Vec<TagTally>,
    index: HashMap<String, usize>,
}

impl TagCounter {
    fn add(&mut self, tag: &TagLink) {
        match self.index.get(&tag.id) {
            Some(&slot) => self.tallies[slot].game_count += 1,
            None => {
                self.index.insert(tag.id.clone(), self.tallies.len());
                self.tallies.push(TagTally {
                    id: tag.id.clone(),
                    name: tag.name.clone(),
                    game_count: 1,
                });
            }
        }
    }

    fn top(mut self, n: usize) -> Vec<TagTally> {
        self.tallies
            .sort_by(|a, b| b.game_count.cmp(&a.game_count));
        self.tallies.truncate(n);
        self.tallies
    }
}

/// Derive images and top-3 category/mechanic tallies from game details.
pub fn tally_enrichment(details: &[GameDetail]) -> Enrichment {
    let mut images = HashMap::new();
    let mut categories = TagCounter::default();
    let mut mechanics = TagCounter::default();

    for detail in details {
        if let Some(image) = &detail.image {
            images.insert(detail.game_id.clone(), image.clone());
        }
        for tag in &detail.categories {
            categories.add(tag);
        }
        for tag in &detail.mechanics {
            mechanics.add(tag);
        }
    }

    Enrichment {
        images,
        categories: categories.top(TOP_TAGS),
        mechanics: mechanics.top(TOP_TAGS),
    }
}
