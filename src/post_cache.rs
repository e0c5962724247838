use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use spdlog::trace;

use crate::card::CardProps;

struct CacheValue {
    modified: SystemTime,
    card: Arc<CardProps>,
}

/// Cards keyed by post id. An entry is only valid while the post file keeps the
/// modification time it was built from.
pub struct PostCache {
    cards: Option<RwLock<HashMap<String, CacheValue>>>,
}

impl PostCache {
    pub fn new() -> Self {
        PostCache {
            cards: Some(RwLock::new(HashMap::new())),
        }
    }

    pub fn non_caching() -> Self {
        PostCache { cards: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.cards.is_some()
    }

    pub fn get(&self, id: &str, modified: SystemTime) -> Option<Arc<CardProps>> {
        let cards = self.cards.as_ref()?.read().ok()?;
        match cards.get(id) {
            Some(value) if value.modified == modified => {
                trace!("Card cache hit for {}", id);
                Some(value.card.clone())
            }
            _ => None,
        }
    }

    pub fn add(&self, id: &str, modified: SystemTime, card: CardProps) -> Arc<CardProps> {
        let card = Arc::new(card);
        if let Some(ref cards) = self.cards {
            if let Ok(mut cards) = cards.write() {
                cards.insert(id.to_string(), CacheValue {
                    modified,
                    card: card.clone(),
                });
            }
        }
        card
    }

    /// Drops the entries of posts that are no longer in `ids`.
    pub fn retain_ids(&self, ids: &[String]) {
        let Some(ref cards) = self.cards else {
            return;
        };

        let live: HashSet<&str> = ids.iter().map(String::as_str).collect();
        if let Ok(mut cards) = cards.write() {
            let before = cards.len();
            cards.retain(|id, _| live.contains(id.as_str()));
            if cards.len() != before {
                trace!("Evicted {} cards of removed posts", before - cards.len());
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.cards {
            Some(ref cards) => cards.read().map(|cards| cards.len()).unwrap_or(0),
            None => 0,
        }
    }
}

impl Default for PostCache {
    fn default() -> Self {
        Self::new()
    }
}
