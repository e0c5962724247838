use std::collections::HashSet;

use serde::Deserialize;
use spdlog::{debug, warn};

use crate::card::{project_to_card, CardProps};
use crate::error::{BlogError, Result};
use crate::paginator::{PageNav, PageSettings, Paginator};
use crate::post_cache::PostCache;
use crate::post_list::PostList;

/// What a listing over every post does with a post that fails to load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Log a warning and list the posts that did load.
    #[default]
    SkipInvalid,
    /// The first bad post fails the whole listing.
    FailFast,
}

/// Builds every list view of the blog (home feed, pages, tags) from the posts directory.
///
/// Nothing is kept between calls unless the card cache is enabled, so every
/// call sees the files as they are on disk.
pub struct PostProcessor {
    post_list: PostList,
    page_settings: PageSettings,
    batch_policy: BatchPolicy,
    cache: PostCache,
}

impl PostProcessor {
    pub fn new(post_list: PostList, page_settings: PageSettings) -> Self {
        PostProcessor {
            post_list,
            page_settings,
            batch_policy: BatchPolicy::default(),
            cache: PostCache::non_caching(),
        }
    }

    pub fn with_batch_policy(mut self, batch_policy: BatchPolicy) -> Self {
        self.batch_policy = batch_policy;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = if enabled { PostCache::new() } else { PostCache::non_caching() };
        self
    }

    pub fn post_list(&self) -> &PostList {
        &self.post_list
    }

    pub fn page_settings(&self) -> &PageSettings {
        &self.page_settings
    }

    fn load_card(&self, id: &str) -> Result<CardProps> {
        if !self.cache.is_enabled() {
            return project_to_card(&self.post_list, id);
        }

        let modified = self.post_list.modified(id)?;
        if let Some(card) = self.cache.get(id, modified) {
            return Ok(card.as_ref().clone());
        }
        let card = project_to_card(&self.post_list, id)?;
        Ok(self.cache.add(id, modified, card).as_ref().clone())
    }

    fn load_cards(&self) -> Result<Vec<CardProps>> {
        // A missing posts directory is always fatal
        let ids = self.post_list.list_post_ids()?;
        self.cache.retain_ids(&ids);

        let mut cards = Vec::with_capacity(ids.len());
        for id in ids {
            match self.load_card(&id) {
                Ok(card) => cards.push(card),
                Err(e) => match self.batch_policy {
                    BatchPolicy::FailFast => return Err(e),
                    BatchPolicy::SkipInvalid => warn!("Skipping post {}: {}", id, e),
                },
            }
        }

        debug!("Loaded {} cards", cards.len());
        Ok(cards)
    }

    /// Every card, most recent first. Posts sharing a date keep directory order.
    pub fn all_cards(&self) -> Result<Vec<CardProps>> {
        let mut cards = self.load_cards()?;
        cards.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(cards)
    }

    /// The most recent cards, shown apart from the paginated list.
    pub fn recent_cards(&self) -> Result<Vec<CardProps>> {
        let cards = self.all_cards()?;
        let paginator = Paginator::from(&cards, self.page_settings);
        Ok(paginator.recent().to_vec())
    }

    pub fn cards_for_page(&self, page: u32) -> Result<Vec<CardProps>> {
        if page == 0 {
            return Err(BlogError::InvalidPageNumber(page));
        }

        let cards = self.all_cards()?;
        let paginator = Paginator::from(&cards, self.page_settings);
        Ok(paginator.get_page(page)?.to_vec())
    }

    pub fn total_page_count(&self) -> Result<u32> {
        let cards = self.all_cards()?;
        Ok(Paginator::from(&cards, self.page_settings).page_count())
    }

    pub fn page_nav(&self, page: u32) -> Result<PageNav> {
        let cards = self.all_cards()?;
        Paginator::from(&cards, self.page_settings).nav(page)
    }

    /// Distinct tags over all cards, in the order they are first seen.
    pub fn all_tags(&self) -> Result<Vec<String>> {
        let cards = self.all_cards()?;

        let mut seen = HashSet::new();
        let tags = cards
            .into_iter()
            .flat_map(|card| card.tags)
            .filter(|tag| seen.insert(tag.clone()))
            .collect();
        Ok(tags)
    }

    /// Cards carrying exactly `tag`, most recent first. Unknown tags give an empty list.
    pub fn cards_for_tag(&self, tag: &str) -> Result<Vec<CardProps>> {
        let cards = self.all_cards()?;
        Ok(cards
            .into_iter()
            .filter(|card| card.tags.iter().any(|t| t == tag))
            .collect())
    }
}
