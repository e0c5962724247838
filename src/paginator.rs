use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

pub const DEFAULT_RECENT_POST_COUNT: usize = 3;
pub const DEFAULT_POST_PER_PAGE: usize = 6;

/// What to return when a page window holds fewer than `post_per_page` items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnderFullPage {
    /// Replace the window with the last `post_per_page` items of the whole list.
    /// Posts already shown on an earlier page can show up again.
    #[default]
    FillFromEnd,
    /// Return the window as is, possibly empty.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub recent_post_count: usize,
    pub post_per_page: usize,
    pub under_full_page: UnderFullPage,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            recent_post_count: DEFAULT_RECENT_POST_COUNT,
            post_per_page: DEFAULT_POST_PER_PAGE,
            under_full_page: UnderFullPage::FillFromEnd,
        }
    }
}

/// Navigation state for one list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNav {
    pub page: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Splits an already sorted list into the recent items and the fixed size pages after them.
pub struct Paginator<'a, T> {
    items: &'a [T],
    settings: PageSettings,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], settings: PageSettings) -> Self {
        let page_size = settings.post_per_page;
        let page_count = if page_size == 0 || items.len() <= settings.recent_post_count {
            0
        } else {
            let paged = items.len() - settings.recent_post_count;
            let full_pages = paged / page_size;
            if paged % page_size != 0 {
                full_pages + 1
            } else {
                full_pages
            }
        };

        Paginator {
            items,
            settings,
            page_count: page_count as u32,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn recent(&self) -> &'a [T] {
        let end = self.settings.recent_post_count.min(self.items.len());
        &self.items[..end]
    }

    /// Returns page `page` (1-based) of the items after the recent ones.
    pub fn get_page(&self, page: u32) -> Result<&'a [T]> {
        if page == 0 {
            return Err(BlogError::InvalidPageNumber(page));
        }

        let len = self.items.len();
        let page_size = self.settings.post_per_page;
        let start = (page as usize - 1)
            .checked_mul(page_size)
            .and_then(|skip| skip.checked_add(self.settings.recent_post_count))
            .unwrap_or(usize::MAX);

        let window = if start >= len {
            &self.items[len..]
        } else {
            let end = start.saturating_add(page_size).min(len);
            &self.items[start..end]
        };

        if window.len() >= page_size {
            return Ok(window);
        }

        match self.settings.under_full_page {
            UnderFullPage::FillFromEnd => Ok(&self.items[len.saturating_sub(page_size)..]),
            UnderFullPage::Partial => Ok(window),
        }
    }

    pub fn nav(&self, page: u32) -> Result<PageNav> {
        if page == 0 {
            return Err(BlogError::InvalidPageNumber(page));
        }

        Ok(PageNav {
            page,
            total_pages: self.page_count,
            has_previous: page > 1,
            has_next: page < self.page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(recent_post_count: usize, post_per_page: usize, under_full_page: UnderFullPage) -> PageSettings {
        PageSettings {
            recent_post_count,
            post_per_page,
            under_full_page,
        }
    }

    #[test]
    fn test_happy_case() {
        let items: Vec<u32> = (1..=15).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.recent(), &[1, 2, 3]);
        assert_eq!(paginator.get_page(1).unwrap(), &[4, 5, 6, 7, 8, 9]);
        assert_eq!(paginator.get_page(2).unwrap(), &[10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_exact_fit() {
        let items: Vec<u32> = (1..=9).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.get_page(1).unwrap(), &[4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_under_full_fills_from_end() {
        let items: Vec<u32> = (1..=7).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.get_page(1).unwrap(), &[2, 3, 4, 5, 6, 7]);

        let items: Vec<u32> = (1..=11).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.get_page(2).unwrap(), &[6, 7, 8, 9, 10, 11]);
        // Beyond the last page
        assert_eq!(paginator.get_page(7).unwrap(), &[6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_under_full_partial() {
        let items: Vec<u32> = (1..=11).collect();
        let paginator = Paginator::from(&items, settings(3, 6, UnderFullPage::Partial));
        assert_eq!(paginator.get_page(2).unwrap(), &[10, 11]);
        assert!(paginator.get_page(3).unwrap().is_empty());
    }

    #[test]
    fn test_small_corpus() {
        let items: Vec<u32> = vec![1, 2];
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(paginator.recent(), &[1, 2]);
        assert_eq!(paginator.get_page(1).unwrap(), &[1, 2]);

        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.get_page(1).unwrap().is_empty());
    }

    #[test]
    fn test_other_sizes() {
        let items: Vec<u32> = (1..=10).collect();
        let paginator = Paginator::from(&items, settings(1, 4, UnderFullPage::FillFromEnd));
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.recent(), &[1]);
        assert_eq!(paginator.get_page(1).unwrap(), &[2, 3, 4, 5]);
        assert_eq!(paginator.get_page(3).unwrap(), &[7, 8, 9, 10]);
    }

    #[test]
    fn test_page_zero() {
        let items: Vec<u32> = (1..=10).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert!(matches!(paginator.get_page(0), Err(BlogError::InvalidPageNumber(0))));
        assert!(matches!(paginator.nav(0), Err(BlogError::InvalidPageNumber(0))));
    }

    #[test]
    fn test_nav() {
        let items: Vec<u32> = (1..=20).collect();
        let paginator = Paginator::from(&items, PageSettings::default());
        assert_eq!(paginator.page_count(), 3);

        let nav = paginator.nav(1).unwrap();
        assert!(!nav.has_previous);
        assert!(nav.has_next);

        let nav = paginator.nav(3).unwrap();
        assert_eq!(nav.total_pages, 3);
        assert!(nav.has_previous);
        assert!(!nav.has_next);
    }
}
