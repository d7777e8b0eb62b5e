//! Debounced text search combined with a categorical tab filter.
//!
//! Typed queries are applied after a debounce delay (the timer restarts
//! on every keystroke); tab switches are discrete user choices and apply
//! immediately, even while a query timer is pending.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::constants::{TAB_ACTIVE, TAB_ALL, TAB_INACTIVE};

/// Activation status carried by filterable items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    Active,
    Inactive,
}

/// One filterable entry (a block listing, a template choice, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchItem {
    pub name: String,
    pub status: ItemStatus,
}

impl SearchItem {
    #[must_use]
    pub fn new(name: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Which tab of items is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterTab {
    #[default]
    All,
    Active,
    Inactive,
}

impl FilterTab {
    /// Parse a tab id string; unknown ids fall back to `All`.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            TAB_ACTIVE => Self::Active,
            TAB_INACTIVE => Self::Inactive,
            _ => Self::All,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => TAB_ALL,
            Self::Active => TAB_ACTIVE,
            Self::Inactive => TAB_INACTIVE,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Applied {
    query: String,
    tab: FilterTab,
}

/// Debounced search + tab filter producing a visible-subset predicate.
pub struct SearchFilter {
    applied: Arc<Mutex<Applied>>,
    debounce: Duration,
    timer: Option<JoinHandle<()>>,
}

impl SearchFilter {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            applied: Arc::new(Mutex::new(Applied::default())),
            debounce: Duration::from_millis(config.debounce_ms),
            timer: None,
        }
    }

    /// Set the text query after the debounce delay.
    ///
    /// Each call cancels the previous pending timer, so only the last
    /// value typed within the window is ever applied.
    pub fn set_query(&mut self, text: &str) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let applied = Arc::clone(&self.applied);
        let debounce = self.debounce;
        let text = text.to_string();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            debug!("applying debounced query '{text}'");
            if let Ok(mut applied) = applied.lock() {
                applied.query = text;
            }
        }));
    }

    /// Set the text query immediately, cancelling any pending timer.
    pub fn set_query_now(&mut self, text: &str) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if let Ok(mut applied) = self.applied.lock() {
            applied.query = text.to_string();
        }
    }

    /// Switch tabs. Applies immediately, no debounce.
    pub fn set_tab(&mut self, tab: FilterTab) {
        if let Ok(mut applied) = self.applied.lock() {
            applied.tab = tab;
        }
    }

    /// The currently applied (post-debounce) query.
    #[must_use]
    pub fn query(&self) -> String {
        self.applied.lock().map(|a| a.query.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn tab(&self) -> FilterTab {
        self.applied.lock().map(|a| a.tab).unwrap_or_default()
    }

    /// Whether one item passes the current tab + query filter.
    #[must_use]
    pub fn is_visible(&self, item: &SearchItem) -> bool {
        let applied = match self.applied.lock() {
            Ok(applied) => applied.clone(),
            Err(_) => return true,
        };

        let tab_matches = match applied.tab {
            FilterTab::All => true,
            FilterTab::Active => item.status == ItemStatus::Active,
            FilterTab::Inactive => item.status == ItemStatus::Inactive,
        };
        if !tab_matches {
            return false;
        }

        let query = applied.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        normalize_name(&item.name).contains(&query)
    }

    /// Filter a slice down to its visible subset.
    #[must_use]
    pub fn visible<'a>(&self, items: &'a [SearchItem]) -> Vec<&'a SearchItem> {
        items.iter().filter(|item| self.is_visible(item)).collect()
    }
}

impl Drop for SearchFilter {
    fn drop(&mut self) {
        // Cancel the pending debounce timer when the filter is dropped
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Lowercase and replace hyphens with spaces, so "shop-banner" matches
/// a query of "shop banner".
fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('-', " ")
}
