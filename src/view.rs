//! Per-block view model exposed to the editor host.
//!
//! One [`BlockViewModel`] backs one consuming view: it owns the fetcher,
//! the carousel controller, the search filter, the toggle set and the
//! attribute store for that view, along with their timers. The host
//! holds the channels carrying attribute patches and fetch events, and
//! calls back into the bundle on user interaction.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::attributes::{AttributeBag, AttributePatch, AttributeStore, BlockKind};
use crate::carousel::{CarouselController, CarouselState};
use crate::config::Config;
use crate::error::BlockError;
use crate::fetcher::{FetchEvent, FetchState, ResourceFetcher};
use crate::logger::EventLog;
use crate::query::QuerySpec;
use crate::repository::{ContentRepository, Resource, ResourceType};
use crate::search::{FilterTab, SearchFilter, SearchItem};
use crate::toggles::ToggleSet;

impl BlockKind {
    /// Resource type a block kind lists, if it fetches at all.
    #[must_use]
    pub const fn resource_type(self) -> Option<ResourceType> {
        match self {
            Self::PostGrid | Self::PostCarousel | Self::PostSlider => Some(ResourceType::Post),
            Self::ProductCarousel => Some(ResourceType::Product),
            Self::Faq => None,
        }
    }
}

/// Receiving ends the host wires into its update loop.
pub struct HostChannels {
    pub patches: mpsc::UnboundedReceiver<AttributePatch>,
    pub fetch_events: mpsc::UnboundedReceiver<FetchEvent>,
}

/// Render-ready state bundle for one block view.
pub struct BlockViewModel {
    kind: BlockKind,
    attributes: AttributeStore,
    fetcher: ResourceFetcher,
    carousel: CarouselController,
    search: SearchFilter,
    toggles: ToggleSet,
    events: EventLog,
}

impl BlockViewModel {
    /// Build a view model for a block kind, validating the attribute bag
    /// against the kind's requirements.
    pub fn new(
        kind: BlockKind,
        bag: &AttributeBag,
        repository: Arc<dyn ContentRepository>,
        config: &Config,
    ) -> Result<(Self, HostChannels), BlockError> {
        let (attributes, patches) = AttributeStore::for_kind(kind, bag)?;
        let (fetcher, fetch_events) = ResourceFetcher::new(repository);
        let carousel = CarouselController::new(0, 1, &config.carousel);
        let search = SearchFilter::new(&config.search);

        Ok((
            Self {
                kind,
                attributes,
                fetcher,
                carousel,
                search,
                toggles: ToggleSet::new(),
                events: EventLog::new(),
            },
            HostChannels { patches, fetch_events },
        ))
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    // --- fetching -------------------------------------------------------

    /// Derive a query spec from the attribute bag and issue a fetch.
    pub async fn fetch_from_attributes(&self, bag: &AttributeBag, config: &Config) -> Result<(), BlockError> {
        let resource_type = self.kind.resource_type().ok_or_else(|| {
            BlockError::Configuration(format!("block kind '{}' does not fetch resources", self.kind.as_str()))
        })?;

        let spec = QuerySpec::from_attributes(resource_type, bag, &config.fetch)?;
        self.fetch(spec).await
    }

    /// Issue an explicit fetch.
    pub async fn fetch(&self, spec: QuerySpec) -> Result<(), BlockError> {
        self.fetcher.fetch(spec).await?;
        self.after_fetch().await;
        Ok(())
    }

    /// Re-issue the last spec unconditionally.
    pub async fn refetch(&self) -> Result<(), BlockError> {
        self.fetcher.refetch().await?;
        self.after_fetch().await;
        Ok(())
    }

    /// Fetch the next page in append mode.
    pub async fn load_more(&self) -> Result<(), BlockError> {
        self.fetcher.load_more().await?;
        self.after_fetch().await;
        Ok(())
    }

    pub async fn fetch_state(&self) -> FetchState {
        self.fetcher.snapshot().await
    }

    pub async fn items(&self) -> Vec<Resource> {
        self.fetcher.snapshot().await.items
    }

    pub async fn loading(&self) -> bool {
        self.fetcher.snapshot().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.fetcher.snapshot().await.error
    }

    /// Fold a finished fetch back into the bundle: the carousel learns
    /// the new item count (entering auto-play once there is enough to
    /// cycle through) and the debug feed gets its outcome line.
    async fn after_fetch(&self) {
        let state = self.fetcher.snapshot().await;
        self.carousel.on_item_count_changed(state.items.len());
        self.carousel.resume();

        match state.error {
            Some(message) => self.events.log(format!("fetch failed: {message}")),
            None => self.events.log(format!("fetch completed: {} item(s)", state.items.len())),
        }
    }

    /// Event feed a host debug panel can render.
    #[must_use]
    pub fn event_log(&self) -> EventLog {
        self.events.clone()
    }

    // --- carousel -------------------------------------------------------

    #[must_use]
    pub fn carousel(&self) -> CarouselState {
        self.carousel.snapshot()
    }

    pub fn go_next(&self) {
        self.carousel.go_next();
    }

    pub fn go_prev(&self) {
        self.carousel.go_prev();
    }

    pub fn go_to(&self, index: usize) {
        self.carousel.go_to(index);
    }

    pub fn pause(&self) {
        self.carousel.pause();
    }

    pub fn resume(&self) {
        self.carousel.resume();
    }

    /// Forward a responsive breakpoint change to the carousel.
    pub fn on_items_per_view_changed(&self, per_view: usize) {
        self.carousel.on_items_per_view_changed(per_view);
    }

    // --- toggles --------------------------------------------------------

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.toggles.has(id)
    }

    pub fn toggle(&mut self, id: &str) {
        self.toggles = self.toggles.toggle(id);
    }

    pub fn expand_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toggles = self.toggles.expand_all(ids);
    }

    pub fn collapse_all(&mut self) {
        self.toggles = self.toggles.collapse_all();
    }

    #[must_use]
    pub fn toggles(&self) -> &ToggleSet {
        &self.toggles
    }

    // --- search ---------------------------------------------------------

    pub fn set_query(&mut self, text: &str) {
        self.search.set_query(text);
    }

    pub fn set_tab(&mut self, tab: FilterTab) {
        self.search.set_tab(tab);
    }

    #[must_use]
    pub fn visible<'a>(&self, items: &'a [SearchItem]) -> Vec<&'a SearchItem> {
        self.search.visible(items)
    }

    // --- attributes -----------------------------------------------------

    pub fn update_attribute(&self, key: &str, value: Value) {
        self.attributes.update(key, value);
    }

    pub fn update_nested_attribute(&self, bag: &AttributeBag, parent_key: &str, child_key: &str, value: Value) {
        self.attributes.update_nested(bag, parent_key, child_key, value);
    }

    pub fn update_array_item(
        &self,
        bag: &AttributeBag,
        array_key: &str,
        index: usize,
        field: &str,
        value: Value,
    ) -> Result<(), BlockError> {
        self.attributes.update_array_item(bag, array_key, index, field, value)
    }

    pub fn add_array_item(&self, bag: &AttributeBag, array_key: &str, item: Value) {
        self.attributes.add_array_item(bag, array_key, item);
    }

    pub fn remove_array_item(&self, bag: &AttributeBag, array_key: &str, index: usize) -> Result<(), BlockError> {
        self.attributes.remove_array_item(bag, array_key, index)
    }

    // --- lifecycle ------------------------------------------------------

    /// Stop timers and mark any in-flight fetch stale.
    ///
    /// Dropping the view model has the same effect; this exists for
    /// hosts that dispose views explicitly before the drop happens.
    pub fn dispose(&mut self) {
        self.fetcher.invalidate();
        self.carousel.pause();
        self.events.log("view disposed".to_string());
    }
}
