//! Carousel state machine with circular indexing and auto-advance.
//!
//! The controller is told the item count and items-per-view; it never
//! inspects a viewport itself. Navigation wraps circularly, slide counts
//! are recomputed on every layout change, and the current slide is
//! clamped whenever the slide count shrinks.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use crate::config::CarouselConfig;
use crate::constants::{MEDIUM_ITEMS_PER_VIEW_CAP, NARROW_ITEMS_PER_VIEW};

/// Coarse viewport class the host maps breakpoints onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Medium,
    Wide,
}

/// Items shown per view for a viewport class given the configured count.
#[must_use]
pub fn items_per_view_for(class: ViewportClass, configured: usize) -> usize {
    let configured = configured.max(1);
    match class {
        ViewportClass::Narrow => NARROW_ITEMS_PER_VIEW,
        ViewportClass::Medium => configured.min(MEDIUM_ITEMS_PER_VIEW_CAP),
        ViewportClass::Wide => configured,
    }
}

/// Slide count for an item count and items-per-view, never below 1.
#[must_use]
pub fn total_slides(item_count: usize, items_per_view: usize) -> usize {
    let per_view = items_per_view.max(1);
    item_count.div_ceil(per_view).max(1)
}

/// Published carousel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub item_count: usize,
    pub items_per_view: usize,
    pub current_slide: usize,
    pub total_slides: usize,
    pub auto_playing: bool,
}

#[derive(Debug)]
struct Inner {
    item_count: usize,
    items_per_view: usize,
    current_slide: usize,
    auto_playing: bool,
}

impl Inner {
    fn total_slides(&self) -> usize {
        total_slides(self.item_count, self.items_per_view)
    }

    fn clamp_current(&mut self) {
        let total = self.total_slides();
        if self.current_slide >= total {
            self.current_slide = total - 1;
        }
    }
}

/// Circular slide navigation with an optional auto-advance timer.
///
/// The timer task is owned by the controller instance: it is aborted on
/// every transition out of auto-play and on drop, so re-mounting a view
/// never leaks a ticking timer.
pub struct CarouselController {
    state: Arc<Mutex<Inner>>,
    autoplay_enabled: bool,
    interval: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl CarouselController {
    /// Create a controller. Starts auto-playing when configured to and
    /// there is more than one slide.
    #[must_use]
    pub fn new(item_count: usize, items_per_view: usize, config: &CarouselConfig) -> Self {
        let state = Arc::new(Mutex::new(Inner {
            item_count,
            items_per_view: items_per_view.max(1),
            current_slide: 0,
            auto_playing: false,
        }));

        let controller = Self {
            state,
            autoplay_enabled: config.autoplay,
            interval: Duration::from_millis(config.autoplay_interval_ms),
            timer: Mutex::new(None),
        };
        controller.resume();
        controller
    }

    /// Clone the current position.
    #[must_use]
    pub fn snapshot(&self) -> CarouselState {
        if let Ok(inner) = self.state.lock() {
            CarouselState {
                item_count: inner.item_count,
                items_per_view: inner.items_per_view,
                current_slide: inner.current_slide,
                total_slides: inner.total_slides(),
                auto_playing: inner.auto_playing,
            }
        } else {
            CarouselState {
                item_count: 0,
                items_per_view: 1,
                current_slide: 0,
                total_slides: 1,
                auto_playing: false,
            }
        }
    }

    #[must_use]
    pub fn current_slide(&self) -> usize {
        self.snapshot().current_slide
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.snapshot().total_slides
    }

    #[must_use]
    pub fn is_auto_playing(&self) -> bool {
        self.snapshot().auto_playing
    }

    /// Advance one slide, wrapping past the end. No-op with one slide.
    pub fn go_next(&self) {
        Self::advance(&self.state, 1);
    }

    /// Step back one slide, wrapping past the start. No-op with one slide.
    pub fn go_prev(&self) {
        Self::advance(&self.state, -1);
    }

    /// Jump to a slide, clamping out-of-range input into bounds.
    pub fn go_to(&self, index: usize) {
        if let Ok(mut inner) = self.state.lock() {
            let total = inner.total_slides();
            inner.current_slide = index.min(total - 1);
        }
    }

    /// Tell the controller the item count changed (new fetch results).
    pub fn on_item_count_changed(&self, new_count: usize) {
        if let Ok(mut inner) = self.state.lock() {
            inner.item_count = new_count;
            inner.clamp_current();
        }
    }

    /// Tell the controller the responsive layout changed.
    pub fn on_items_per_view_changed(&self, new_per_view: usize) {
        if let Ok(mut inner) = self.state.lock() {
            inner.items_per_view = new_per_view.max(1);
            inner.clamp_current();
        }
    }

    /// Stop auto-advance and cancel its timer.
    pub fn pause(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(task) = timer.take() {
                task.abort();
            }
        }
        if let Ok(mut inner) = self.state.lock() {
            if inner.auto_playing {
                debug!("carousel auto-advance paused");
            }
            inner.auto_playing = false;
        }
    }

    /// Re-enter auto-play if it is configured and there is anything to
    /// advance through. Otherwise stays idle. Safe to call again after
    /// every item-count or layout change; an already-running timer is
    /// left alone.
    pub fn resume(&self) {
        if !self.autoplay_enabled {
            return;
        }

        let should_play = self
            .state
            .lock()
            .map(|inner| inner.total_slides() > 1)
            .unwrap_or(false);
        if !should_play {
            return;
        }

        if let Ok(mut timer) = self.timer.lock() {
            if timer.is_some() {
                return;
            }

            if let Ok(mut inner) = self.state.lock() {
                inner.auto_playing = true;
            }

            let state = Arc::clone(&self.state);
            let interval = self.interval;
            debug!("carousel auto-advance started, interval {interval:?}");
            *timer = Some(tokio::spawn(async move {
                loop {
                    tokio::time::sleep(interval).await;
                    Self::advance(&state, 1);
                }
            }));
        }
    }

    fn advance(state: &Arc<Mutex<Inner>>, direction: i64) {
        if let Ok(mut inner) = state.lock() {
            let total = inner.total_slides();
            if total <= 1 {
                return;
            }
            let total = total as i64;
            let next = (inner.current_slide as i64 + direction + total) % total;
            inner.current_slide = next as usize;
        }
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        // Cancel the timer when the controller is dropped
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(task) = timer.take() {
                task.abort();
            }
        }
    }
}
