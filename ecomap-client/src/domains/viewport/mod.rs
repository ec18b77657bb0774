//! Viewport domain - "user reached the end of the list" detection

use crate::domains::list::{ListSynchronizer, PageRequest};
use ecomap_contracts::prelude::LoadMoreButton;
use tracing::debug;

/// The two affordances that request the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Sentinel,
    Manual,
}

/// Watches the sentinel row that trails the rendered list.
///
/// Only a transition from hidden to visible counts; a sentinel that stays
/// on screen does not keep requesting pages.
#[derive(Debug, Clone)]
pub struct ViewportLoader {
    threshold: f64,
    visible: bool,
}

impl Default for ViewportLoader {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl ViewportLoader {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record a new intersection ratio; true when it crosses into visible.
    pub fn observe(&mut self, ratio: f64) -> bool {
        let now_visible = ratio >= self.threshold && ratio > 0.0;
        let entered = now_visible && !self.visible;
        self.visible = now_visible;
        entered
    }

    /// Sentinel observation: request more on entering the viewport.
    pub fn on_sentinel(
        &mut self,
        ratio: f64,
        sync: &mut ListSynchronizer,
    ) -> Option<PageRequest> {
        if self.observe(ratio) {
            self.request_more(Trigger::Sentinel, sync)
        } else {
            None
        }
    }

    /// The single "request more" action behind both affordances.
    pub fn request_more(
        &self,
        trigger: Trigger,
        sync: &mut ListSynchronizer,
    ) -> Option<PageRequest> {
        let request = sync.load_more();
        if request.is_none() {
            debug!(
                ?trigger,
                loading = sync.is_loading(),
                has_more = sync.has_more(),
                "request for more ignored"
            );
        }
        request
    }

    pub fn button(sync: &ListSynchronizer) -> LoadMoreButton {
        if sync.is_loading() {
            LoadMoreButton::Loading
        } else if !sync.has_more() {
            LoadMoreButton::Exhausted
        } else {
            LoadMoreButton::Ready
        }
    }
}
