//! Slide selection state.
//!
//! The navigator owns every slide page (visibility, last observed viewport
//! metrics, scrollbar) and the sparse set of navigation markers. Exactly
//! one slide is visible once initialized. A slide without its own marker is
//! represented by the nearest marker at a lower index.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ScrollbarStyle;
use crate::scrollbar::{LineMetric, Scrollbar, ViewportMetrics};

#[derive(Debug, Clone)]
pub struct SlidePage {
    index: usize,
    hidden: bool,
    viewport: ViewportMetrics,
    scrollbar: Scrollbar,
}

impl SlidePage {
    fn new(index: usize, style: Arc<ScrollbarStyle>) -> Self {
        Self {
            index,
            hidden: true,
            viewport: ViewportMetrics::default(),
            scrollbar: Scrollbar::new(style),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    /// Last viewport observed while visible.
    pub fn viewport(&self) -> &ViewportMetrics {
        &self.viewport
    }

    /// A hidden page has no layout, so its viewport collapses.
    fn hide(&mut self) {
        self.hidden = true;
        self.viewport = ViewportMetrics::default();
    }

    fn refresh(&mut self, probe: &dyn LineMetric) {
        self.scrollbar.update(&self.viewport, probe);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationMarker {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug)]
pub struct SlideNavigator {
    style: Arc<ScrollbarStyle>,
    slides: Vec<SlidePage>,
    markers: BTreeMap<usize, NavigationMarker>,
    current: usize,
    /// Slide shown since the host last moved keyboard focus.
    focus_request: Option<usize>,
}

impl SlideNavigator {
    pub fn new(style: Arc<ScrollbarStyle>) -> Self {
        Self {
            style,
            slides: Vec::new(),
            markers: BTreeMap::new(),
            current: 0,
            focus_request: None,
        }
    }

    /// Register `slide_count` slides and the marker indices, hide every
    /// slide and show the first. Does nothing when there are no slides.
    pub fn initialize(
        &mut self,
        slide_count: usize,
        markers: impl IntoIterator<Item = usize>,
        probe: &dyn LineMetric,
    ) {
        if slide_count == 0 {
            debug!("No slides to navigate");
            return;
        }

        self.slides = (0..slide_count)
            .map(|i| SlidePage::new(i, Arc::clone(&self.style)))
            .collect();
        self.markers.clear();
        for index in markers {
            if index >= slide_count {
                warn!(index, slide_count, "Ignoring marker past the last slide");
                continue;
            }
            self.markers.insert(
                index,
                NavigationMarker {
                    index,
                    active: false,
                },
            );
        }
        debug!(
            slides = slide_count,
            markers = self.markers.len(),
            "Navigator initialized"
        );

        self.current = 0;
        self.show(0, probe);
    }

    pub fn is_initialized(&self) -> bool {
        !self.slides.is_empty()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn active_index(&self) -> usize {
        self.current
    }

    pub fn slide(&self, index: usize) -> Option<&SlidePage> {
        self.slides.get(index)
    }

    /// The one slide that is not hidden.
    pub fn visible(&self) -> Option<&SlidePage> {
        self.slides.iter().find(|page| !page.is_hidden())
    }

    /// Slide whose body should take keyboard focus, if it was shown since
    /// the last call.
    pub fn take_focus_request(&mut self) -> Option<usize> {
        self.focus_request.take()
    }

    /// Make `index` the visible slide.
    ///
    /// Callers must pass a registered index; marker clicks satisfy this by
    /// construction. An out-of-range index is rejected without changing state.
    pub fn set_active(&mut self, index: usize, probe: &dyn LineMetric) {
        debug_assert!(
            index < self.slides.len(),
            "slide {index} out of range ({} slides)",
            self.slides.len()
        );
        if index >= self.slides.len() {
            warn!(index, slides = self.slides.len(), "Rejected out-of-range slide");
            return;
        }

        let previous = self.current;
        self.slides[previous].hide();
        if let Some(marker) = self.effective_marker(previous) {
            self.set_marker_active(marker, false);
        }

        self.current = index;
        debug!(from = previous, to = index, "Slide changed");
        self.show(index, probe);
    }

    /// Move by `delta` slides. Moving past either end does nothing.
    pub fn set_active_relative(&mut self, delta: isize, probe: &dyn LineMetric) {
        let Some(target) = self.current.checked_add_signed(delta) else {
            return;
        };
        if target < self.slides.len() {
            self.set_active(target, probe);
        }
    }

    /// Nearest marker at or before `index`.
    pub fn effective_marker(&self, index: usize) -> Option<usize> {
        self.markers.range(..=index).next_back().map(|(i, _)| *i)
    }

    /// The marker currently highlighted, if any.
    pub fn active_marker(&self) -> Option<usize> {
        self.markers.values().find(|m| m.active).map(|m| m.index)
    }

    /// Record freshly laid-out viewport metrics for a visible slide and
    /// refresh its scrollbar when they changed.
    pub fn observe_viewport(
        &mut self,
        index: usize,
        viewport: ViewportMetrics,
        probe: &dyn LineMetric,
    ) {
        let Some(page) = self.slides.get_mut(index) else {
            return;
        };
        if page.hidden {
            return;
        }
        if page.viewport != viewport || !page.scrollbar.is_ready() {
            page.viewport = viewport;
            page.refresh(probe);
        }
    }

    /// Window size changed: refresh every slide's scrollbar.
    pub fn resize(&mut self, probe: &dyn LineMetric) {
        for page in &mut self.slides {
            page.refresh(probe);
        }
    }

    fn show(&mut self, index: usize, probe: &dyn LineMetric) {
        let page = &mut self.slides[index];
        page.hidden = false;
        page.refresh(probe);
        self.focus_request = Some(index);
        if let Some(marker) = self.effective_marker(index) {
            self.set_marker_active(marker, true);
        }
    }

    fn set_marker_active(&mut self, index: usize, active: bool) {
        if let Some(marker) = self.markers.get_mut(&index) {
            marker.active = active;
        }
    }
}
