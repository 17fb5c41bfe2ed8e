//! One-shot visibility tracking.
//!
//! Every watched element goes through `Observed -> Triggered` exactly once.
//! The browser (or a test) reports intersections; the observer decides
//! whether the bound action fires.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of per-observer ids, so handles cannot cross observers.
static NEXT_OBSERVER_ID: AtomicUsize = AtomicUsize::new(0);

/// Browsers report ratios slightly below the threshold that caused the report.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Intersection settings shared by all elements of one observer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObserveOptions {
    /// Minimum visible fraction (0.0 - 1.0) that triggers the action
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `"0px 0px -100px 0px"`
    pub root_margin: String,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self::counter()
    }
}

impl ObserveOptions {
    /// Create options with the given threshold and root margin.
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: root_margin.into(),
        }
    }

    /// Half of the element visible, no margin.
    pub fn counter() -> Self {
        Self::new(0.5, "0px")
    }

    /// A tenth of the element visible, viewport shrunk by 100px at the bottom.
    pub fn reveal() -> Self {
        Self::new(0.1, "0px 0px -100px 0px")
    }
}

/// One intersection report for an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    /// Whether the element intersects the (margin-adjusted) viewport
    pub is_intersecting: bool,
    /// Visible fraction of the element (0.0 - 1.0)
    pub ratio: f64,
}

impl Visibility {
    /// Create a report from a visible ratio.
    pub fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }

    /// An element entirely out of view.
    pub fn hidden() -> Self {
        Self::new(false, 0.0)
    }
}

/// Handle of an element registered with a [`VisibilityObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatchId {
    observer: usize,
    index: usize,
}

impl WatchId {
    /// Position of the element in registration order.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Watch state of a registered element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchState {
    /// Waiting for the element to become visible
    Observed,
    /// The action fired; the element is no longer watched
    Triggered,
}

/// One-shot visibility state machine for a set of elements.
///
/// ## Example
///
/// ```rust
/// use landing_fx::{ObserveOptions, Visibility, VisibilityObserver, WatchState};
///
/// let mut observer = VisibilityObserver::new(ObserveOptions::counter());
/// let id = observer.observe();
///
/// assert!(!observer.report(id, Visibility::new(true, 0.2)));
/// assert!(observer.report(id, Visibility::new(true, 0.6)));
/// assert_eq!(observer.state(id), Some(WatchState::Triggered));
///
/// // Scrolling away and back never fires again
/// assert!(!observer.report(id, Visibility::hidden()));
/// assert!(!observer.report(id, Visibility::new(true, 1.0)));
/// ```
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    id: usize,
    options: ObserveOptions,
    states: Vec<WatchState>,
}

impl VisibilityObserver {
    /// Create an observer with no registered element.
    pub fn new(options: ObserveOptions) -> Self {
        Self {
            id: NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed),
            options,
            states: Vec::new(),
        }
    }

    /// Get the intersection settings.
    #[inline]
    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Register a new element.
    pub fn observe(&mut self) -> WatchId {
        self.states.push(WatchState::Observed);
        WatchId {
            observer: self.id,
            index: self.states.len() - 1,
        }
    }

    /// Get the state of an element, `None` if it was never registered here.
    pub fn state(&self, id: WatchId) -> Option<WatchState> {
        if id.observer != self.id {
            return None;
        }
        self.states.get(id.index).copied()
    }

    /// Check if an element is still waiting to trigger.
    pub fn is_watching(&self, id: WatchId) -> bool {
        self.state(id) == Some(WatchState::Observed)
    }

    /// Number of elements still waiting to trigger.
    pub fn watching_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == WatchState::Observed)
            .count()
    }

    /// Number of registered elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no element was ever registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Check if every registered element has triggered.
    pub fn is_settled(&self) -> bool {
        self.watching_count() == 0
    }

    /// Check whether a report satisfies the threshold.
    pub fn is_visible(&self, visibility: Visibility) -> bool {
        visibility.is_intersecting && visibility.ratio + RATIO_TOLERANCE >= self.options.threshold
    }

    /// Feed an intersection report for an element.
    ///
    /// Returns `true` when the bound action must fire. This happens at most
    /// once per element; the element is unregistered before returning.
    pub fn report(&mut self, id: WatchId, visibility: Visibility) -> bool {
        if !self.is_watching(id) || !self.is_visible(visibility) {
            return false;
        }
        self.states[id.index] = WatchState::Triggered;
        log::debug!("element {} became visible (ratio {:.2})", id.index, visibility.ratio);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let counter = ObserveOptions::counter();
        assert_eq!(counter.threshold, 0.5);
        assert_eq!(counter.root_margin, "0px");

        let reveal = ObserveOptions::reveal();
        assert_eq!(reveal.threshold, 0.1);
        assert_eq!(reveal.root_margin, "0px 0px -100px 0px");
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ObserveOptions::new(3.0, "0px").threshold, 1.0);
        assert_eq!(ObserveOptions::new(-1.0, "0px").threshold, 0.0);
    }

    #[test]
    fn test_fires_once() {
        let mut observer = VisibilityObserver::new(ObserveOptions::reveal());
        let id = observer.observe();

        let mut fired = 0;
        for _ in 0..5 {
            if observer.report(id, Visibility::new(true, 0.8)) {
                fired += 1;
            }
            observer.report(id, Visibility::hidden());
        }
        assert_eq!(fired, 1);
        assert_eq!(observer.state(id), Some(WatchState::Triggered));
    }

    #[test]
    fn test_below_threshold_keeps_watching() {
        let mut observer = VisibilityObserver::new(ObserveOptions::counter());
        let id = observer.observe();

        assert!(!observer.report(id, Visibility::new(true, 0.49)));
        assert!(observer.is_watching(id));
        assert!(observer.report(id, Visibility::new(true, 0.4995)));
        assert!(!observer.is_watching(id));

        let id = observer.observe();
        assert!(!observer.report(id, Visibility::new(true, 0.3)));
        assert!(observer.is_watching(id));
        assert!(observer.report(id, Visibility::new(true, 0.5)));
        assert!(!observer.is_watching(id));
    }

    #[test]
    fn test_not_intersecting_never_fires() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.0, "0px"));
        let id = observer.observe();
        assert!(!observer.report(id, Visibility::new(false, 0.0)));
        assert!(observer.report(id, Visibility::new(true, 0.0)));
    }

    #[test]
    fn test_elements_are_independent() {
        let mut observer = VisibilityObserver::new(ObserveOptions::counter());
        let a = observer.observe();
        let b = observer.observe();
        assert_eq!(observer.len(), 2);
        assert_eq!(b.index(), 1);

        assert!(observer.report(b, Visibility::new(true, 1.0)));
        assert!(observer.is_watching(a));
        assert_eq!(observer.watching_count(), 1);
        assert!(!observer.is_settled());

        assert!(observer.report(a, Visibility::new(true, 1.0)));
        assert!(observer.is_settled());
    }

    #[test]
    fn test_unknown_id() {
        let mut observer = VisibilityObserver::new(ObserveOptions::counter());
        assert!(observer.is_empty());
        let mut other = VisibilityObserver::new(ObserveOptions::counter());
        let foreign = other.observe();

        assert_eq!(observer.state(foreign), None);
        assert!(!observer.report(foreign, Visibility::new(true, 1.0)));
    }

    #[test]
    fn test_id_from_other_observer_is_rejected() {
        let mut observer = VisibilityObserver::new(ObserveOptions::counter());
        let own = observer.observe();
        let mut other = VisibilityObserver::new(ObserveOptions::counter());
        let foreign = other.observe();
        assert_eq!(own.index(), foreign.index());

        assert_eq!(observer.state(foreign), None);
        assert!(!observer.is_watching(foreign));
        assert!(!observer.report(foreign, Visibility::new(true, 1.0)));
        assert!(observer.is_watching(own));
        assert_eq!(other.state(foreign), Some(WatchState::Observed));

        assert!(observer.report(own, Visibility::new(true, 1.0)));
    }
}
