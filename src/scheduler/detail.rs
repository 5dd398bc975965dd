//! Debounced fetching of package details for the selected row.
//!
//! Moving the cursor does not fetch immediately. The target is parked with a
//! deadline and only fetched once the selection has been stable for the quiet
//! window. The clock is passed in by the caller so the scheduler stays a plain
//! state machine.

use std::time::{Duration, Instant};

/// The single detail fetch waiting for its quiet window to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDetailRequest {
    pub target: String,
    pub deadline: Instant,
}

/// Outcome of a timer wakeup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTick {
    /// The quiet window elapsed; fetch details for this package.
    Fetch(String),
    /// Woken before the deadline; wake again after this long.
    Wait(Duration),
    /// Nothing is pending.
    Idle,
}

#[derive(Debug, Clone)]
pub struct DetailScheduler {
    window: Duration,
    pending: Option<PendingDetailRequest>,
    in_flight: Option<String>,
    shown_for: Option<String>,
}

impl DetailScheduler {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            in_flight: None,
            shown_for: None,
        }
    }

    /// Records a selection change.
    ///
    /// Returns the delay after which the caller should deliver a tick, or `None`
    /// when no new wakeup is needed (same target already pending, or its
    /// details are already shown or on their way).
    pub fn select(&mut self, name: Option<&str>, now: Instant) -> Option<Duration> {
        let Some(name) = name else {
            self.pending = None;
            self.in_flight = None;
            self.shown_for = None;
            return None;
        };

        if self.pending.as_ref().is_some_and(|p| p.target == name) {
            return None;
        }

        if self.in_flight.as_deref() == Some(name) || self.shown_for.as_deref() == Some(name) {
            self.pending = None;
            return None;
        }

        tracing::trace!(target = %name, "detail fetch scheduled");
        self.pending = Some(PendingDetailRequest {
            target: name.to_string(),
            deadline: now + self.window,
        });
        Some(self.window)
    }

    /// Handles a timer wakeup.
    pub fn tick(&mut self, now: Instant) -> DetailTick {
        let Some(pending) = &self.pending else {
            return DetailTick::Idle;
        };

        if now < pending.deadline {
            return DetailTick::Wait(pending.deadline - now);
        }

        let target = pending.target.clone();
        self.pending = None;
        self.in_flight = Some(target.clone());
        DetailTick::Fetch(target)
    }

    /// Decides whether a detail response for `name` may be shown.
    ///
    /// Only the response to the in-flight request is accepted, and only while
    /// no newer selection is waiting.
    pub fn accept(&mut self, name: &str) -> bool {
        if self.in_flight.as_deref() != Some(name) {
            return false;
        }

        self.in_flight = None;
        if self.pending.is_some() {
            return false;
        }

        self.shown_for = Some(name.to_string());
        true
    }

    /// Drops the waiting request without touching the in-flight one.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forgets which package the pane shows, e.g. after its install state changed.
    pub fn invalidate(&mut self) {
        self.shown_for = None;
    }

    /// Forgets everything, including the in-flight request, whose answer will
    /// then be discarded.
    pub fn reset(&mut self) {
        self.pending = None;
        self.in_flight = None;
        self.shown_for = None;
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingDetailRequest> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    #[must_use]
    pub fn shown_for(&self) -> Option<&str> {
        self.shown_for.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);

    #[test]
    fn tick_before_deadline_fetches_nothing() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        assert_eq!(scheduler.select(Some("vim"), start), Some(WINDOW));

        let early = start + Duration::from_millis(100);
        assert_eq!(scheduler.tick(early), DetailTick::Wait(Duration::from_millis(50)));
        assert_eq!(scheduler.in_flight(), None);

        assert_eq!(scheduler.tick(start + WINDOW), DetailTick::Fetch("vim".into()));
        assert_eq!(scheduler.in_flight(), Some("vim"));
    }

    #[test]
    fn newer_selection_replaces_pending_target() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.select(Some("neovim"), start + Duration::from_millis(50));

        // the first deadline has passed, but the replacement's has not
        assert!(matches!(scheduler.tick(start + WINDOW), DetailTick::Wait(_)));
        assert_eq!(
            scheduler.tick(start + Duration::from_millis(200)),
            DetailTick::Fetch("neovim".into())
        );
    }

    #[test]
    fn response_for_abandoned_selection_is_discarded() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.tick(start + WINDOW);

        scheduler.select(Some("emacs"), start + WINDOW);
        assert!(!scheduler.accept("vim"));
        assert_eq!(scheduler.shown_for(), None);
    }

    #[test]
    fn accepted_response_suppresses_refetch_of_same_name() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.tick(start + WINDOW);
        assert!(scheduler.accept("vim"));
        assert_eq!(scheduler.select(Some("vim"), start + WINDOW), None);
        assert_eq!(scheduler.tick(start + WINDOW * 2), DetailTick::Idle);
    }

    #[test]
    fn returning_to_in_flight_target_cancels_pending() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.tick(start + WINDOW);
        scheduler.select(Some("emacs"), start + WINDOW);
        assert_eq!(scheduler.select(Some("vim"), start + WINDOW), None);
        assert!(scheduler.accept("vim"));
    }

    #[test]
    fn reset_discards_in_flight_answer() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.tick(start + WINDOW);
        scheduler.reset();

        assert_eq!(scheduler.select(Some("vim"), start + WINDOW), Some(WINDOW));
        assert!(!scheduler.accept("vim"));
    }

    #[test]
    fn clearing_selection_drops_everything() {
        let start = Instant::now();
        let mut scheduler = DetailScheduler::new(WINDOW);
        scheduler.select(Some("vim"), start);
        scheduler.select(None, start);
        assert_eq!(scheduler.tick(start + WINDOW), DetailTick::Idle);
    }
}
