//! Per-frame step scheduler
//!
//! Holds an ordered list of named step functions and runs all of them once per
//! display frame. The platform layer owns the actual frame callback
//! (`requestAnimationFrame` on the web) and hands the ticker a closure that
//! schedules the next one.
//!
//! A failing step is logged and skipped; it never stops the remaining steps
//! of the frame or any later frame.

/// A single frame step operating on the shared frame context
pub type Step<C> = fn(&mut C) -> crate::Result<()>;

/// Handle returned by [`Ticker::add`], used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(u32);

struct StepEntry<C> {
    id: StepId,
    name: &'static str,
    step: Step<C>,
}

/// Ordered step scheduler
pub struct Ticker<C> {
    steps: Vec<StepEntry<C>>,
    running: bool,
    next_id: u32,
    frames: u64,
    errors: u64,
}

impl<C> Default for Ticker<C> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            running: false,
            next_id: 1,
            frames: 0,
            errors: 0,
        }
    }
}

impl<C> Ticker<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. The same function may be added more than once.
    pub fn add(&mut self, name: &'static str, step: Step<C>) -> StepId {
        let id = StepId(self.next_id);
        self.next_id += 1;
        self.steps.push(StepEntry { id, name, step });
        id
    }

    /// Remove the step with this id. Returns false if it was not registered.
    pub fn remove(&mut self, id: StepId) -> bool {
        match self.steps.iter().position(|s| s.id == id) {
            Some(index) => {
                self.steps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Mark running. Returns true only on the stopped -> running transition,
    /// in which case the caller must schedule the first tick.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop scheduling further ticks. A tick already in progress finishes its pass.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Frames run since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Step failures since creation
    pub fn error_count(&self) -> u64 {
        self.errors
    }

    /// Run one frame.
    ///
    /// Does nothing and returns false when stopped. Otherwise `schedule_next`
    /// is called before any step runs, then every step runs in order.
    ///
    /// Only `Err` returns are isolated. Steps must not panic: on wasm a panic
    /// aborts the frame while the caller still holds the frame context.
    pub fn tick(&mut self, ctx: &mut C, schedule_next: impl FnOnce()) -> bool {
        if !self.running {
            return false;
        }

        schedule_next();

        for entry in &self.steps {
            if let Err(e) = (entry.step)(ctx) {
                self.errors += 1;
                log::error!("Frame step '{}' failed: {}", entry.name, e);
            }
        }
        self.frames += 1;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Trace {
        calls: Vec<&'static str>,
    }

    fn first(t: &mut Trace) -> crate::Result<()> {
        t.calls.push("first");
        Ok(())
    }

    fn second(t: &mut Trace) -> crate::Result<()> {
        t.calls.push("second");
        Ok(())
    }

    fn failing(t: &mut Trace) -> crate::Result<()> {
        t.calls.push("failing");
        Err(GameError::Step {
            step: "failing",
            reason: "boom".into(),
        })
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut ticker = Ticker::new();
        ticker.add("second", second);
        ticker.add("first", first);
        ticker.start();

        let mut trace = Trace::default();
        assert!(ticker.tick(&mut trace, || {}));
        assert_eq!(trace.calls, vec!["second", "first"]);
        assert_eq!(ticker.step_names(), vec!["second", "first"]);
    }

    #[test]
    fn test_stopped_ticker_does_nothing() {
        let mut ticker = Ticker::new();
        ticker.add("first", first);

        let mut trace = Trace::default();
        let mut scheduled = false;
        assert!(!ticker.tick(&mut trace, || scheduled = true));
        assert!(!scheduled);
        assert!(trace.calls.is_empty());
        assert_eq!(ticker.frame_count(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut ticker: Ticker<Trace> = Ticker::new();
        assert!(ticker.start());
        assert!(!ticker.start());
        assert!(ticker.is_running());
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(ticker.start());
    }

    #[test]
    fn test_failing_step_is_isolated() {
        let mut ticker = Ticker::new();
        ticker.add("first", first);
        ticker.add("failing", failing);
        ticker.add("second", second);
        ticker.start();

        let mut trace = Trace::default();
        let mut scheduled = 0;
        for _ in 0..3 {
            ticker.tick(&mut trace, || scheduled += 1);
        }

        assert_eq!(scheduled, 3);
        assert_eq!(ticker.frame_count(), 3);
        assert_eq!(ticker.error_count(), 3);
        assert_eq!(trace.calls.iter().filter(|c| **c == "second").count(), 3);
    }

    #[test]
    fn test_remove_first_matching() {
        let mut ticker = Ticker::new();
        let a = ticker.add("first", first);
        let b = ticker.add("first", first);
        ticker.add("second", second);

        assert!(ticker.remove(a));
        assert!(!ticker.remove(a));
        assert_eq!(ticker.len(), 2);
        assert!(ticker.remove(b));
        assert_eq!(ticker.step_names(), vec!["second"]);
    }

    static ORDERED_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counted(_: &mut Trace) -> crate::Result<()> {
        ORDERED_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn test_schedule_runs_before_steps() {
        let mut ticker = Ticker::new();
        ticker.add("counted", counted);
        ticker.start();

        let mut trace = Trace::default();
        let mut seen_at_schedule = None;
        ticker.tick(&mut trace, || {
            seen_at_schedule = Some(ORDERED_CALLS.load(Ordering::SeqCst));
        });

        assert_eq!(seen_at_schedule, Some(0));
        assert_eq!(ORDERED_CALLS.load(Ordering::SeqCst), 1);
    }
}
