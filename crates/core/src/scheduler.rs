//! Virtual-clock scheduler for timeouts and animation frames.
//!
//! Nothing here knows about the browser. The bridge feeds it real time
//! (`performance.now()`) and real frames; tests feed it whatever they like,
//! which makes every animation in the crate steppable.

/// Handle for a pending timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Handle for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: u64,
    due: f64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: f64,
    next_id: u64,
    timers: Vec<Timer<T>>,
    frames: Vec<(u64, T)>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            timers: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. Never moves backwards.
    pub fn set_now(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run `task` once `delay_ms` has elapsed. Negative delays count as zero.
    pub fn set_timeout(&mut self, delay_ms: f64, task: T) -> TimerId {
        let id = self.next_id();
        let due = self.now + delay_ms.max(0.0);
        self.timers.push(Timer { id, due, task });
        TimerId(id)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel_timeout(&mut self, timer: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != timer.0);
        self.timers.len() != before
    }

    /// Run `task` on the next frame.
    pub fn request_frame(&mut self, task: T) -> FrameId {
        let id = self.next_id();
        self.frames.push((id, task));
        FrameId(id)
    }

    /// Returns whether the request was still pending.
    pub fn cancel_frame(&mut self, frame: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(id, _)| *id != frame.0);
        self.frames.len() != before
    }

    pub fn has_frame_requests(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.iter().map(|t| t.due).min_by(f64::total_cmp)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// advancing the clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: f64) -> Option<T> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.set_now(timer.due);
        Some(timer.task)
    }

    /// Take every task requested for this frame. Requests made while these
    /// tasks run land in the next frame.
    pub fn take_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, until: f64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(until) {
            fired.push(task);
        }
        s.set_now(until);
        fired
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut s = Scheduler::new();
        s.set_timeout(300.0, "c");
        s.set_timeout(100.0, "a");
        s.set_timeout(200.0, "b");
        assert_eq!(s.next_deadline(), Some(100.0));
        assert_eq!(drain(&mut s, 250.0), vec!["a", "b"]);
        assert_eq!(s.now(), 250.0);
        assert_eq!(drain(&mut s, 1000.0), vec!["c"]);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let mut s = Scheduler::new();
        s.set_timeout(0.0, "first");
        s.set_timeout(0.0, "second");
        s.set_timeout(-5.0, "third");
        assert_eq!(drain(&mut s, 0.0), vec!["first", "second", "third"]);
    }

    #[test]
    fn delays_are_relative_to_the_fired_timer() {
        let mut s = Scheduler::new();
        s.set_timeout(100.0, "outer");
        assert_eq!(s.pop_due(1000.0), Some("outer"));
        // Scheduling from inside a callback counts from its deadline.
        assert_eq!(s.now(), 100.0);
        s.set_timeout(50.0, "inner");
        assert_eq!(s.next_deadline(), Some(150.0));
        assert_eq!(drain(&mut s, 1000.0), vec!["inner"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let id = s.set_timeout(10.0, "x");
        assert!(s.cancel_timeout(id));
        assert!(!s.cancel_timeout(id));
        assert!(drain(&mut s, 100.0).is_empty());
    }

    #[test]
    fn frame_requests_made_during_a_frame_wait_for_the_next() {
        let mut s = Scheduler::new();
        s.request_frame("a");
        let tasks = s.take_frame();
        assert_eq!(tasks, vec!["a"]);
        assert!(!s.has_frame_requests());
        s.request_frame("a");
        assert!(s.has_frame_requests());
    }

    #[test]
    fn cancel_frame() {
        let mut s = Scheduler::new();
        let id = s.request_frame("a");
        s.request_frame("b");
        assert!(s.cancel_frame(id));
        assert_eq!(s.take_frame(), vec!["b"]);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.set_now(500.0);
        s.set_now(100.0);
        assert_eq!(s.now(), 500.0);
    }
}
