//! Resize debounce with draw-busy deferral

/// Handle of an armed one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// The platform's one-shot timer primitive.
pub trait TimerScheduler {
    /// Arm a timer. `None` if the host refused.
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerHandle>;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    /// A burst started; the debounce timer is armed.
    Pending,
    /// The timer fired during a draw and was re-armed.
    Retrying,
}

/// What a timer firing turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Caller must recompute the size now.
    Recompute,
    /// A draw was in flight; re-armed on the same delay.
    Deferred,
    /// Stale or cancelled timer; nothing to do.
    Dropped,
}

/// Coalesces resize bursts into one recomputation and keeps that
/// recomputation from racing an in-flight draw.
///
/// At most one timer is outstanding: arming always clears the previous one.
/// Retries use the same fixed delay with no backoff, so under sustained draw
/// load the retry continues until the engine frees up.
#[derive(Debug)]
pub struct ResizeDebouncer {
    state: ResizeState,
    timer: Option<TimerHandle>,
    delay_ms: u32,
}

impl ResizeDebouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            state: ResizeState::Idle,
            timer: None,
            delay_ms,
        }
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Raw resize notification. Only the first event of a burst arms the
    /// timer; returns true when it did.
    pub fn notify(&mut self, scheduler: &mut impl TimerScheduler) -> bool {
        if self.state != ResizeState::Idle {
            return false;
        }
        self.state = ResizeState::Pending;
        self.arm(scheduler);
        true
    }

    /// Timer `handle` fired. `draw_busy` is the render loop's permit state.
    pub fn fire(
        &mut self,
        handle: TimerHandle,
        draw_busy: bool,
        scheduler: &mut impl TimerScheduler,
    ) -> ResizeOutcome {
        if self.timer != Some(handle) || self.state == ResizeState::Idle {
            return ResizeOutcome::Dropped;
        }
        self.timer = None;
        if draw_busy {
            log::debug!("resize deferred, draw in flight");
            self.state = ResizeState::Retrying;
            self.arm(scheduler);
            return ResizeOutcome::Deferred;
        }
        self.state = ResizeState::Idle;
        ResizeOutcome::Recompute
    }

    /// Drop any armed timer and return to `Idle`.
    pub fn cancel(&mut self, scheduler: &mut impl TimerScheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.clear_timeout(handle);
        }
        self.state = ResizeState::Idle;
    }

    fn arm(&mut self, scheduler: &mut impl TimerScheduler) {
        if let Some(previous) = self.timer.take() {
            scheduler.clear_timeout(previous);
        }
        self.timer = scheduler.set_timeout(self.delay_ms);
        if self.timer.is_none() {
            log::warn!("could not arm resize timer");
            self.state = ResizeState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Timers {
        next: u32,
        armed: Vec<(TimerHandle, u32)>,
        cleared: Vec<TimerHandle>,
        refuse: bool,
    }

    impl TimerScheduler for Timers {
        fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerHandle> {
            if self.refuse {
                return None;
            }
            self.next += 1;
            let handle = TimerHandle(self.next);
            self.armed.push((handle, delay_ms));
            Some(handle)
        }

        fn clear_timeout(&mut self, handle: TimerHandle) {
            self.cleared.push(handle);
        }
    }

    #[test]
    fn test_burst_arms_once() {
        let mut timers = Timers::default();
        let mut debouncer = ResizeDebouncer::new(300);

        assert!(debouncer.notify(&mut timers));
        for _ in 0..10 {
            assert!(!debouncer.notify(&mut timers));
        }
        assert_eq!(timers.armed, vec![(TimerHandle(1), 300)]);
        assert_eq!(debouncer.state(), ResizeState::Pending);
    }

    #[test]
    fn test_fire_when_free_recomputes() {
        let mut timers = Timers::default();
        let mut debouncer = ResizeDebouncer::new(300);
        debouncer.notify(&mut timers);

        let outcome = debouncer.fire(TimerHandle(1), false, &mut timers);
        assert_eq!(outcome, ResizeOutcome::Recompute);
        assert_eq!(debouncer.state(), ResizeState::Idle);
        assert_eq!(debouncer.timer(), None);

        // next burst starts fresh
        assert!(debouncer.notify(&mut timers));
    }

    #[test]
    fn test_busy_fire_rearms_with_same_delay() {
        let mut timers = Timers::default();
        let mut debouncer = ResizeDebouncer::new(300);
        debouncer.notify(&mut timers);

        assert_eq!(
            debouncer.fire(TimerHandle(1), true, &mut timers),
            ResizeOutcome::Deferred
        );
        assert_eq!(debouncer.state(), ResizeState::Retrying);
        assert_eq!(
            debouncer.fire(TimerHandle(2), true, &mut timers),
            ResizeOutcome::Deferred
        );
        assert_eq!(timers.armed.len(), 3);
        assert!(timers.armed.iter().all(|&(_, delay)| delay == 300));

        // bursts during retries are still coalesced
        assert!(!debouncer.notify(&mut timers));

        assert_eq!(
            debouncer.fire(TimerHandle(3), false, &mut timers),
            ResizeOutcome::Recompute
        );
        assert_eq!(debouncer.state(), ResizeState::Idle);
    }

    #[test]
    fn test_stale_handle_dropped() {
        let mut timers = Timers::default();
        let mut debouncer = ResizeDebouncer::new(300);
        debouncer.notify(&mut timers);
        debouncer.fire(TimerHandle(1), true, &mut timers);

        assert_eq!(
            debouncer.fire(TimerHandle(1), false, &mut timers),
            ResizeOutcome::Dropped
        );
        assert_eq!(debouncer.state(), ResizeState::Retrying);
        assert_eq!(debouncer.timer(), Some(TimerHandle(2)));
    }

    #[test]
    fn test_cancel_clears_timer() {
        let mut timers = Timers::default();
        let mut debouncer = ResizeDebouncer::new(300);
        debouncer.notify(&mut timers);
        debouncer.cancel(&mut timers);

        assert_eq!(timers.cleared, vec![TimerHandle(1)]);
        assert_eq!(debouncer.state(), ResizeState::Idle);
        assert_eq!(
            debouncer.fire(TimerHandle(1), false, &mut timers),
            ResizeOutcome::Dropped
        );

        // cancelling while idle is harmless
        debouncer.cancel(&mut timers);
        assert_eq!(timers.cleared.len(), 1);
    }

    #[test]
    fn test_refused_timer_returns_to_idle() {
        let mut timers = Timers {
            refuse: true,
            ..Timers::default()
        };
        let mut debouncer = ResizeDebouncer::new(300);
        debouncer.notify(&mut timers);
        assert_eq!(debouncer.state(), ResizeState::Idle);
        assert_eq!(debouncer.timer(), None);
    }
}
