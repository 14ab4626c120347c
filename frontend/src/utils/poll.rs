#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Interval;

/// Cancels the interval when dropped or when [`PollHandle::cancel`] is called.
#[derive(Default)]
pub struct PollHandle {
    #[cfg(target_arch = "wasm32")]
    interval: Option<Interval>,
    active: bool,
}

impl PollHandle {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cancel(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
        self.active = false;
    }
}

/// Calls `tick` every `period_ms`. Outside the browser no timer is armed;
/// the handle still reports itself active until cancelled.
pub fn start_poll(period_ms: u32, tick: impl FnMut() + 'static) -> PollHandle {
    log::debug!("starting poll every {} ms", period_ms);
    #[cfg(target_arch = "wasm32")]
    {
        PollHandle {
            interval: Some(Interval::new(period_ms, tick)),
            active: true,
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = tick;
        PollHandle { active: true }
    }
}
