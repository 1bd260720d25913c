use ace_binding_common::Scheduler;
use gloo_timers::callback::Timeout;

/// Schedules on the browser's `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn cancel(&self, handle: Timeout) {
        let _ = handle.cancel();
    }
}
