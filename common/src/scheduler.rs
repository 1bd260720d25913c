/// Single-shot deferred callbacks on the host event loop.
pub trait Scheduler {
    /// Dropping the handle must cancel the callback.
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle) {
        drop(handle);
    }
}
