/// Hook-up points for a host form system that treats the editor as a plain
/// form control.
pub trait ValueAccessor {
    /// Model to view write. `None` clears the control.
    fn write_value(&self, value: Option<&str>);

    fn register_on_change(&self, on_change: Box<dyn Fn(&str)>);

    /// Called once, on the first user edit that propagates without debounce.
    /// Programmatic writes never mark the control touched.
    fn register_on_touched(&self, on_touched: Box<dyn Fn()>);
}
