//! Test doubles: a recording editor engine and a hand-cranked clock.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use serde_json::{Map, Value};

use crate::{EditorEngine, EditorError, NativeEvent, Scheduler};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create,
    SetValue(String),
    SetOptions(Map<String, Value>),
    SetTheme(String),
    SetModePath(String),
    SetCustomMode(Value),
    SetReadOnly(bool),
    Subscribe(NativeEvent),
    ClearSelection,
    Destroy,
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct Widget {
    value: String,
    calls: Vec<Call>,
    handlers: Vec<(NativeEvent, Handler)>,
    fail_create: bool,
    echo_writes: bool,
}

/// Stands in for the DOM element and lets tests play the user.
#[derive(Clone, Default)]
pub struct MockAnchor(Rc<RefCell<Widget>>);

impl MockAnchor {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    pub fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    pub fn fail_create(&self) {
        self.0.borrow_mut().fail_create = true;
    }

    /// Makes `set_value` fire a change event synchronously, as Ace does.
    pub fn echo_writes(&self) {
        self.0.borrow_mut().echo_writes = true;
    }

    pub fn type_text(&self, text: &str) {
        self.0.borrow_mut().value = text.to_string();
        self.fire(NativeEvent::Change);
    }

    pub fn paste_text(&self, text: &str) {
        self.0.borrow_mut().value = text.to_string();
        self.fire(NativeEvent::Paste);
    }

    pub fn fire(&self, event: NativeEvent) {
        let handlers: Vec<Handler> = self
            .0
            .borrow()
            .handlers
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            let mut callback = handler.borrow_mut();
            (*callback)();
        }
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

pub struct MockEngine {
    widget: MockAnchor,
}

impl EditorEngine for MockEngine {
    type Anchor = MockAnchor;
    type Options = Map<String, Value>;
    type CustomMode = Value;

    fn create(anchor: &MockAnchor) -> Result<Self, EditorError> {
        if anchor.0.borrow().fail_create {
            return Err(EditorError::Construction("ace is not loaded".into()));
        }
        anchor.record(Call::Create);
        Ok(Self {
            widget: anchor.clone(),
        })
    }

    fn value(&self) -> String {
        self.widget.value()
    }

    fn set_value(&self, text: &str) {
        let echo = {
            let mut widget = self.widget.0.borrow_mut();
            widget.value = text.to_string();
            widget.calls.push(Call::SetValue(text.to_string()));
            widget.echo_writes
        };
        if echo {
            self.widget.fire(NativeEvent::Change);
        }
    }

    fn set_options(&self, options: &Map<String, Value>) {
        self.widget.record(Call::SetOptions(options.clone()));
    }

    fn set_theme(&self, theme: &str) {
        self.widget.record(Call::SetTheme(theme.to_string()));
    }

    fn set_mode_path(&self, path: &str) {
        self.widget.record(Call::SetModePath(path.to_string()));
    }

    fn set_custom_mode(&self, mode: &Value) {
        self.widget.record(Call::SetCustomMode(mode.clone()));
    }

    fn set_read_only(&self, read_only: bool) {
        self.widget.record(Call::SetReadOnly(read_only));
    }

    fn subscribe(&self, event: NativeEvent, handler: Box<dyn FnMut()>) {
        let mut widget = self.widget.0.borrow_mut();
        widget.calls.push(Call::Subscribe(event));
        widget.handlers.push((event, Rc::new(RefCell::new(handler))));
    }

    fn clear_selection(&self) {
        self.widget.record(Call::ClearSelection);
    }

    fn destroy(self) {
        let mut widget = self.widget.0.borrow_mut();
        widget.calls.push(Call::Destroy);
        widget.handlers.clear();
    }
}

struct Entry {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Cell<u64>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Entry>>,
}

/// Timers only fire when a test calls [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<Clock>);

pub struct ManualTimer {
    id: u64,
    clock: Rc<Clock>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.clock.queue.borrow_mut().retain(|entry| entry.id != self.id);
    }
}

impl ManualScheduler {
    pub fn now(&self) -> u64 {
        self.0.now.get()
    }

    pub fn pending(&self) -> usize {
        self.0.queue.borrow().len()
    }

    /// Moves time forward by `ms`, running every timer that comes due in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut queue = self.0.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.id))
                    .map(|(index, _)| index);
                earliest.map(|index| queue.remove(index))
            };
            match next {
                Some(entry) => {
                    self.0.now.set(entry.due);
                    (entry.callback)();
                }
                None => break,
            }
        }
        self.0.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let id = self.0.next_id.get();
        self.0.next_id.set(id + 1);
        self.0.queue.borrow_mut().push(Entry {
            id,
            due: self.now() + u64::from(delay_ms),
            callback,
        });
        ManualTimer {
            id,
            clock: self.0.clone(),
        }
    }
}
