use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    config::{mode_path, theme_path},
    EditorConfig, EditorEngine, EditorError, Mode, NativeEvent, Scheduler, ValueAccessor,
};

type Listener = Rc<dyn Fn(&str)>;

type Config<E> = EditorConfig<<E as EditorEngine>::Options, <E as EditorEngine>::CustomMode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Live,
    Destroyed,
}

struct State<E: EditorEngine, H> {
    lifecycle: Lifecycle,
    config: Config<E>,
    text: String,
    /// Last value read back from a native event.
    old_text: Option<String>,
    pending: Option<H>,
    touched: bool,
}

#[derive(Default)]
struct Listeners {
    text_change: Vec<Listener>,
    text_changed: Vec<Listener>,
    on_change: Option<Listener>,
    on_touched: Option<Rc<dyn Fn()>>,
}

struct Shared<E: EditorEngine, S: Scheduler> {
    engine: RefCell<Option<Rc<E>>>,
    scheduler: S,
    state: RefCell<State<E, S::Handle>>,
    listeners: RefCell<Listeners>,
}

/// Binds an editor widget to a host UI's value and forms plumbing.
///
/// Cloning yields another handle to the same adapter. No internal borrow is
/// held while the engine, an output listener or a forms callback runs, so any
/// of them may call back into the adapter.
pub struct EditorAdapter<E: EditorEngine, S: Scheduler> {
    shared: Rc<Shared<E, S>>,
}

impl<E: EditorEngine, S: Scheduler> Clone for EditorAdapter<E, S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E, S> EditorAdapter<E, S>
where
    E: EditorEngine + 'static,
    S: Scheduler + 'static,
{
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, EditorConfig::default())
    }

    pub fn with_config(scheduler: S, config: Config<E>) -> Self {
        Self {
            shared: Rc::new(Shared {
                engine: RefCell::new(None),
                scheduler,
                state: RefCell::new(State {
                    lifecycle: Lifecycle::Uninitialized,
                    config,
                    text: String::new(),
                    old_text: None,
                    pending: None,
                    touched: false,
                }),
                listeners: RefCell::new(Listeners::default()),
            }),
        }
    }

    /// Creates the editor on `anchor`, applies the configuration gathered so
    /// far and starts listening for content changes.
    pub fn mount(&self, anchor: &E::Anchor) -> Result<(), EditorError> {
        let lifecycle = self.lifecycle();
        if lifecycle != Lifecycle::Uninitialized {
            return Err(EditorError::InvalidLifecycle(lifecycle));
        }

        let engine = E::create(anchor)?;
        let (config, text) = {
            let state = self.shared.state.borrow();
            (state.config.clone(), state.text.clone())
        };
        engine.set_options(&config.options);
        engine.set_theme(&theme_path(&config.theme));
        apply_mode(&engine, &config.mode);
        engine.set_read_only(config.read_only);
        if !text.is_empty() {
            engine.set_value(&text);
            engine.clear_selection();
        }

        for event in NativeEvent::ALL {
            let weak = Rc::downgrade(&self.shared);
            engine.subscribe(
                event,
                Box::new(move || {
                    if let Some(adapter) = upgrade(&weak) {
                        adapter.on_native_change();
                    }
                }),
            );
        }

        *self.shared.engine.borrow_mut() = Some(Rc::new(engine));
        self.shared.state.borrow_mut().lifecycle = Lifecycle::Live;
        log::debug!("editor mounted");
        Ok(())
    }

    /// Cancels any pending propagation and destroys the editor. Repeated
    /// calls do nothing.
    pub fn teardown(&self) {
        let pending = {
            let mut state = self.shared.state.borrow_mut();
            if state.lifecycle == Lifecycle::Destroyed {
                return;
            }
            state.lifecycle = Lifecycle::Destroyed;
            state.pending.take()
        };
        if let Some(handle) = pending {
            log::trace!("dropping pending propagation on teardown");
            self.shared.scheduler.cancel(handle);
        }
        let engine = self.shared.engine.borrow_mut().take();
        if let Some(engine) = engine {
            self.release(engine);
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.state.borrow().lifecycle
    }

    pub fn text(&self) -> String {
        self.shared.state.borrow().text.clone()
    }

    pub fn value(&self) -> String {
        self.text()
    }

    pub fn config(&self) -> Config<E> {
        self.shared.state.borrow().config.clone()
    }

    /// Pushes externally supplied text into the editor. A no-op when the text
    /// is unchanged or automatic content updates are off.
    pub fn set_text(&self, text: Option<&str>) {
        let text = text.unwrap_or_default();
        {
            let mut state = self.shared.state.borrow_mut();
            if state.text == text || !state.config.auto_update_content {
                return;
            }
            state.text = text.to_string();
        }
        self.with_engine(|engine| engine.set_value(text));
        self.notify_form_change(text);
        self.with_engine(E::clear_selection);
    }

    pub fn set_value(&self, value: Option<&str>) {
        self.set_text(value);
    }

    pub fn set_options(&self, options: E::Options) {
        self.shared.state.borrow_mut().config.options = options.clone();
        self.with_engine(|engine| engine.set_options(&options));
    }

    pub fn set_theme(&self, theme: impl Into<String>) {
        let theme = theme.into();
        let path = theme_path(&theme);
        self.shared.state.borrow_mut().config.theme = theme;
        self.with_engine(|engine| engine.set_theme(&path));
    }

    pub fn set_mode(&self, mode: impl Into<Mode<E::CustomMode>>) {
        let mode = mode.into();
        self.shared.state.borrow_mut().config.mode = mode.clone();
        self.with_engine(|engine| apply_mode(engine, &mode));
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.shared.state.borrow_mut().config.read_only = read_only;
        self.with_engine(|engine| engine.set_read_only(read_only));
    }

    pub fn set_auto_update_content(&self, auto_update_content: bool) {
        self.shared.state.borrow_mut().config.auto_update_content = auto_update_content;
    }

    pub fn set_duration_before_callback(&self, debounce_ms: u32) {
        self.shared.state.borrow_mut().config.debounce_ms = debounce_ms;
    }

    pub fn on_text_change(&self, listener: impl Fn(&str) + 'static) {
        self.shared
            .listeners
            .borrow_mut()
            .text_change
            .push(Rc::new(listener));
    }

    /// Same values as [`Self::on_text_change`], kept as a separately named channel.
    pub fn on_text_changed(&self, listener: impl Fn(&str) + 'static) {
        self.shared
            .listeners
            .borrow_mut()
            .text_changed
            .push(Rc::new(listener));
    }

    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&E) -> R) -> Option<R> {
        let engine = self.shared.engine.borrow().clone()?;
        let result = f(&*engine);
        self.release(engine);
        Some(result)
    }

    // After teardown, whoever drops the last reference destroys the editor.
    // That may be an engine call still on the stack when teardown ran.
    fn release(&self, engine: Rc<E>) {
        if self.lifecycle() != Lifecycle::Destroyed {
            return;
        }
        if let Ok(engine) = Rc::try_unwrap(engine) {
            engine.destroy();
            log::debug!("editor destroyed");
        }
    }

    fn on_native_change(&self) {
        let new_val = match self.with_engine(E::value) {
            Some(value) => value,
            None => return,
        };
        let (debounce_ms, stale) = {
            let mut state = self.shared.state.borrow_mut();
            if state.old_text.as_deref() == Some(new_val.as_str()) {
                return;
            }
            state.old_text = Some(new_val.clone());
            if state.config.debounce_ms == 0 {
                state.text = new_val.clone();
            }
            (state.config.debounce_ms, state.pending.take())
        };
        // A newer value always supersedes a deferred one, whatever the window is now.
        if let Some(handle) = stale {
            self.shared.scheduler.cancel(handle);
        }

        if debounce_ms == 0 {
            log::trace!("propagating change ({} bytes)", new_val.len());
            self.emit(&new_val);
            self.notify_form_change(&new_val);
            self.mark_touched();
            return;
        }

        let weak = Rc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule(
            debounce_ms,
            Box::new(move || {
                if let Some(adapter) = upgrade(&weak) {
                    adapter.flush_debounced(new_val);
                }
            }),
        );
        self.shared.state.borrow_mut().pending = Some(handle);
    }

    // The debounced path leaves the forms callbacks alone.
    fn flush_debounced(&self, value: String) {
        let spent = {
            let mut state = self.shared.state.borrow_mut();
            if state.lifecycle == Lifecycle::Destroyed {
                return;
            }
            state.text = value.clone();
            state.pending.take()
        };
        log::trace!("propagating debounced change ({} bytes)", value.len());
        self.emit(&value);
        drop(spent);
    }

    fn emit(&self, value: &str) {
        let (text_change, text_changed) = {
            let listeners = self.shared.listeners.borrow();
            (
                listeners.text_change.clone(),
                listeners.text_changed.clone(),
            )
        };
        for listener in text_change.iter().chain(&text_changed) {
            listener(value);
        }
    }

    fn notify_form_change(&self, value: &str) {
        let on_change = self.shared.listeners.borrow().on_change.clone();
        if let Some(on_change) = on_change {
            on_change(value);
        }
    }

    fn mark_touched(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.touched {
                return;
            }
            state.touched = true;
        }
        let on_touched = self.shared.listeners.borrow().on_touched.clone();
        if let Some(on_touched) = on_touched {
            on_touched();
        }
    }
}

impl<E, S> ValueAccessor for EditorAdapter<E, S>
where
    E: EditorEngine + 'static,
    S: Scheduler + 'static,
{
    fn write_value(&self, value: Option<&str>) {
        self.set_text(value);
    }

    fn register_on_change(&self, on_change: Box<dyn Fn(&str)>) {
        self.shared.listeners.borrow_mut().on_change = Some(Rc::from(on_change));
    }

    fn register_on_touched(&self, on_touched: Box<dyn Fn()>) {
        self.shared.listeners.borrow_mut().on_touched = Some(Rc::from(on_touched));
    }
}

fn upgrade<E: EditorEngine, S: Scheduler>(
    weak: &Weak<Shared<E, S>>,
) -> Option<EditorAdapter<E, S>> {
    weak.upgrade().map(|shared| EditorAdapter { shared })
}

fn apply_mode<E: EditorEngine>(engine: &E, mode: &Mode<E::CustomMode>) {
    match mode {
        Mode::Named(name) => engine.set_mode_path(&mode_path(name)),
        Mode::Custom(custom) => engine.set_custom_mode(custom),
    }
}
