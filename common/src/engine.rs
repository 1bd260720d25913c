use thiserror::Error;

use crate::Lifecycle;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("could not create editor: {0}")]
    Construction(String),
    #[error("editor cannot be mounted while {0:?}")]
    InvalidLifecycle(Lifecycle),
}

/// Native editor events that carry a possible content change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEvent {
    Change,
    Paste,
}

impl NativeEvent {
    pub const ALL: [NativeEvent; 2] = [NativeEvent::Change, NativeEvent::Paste];

    /// Event name as understood by the editor library.
    pub fn name(self) -> &'static str {
        match self {
            NativeEvent::Change => "change",
            NativeEvent::Paste => "paste",
        }
    }
}

/// The slice of the editor library the adapter depends on.
///
/// Implementations forward each call to the live widget without validating
/// arguments; whatever the library does with bad input is its business.
pub trait EditorEngine: Sized {
    /// Where the editor gets attached, usually a DOM element.
    type Anchor: ?Sized;
    /// Opaque option bag handed to `setOptions`.
    type Options: Clone + Default;
    /// A mode definition object passed to the session as-is.
    type CustomMode: Clone;

    fn create(anchor: &Self::Anchor) -> Result<Self, EditorError>;

    fn value(&self) -> String;

    fn set_value(&self, text: &str);

    fn set_options(&self, options: &Self::Options);

    /// `theme` is already namespaced, e.g. `ace/theme/monokai`.
    fn set_theme(&self, theme: &str);

    /// `path` is already namespaced, e.g. `ace/mode/json`.
    fn set_mode_path(&self, path: &str);

    fn set_custom_mode(&self, mode: &Self::CustomMode);

    fn set_read_only(&self, read_only: bool);

    /// Registers `handler` for `event`. Handlers live as long as the engine.
    fn subscribe(&self, event: NativeEvent, handler: Box<dyn FnMut()>);

    fn clear_selection(&self);

    /// Releases the widget. Consuming `self` makes a second release impossible.
    fn destroy(self);
}
