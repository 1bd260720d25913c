use std::cell::RefCell;

use ace_binding_common::{EditorEngine, EditorError, NativeEvent};
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    pub type Editor;

    pub type EditSession;

    #[wasm_bindgen(js_namespace = ace, js_name = "edit", catch)]
    fn edit(element: &Element) -> Result<Editor, JsValue>;

    #[wasm_bindgen(method, js_name = "getValue")]
    fn get_value(this: &Editor) -> String;

    #[wasm_bindgen(method, js_name = "setValue")]
    fn set_value(this: &Editor, value: &str);

    #[wasm_bindgen(method, js_name = "setOptions")]
    fn set_options(this: &Editor, options: &JsValue);

    #[wasm_bindgen(method, js_name = "setTheme")]
    fn set_theme(this: &Editor, theme: &str);

    #[wasm_bindgen(method, js_name = "setReadOnly")]
    fn set_read_only(this: &Editor, read_only: bool);

    #[wasm_bindgen(method, js_name = "getSession")]
    fn get_session(this: &Editor) -> EditSession;

    #[wasm_bindgen(method)]
    fn on(this: &Editor, event: &str, handler: &Closure<dyn FnMut()>);

    #[wasm_bindgen(method, js_name = "clearSelection")]
    fn clear_selection(this: &Editor);

    #[wasm_bindgen(method)]
    fn destroy(this: &Editor);

    #[wasm_bindgen(method, js_name = "setMode")]
    fn set_mode(this: &EditSession, mode: &JsValue);
}

/// An Ace editor instance created through the global `ace` object.
pub struct AceEngine {
    editor: Editor,
    // Kept alive until the editor is destroyed.
    handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl EditorEngine for AceEngine {
    type Anchor = Element;
    type Options = JsValue;
    type CustomMode = JsValue;

    fn create(anchor: &Element) -> Result<Self, EditorError> {
        let editor = edit(anchor)
            .map_err(|err| EditorError::Construction(format!("{err:?}")))?;
        // Silences Ace's scrolling deprecation warning.
        js_sys::Reflect::set(
            &editor,
            &"$blockScrolling".into(),
            &f64::INFINITY.into(),
        )
        .map_err(|err| EditorError::Construction(format!("{err:?}")))?;
        Ok(Self {
            editor,
            handlers: RefCell::new(Vec::new()),
        })
    }

    fn value(&self) -> String {
        self.editor.get_value()
    }

    fn set_value(&self, text: &str) {
        self.editor.set_value(text);
    }

    fn set_options(&self, options: &JsValue) {
        if options.is_undefined() || options.is_null() {
            self.editor.set_options(&js_sys::Object::new());
        } else {
            self.editor.set_options(options);
        }
    }

    fn set_theme(&self, theme: &str) {
        self.editor.set_theme(theme);
    }

    fn set_mode_path(&self, path: &str) {
        self.editor.get_session().set_mode(&JsValue::from_str(path));
    }

    fn set_custom_mode(&self, mode: &JsValue) {
        self.editor.get_session().set_mode(mode);
    }

    fn set_read_only(&self, read_only: bool) {
        self.editor.set_read_only(read_only);
    }

    fn subscribe(&self, event: NativeEvent, handler: Box<dyn FnMut()>) {
        let handler = Closure::wrap(handler);
        self.editor.on(event.name(), &handler);
        self.handlers.borrow_mut().push(handler);
    }

    fn clear_selection(&self) {
        self.editor.clear_selection();
    }

    fn destroy(self) {
        self.editor.destroy();
    }
}
