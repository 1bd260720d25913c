use ace_binding_common::{EditorAdapter, Mode};
use sycamore::prelude::*;
use sycamore::reactive::untrack;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::ace::AceEngine;
use crate::timer::TimeoutScheduler;

pub type AceAdapter = EditorAdapter<AceEngine, TimeoutScheduler>;

#[derive(Prop)]
pub struct AceEditorProps<'a> {
    text: RcSignal<String>,
    options: &'a ReadSignal<JsValue>,
    theme: &'a ReadSignal<String>,
    mode: &'a ReadSignal<Mode<JsValue>>,
    read_only: &'a ReadSignal<bool>,
    auto_update_content: &'a ReadSignal<bool>,
    duration_before_callback: &'a ReadSignal<u32>,
}

/// Ace editor bound two-way to `text`.
#[component]
pub fn AceEditor<'a, G: Html>(cx: Scope<'a>, props: AceEditorProps<'a>) -> View<G> {
    let AceEditorProps {
        text,
        options,
        theme,
        mode,
        read_only,
        auto_update_content,
        duration_before_callback,
    } = props;

    let adapter = create_ref(cx, AceAdapter::new(TimeoutScheduler));
    let editor_ref = create_node_ref(cx);

    let sink = text.clone();
    adapter.on_text_change(move |value| {
        if sink.get_untracked().as_str() != value {
            sink.set(value.to_string());
        }
    });

    create_effect(cx, move || adapter.set_options(options.get().as_ref().clone()));
    create_effect(cx, move || adapter.set_theme(theme.get().as_str()));
    create_effect(cx, move || adapter.set_mode(mode.get().as_ref().clone()));
    create_effect(cx, move || adapter.set_read_only(*read_only.get()));
    create_effect(cx, move || {
        adapter.set_auto_update_content(*auto_update_content.get())
    });
    create_effect(cx, move || {
        adapter.set_duration_before_callback(*duration_before_callback.get())
    });
    create_effect(cx, move || adapter.set_text(Some(text.get().as_str())));

    on_mount(cx, move || {
        let element: Element = editor_ref.get::<DomNode>().unchecked_into();
        if let Err(err) = untrack(|| adapter.mount(&element)) {
            log::error!("{err}");
        }
    });
    on_cleanup(cx, move || adapter.teardown());

    view! { cx,
        div(style="display:block; width:100%; height:100%;", ref=editor_ref)
    }
}
