mod ace;
mod editor_view;
mod timer;

use ace_binding_common::{Mode, DEFAULT_MODE, DEFAULT_THEME};
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use sycamore::prelude::*;
use wasm_bindgen::JsValue;

use crate::editor_view::AceEditor;

static CODE_KEY: &str = "CODE";
static SETTINGS_KEY: &str = "EDITOR_SETTINGS";

static DEFAULT_EDITOR_TEXT: &str = r#"<!DOCTYPE html>
<html>
    <body>
        <p>Hello World!</p>
    </body>
</html>
"#;

const MODES: [&str; 5] = ["html", "css", "json", "xml", "text"];
const THEMES: [&str; 4] = ["textmate", "github", "monokai", "tomorrow_night"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Settings {
    mode: String,
    theme: String,
    read_only: bool,
    debounce_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            theme: DEFAULT_THEME.to_string(),
            read_only: false,
            debounce_ms: 0,
        }
    }
}

static DEFAULT_OPTIONS: &str = r#"{ "fontSize": 14, "showPrintMargin": false, "useSoftTabs": true }"#;

fn default_options() -> JsValue {
    js_sys::JSON::parse(DEFAULT_OPTIONS).expect("default editor options are valid JSON")
}

fn choices<G: Html>(cx: Scope, names: &[&'static str], current: &str) -> View<G> {
    View::new_fragment(
        names
            .iter()
            .map(|&name| {
                let selected = name == current;
                view! { cx, option(value=name, selected=selected) { (name) } }
            })
            .collect(),
    )
}

#[derive(Prop)]
struct NavBarProps<'a> {
    mode: &'a Signal<String>,
    theme: &'a Signal<String>,
    read_only: &'a Signal<bool>,
    auto_update: &'a Signal<bool>,
    debounce: &'a Signal<f64>,
    reset: &'a RcSignal<String>,
}

#[component]
fn NavBar<'a, G: Html>(cx: Scope<'a>, props: NavBarProps<'a>) -> View<G> {
    let modes = choices(cx, &MODES, &props.mode.get_untracked());
    let themes = choices(cx, &THEMES, &props.theme.get_untracked());
    let reset = props.reset;

    view! { cx,
        nav(class="px-2 bg-gray-100 border-gray-300 border-b flex flex-row items-center space-x-4") {
            h1(class="inline-block text-xl py-1") {
                span(class="font-extrabold") { "Ace" }
                span(class="font-light") { " Binding" }
            }
            label {
                "Mode "
                select(bind:value=props.mode) { (modes) }
            }
            label {
                "Theme "
                select(bind:value=props.theme) { (themes) }
            }
            label {
                input(type="checkbox", bind:checked=props.read_only)
                " Read-only"
            }
            label {
                input(type="checkbox", bind:checked=props.auto_update)
                " Accept external text"
            }
            label {
                "Debounce (ms) "
                input(type="number", min="0", step="50", class="w-20", bind:valueAsNumber=props.debounce)
            }
            div(class="grow")
            button(
                type="button",
                on:click=move |_| reset.set(DEFAULT_EDITOR_TEXT.to_string()),
                class="px-5 -my-px bg-yellow-400 font-bold text-white"
            ) { "Reset" }
        }
    }
}

#[component]
fn Index<G: Html>(cx: Scope) -> View<G> {
    let settings: Settings = LocalStorage::get(SETTINGS_KEY).unwrap_or_default();

    // Read the saved draft before the effect below overwrites it.
    let code: String = LocalStorage::get(CODE_KEY).unwrap_or_else(|_| String::new());
    let code = if code.trim() == "" {
        DEFAULT_EDITOR_TEXT.to_string()
    } else {
        code
    };
    let text = create_rc_signal(code);
    let text_ref = create_ref(cx, text.clone());

    let mode_name = create_signal(cx, settings.mode);
    let theme = create_signal(cx, settings.theme);
    let read_only = create_signal(cx, settings.read_only);
    let auto_update = create_signal(cx, true);
    let debounce = create_signal(cx, f64::from(settings.debounce_ms));
    let options = create_signal(cx, default_options());

    let mode = create_memo(cx, move || Mode::<JsValue>::named(mode_name.get().as_str()));
    let debounce_ms = create_memo(cx, move || (*debounce.get()).max(0.0) as u32);

    create_effect(cx, move || {
        if let Err(err) = LocalStorage::set(CODE_KEY, text_ref.get().as_ref()) {
            log::warn!("failed to save draft: {err}");
        }
    });
    create_effect(cx, move || {
        let settings = Settings {
            mode: mode_name.get().as_ref().clone(),
            theme: theme.get().as_ref().clone(),
            read_only: *read_only.get(),
            debounce_ms: *debounce_ms.get(),
        };
        if let Err(err) = LocalStorage::set(SETTINGS_KEY, &settings) {
            log::warn!("failed to save settings: {err}");
        }
    });

    view! { cx,
        NavBar(
            mode=mode_name,
            theme=theme,
            read_only=read_only,
            auto_update=auto_update,
            debounce=debounce,
            reset=text_ref,
        )
        main(
            class="px-2 top-10 bottom-0 w-full absolute \
                grid grid-cols-1 grid-rows-2 md:grid-cols-2 md:grid-rows-1 \
                divide-y md:divide-y-0 md:divide-x divide-gray-400 space-y-2 md:space-x-2 \
                overflow-hidden"
        ) {
            AceEditor(
                text=text,
                options=options,
                theme=theme,
                mode=mode,
                read_only=read_only,
                auto_update_content=auto_update,
                duration_before_callback=debounce_ms,
            )
            div(class="block h-full w-full pb-2 overflow-auto") {
                p { "Characters: " (text_ref.get().chars().count()) }
                pre { (text_ref.get().to_string()) }
            }
        }
    }
}

#[component]
fn App<G: Html>(cx: Scope) -> View<G> {
    view! { cx,
        Index {}
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).unwrap();

    sycamore::render(|cx| view! { cx, App {} });
}
