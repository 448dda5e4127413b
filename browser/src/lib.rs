//! Browser binding for the user update view.
//!
//! On start the module waits for the document, reads optional element id
//! overrides from a `#registration-config` JSON block, and hands the live
//! page, `navigator.credentials` and `localStorage` to a
//! `UserUpdateViewModel`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use registration::page::event_channel;
use registration::{Config, UserUpdateViewModel};

use crate::credentials::BrowserCredentials;
use crate::page::BrowserPage;
use crate::storage::BrowserStorage;

pub mod console;
pub mod credentials;
mod exception;
pub mod page;
pub mod storage;

const CONFIG_ELEMENT: &str = "registration-config";

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console::init_tracing();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        start(document);

        return Ok(());
    }

    let ready_document = document.to_owned();
    let on_ready = Closure::once_into_js(move || start(ready_document));

    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn config(document: &Document) -> Config {
    let json = document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|element| element.text_content());

    match json {
        Some(json) => Config::from_json(&json).unwrap_or_else(|error| {
            tracing::warn!("ignoring #{} -> {}", CONFIG_ELEMENT, error);

            Config::default()
        }),
        None => Config::default(),
    }
}

fn start(document: Document) {
    let config = config(&document);

    let credentials = match BrowserCredentials::init() {
        Ok(credentials) => credentials,
        Err(error) => {
            tracing::error!("credentials container unavailable -> {}", error);

            return;
        }
    };

    let (events, receiver) = event_channel();
    let page = BrowserPage::init(document, events);
    let view_model = UserUpdateViewModel::new(config, page, credentials, BrowserStorage::init());

    if !view_model.ready() {
        tracing::debug!("user update view not on this page");

        return;
    }

    wasm_bindgen_futures::spawn_local(async move {
        view_model.run(receiver).await;
    });
}
