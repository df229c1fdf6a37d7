use lbol_stats::DataError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Response, UrlSearchParams, Window};

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error outside of a browser context.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when the window has no document.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("`document` unavailable"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Read one query parameter of the current page, e.g. `?char=ReimuA`.
#[must_use]
pub fn query_param(name: &str) -> Option<String> {
    let search = window().ok()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

/// Reload the page with a new query string.
///
/// # Errors
/// Returns an error outside of a browser context.
pub fn navigate(search: &str) -> Result<(), JsValue> {
    window()?.location().set_search(search)
}

/// Set the document title.
pub fn set_title(title: &str) {
    if let Ok(doc) = document() {
        doc.set_title(title);
    }
}

/// Set `<html lang>` to the active language.
pub fn set_html_lang(code: &str) {
    if let Some(el) = document().ok().and_then(|doc| doc.document_element()) {
        let _ = el.set_attribute("lang", code);
    }
}

async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let resp_value = JsFuture::from(window()?.fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Fetch a document and return its body as text.
///
/// # Errors
/// Returns [`DataError::Network`] when the request fails or the server
/// answers with a non-success status.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_text(url: &str) -> Result<String, DataError> {
    let network = |message: String| DataError::Network {
        url: url.to_string(),
        message,
    };
    let response = fetch_response(url)
        .await
        .map_err(|err| network(js_error_message(&err)))?;
    if !response.ok() {
        return Err(network(format!("HTTP {}", response.status())));
    }
    let body = response.text().map_err(|err| network(js_error_message(&err)))?;
    JsFuture::from(body)
        .await
        .map_err(|err| network(js_error_message(&err)))?
        .as_string()
        .ok_or_else(|| network("response body is not text".to_string()))
}
