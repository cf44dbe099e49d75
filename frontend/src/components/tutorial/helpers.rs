//! Utility functions for the tutorial editor component.

use base64::{engine::general_purpose, Engine as _};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Builds the embeddable `data:` reference for a locally read image file.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { "image/png" } else { mime };
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Hands the rendered PDF bytes to the browser as a download with the fixed
/// filename. The object URL is revoked shortly after the click; the download
/// itself starts synchronously.
pub fn trigger_download(bytes: &[u8], filename: &str) {
    let blob = gloo_file::Blob::new_with_options(bytes, Some("application/pdf"));
    let web_blob: web_sys::Blob = blob.into();
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&web_blob) else {
        gloo_console::error!("failed to create object URL for the PDF");
        return;
    };

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(anchor) = document.create_element("a") {
            let _ = anchor.set_attribute("href", &url);
            let _ = anchor.set_attribute("download", filename);
            if let Ok(anchor) = anchor.dyn_into::<HtmlElement>() {
                anchor.click();
            }
        }
    }

    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        let _ = web_sys::Url::revoke_object_url(&url);
    });
}

/// Displays a temporary notification message at the bottom of the screen.
/// The toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_inner_html(message);
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
