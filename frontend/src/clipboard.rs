//! Clipboard access with a blocking acknowledgment for the user.

use shared::CopyOutcome;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard API is not available")]
    Unavailable,
    #[error("Clipboard write was rejected: {0}")]
    Rejected(String),
}

pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let navigator = window().ok_or(ClipboardError::Unavailable)?.navigator();
    // navigator.clipboard is undefined outside secure contexts
    let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into())
        .ok()
        .and_then(|v| v.dyn_into::<web_sys::Clipboard>().ok())
        .ok_or(ClipboardError::Unavailable)?;

    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
}

/// Copy `text` and tell the user how it went with an alert.
pub async fn copy_with_acknowledgment(text: String) -> CopyOutcome {
    let outcome = match write_text(&text).await {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            log::warn!("Copy failed: {}", e);
            CopyOutcome::Failed
        }
    };
    gloo::dialogs::alert(outcome.message());
    outcome
}
