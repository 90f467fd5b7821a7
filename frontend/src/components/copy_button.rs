//! Copy Button Component
//!
//! Copies a proxy URL to the clipboard and acknowledges with an alert.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::clipboard;

#[derive(Properties, PartialEq, Clone)]
pub struct CopyButtonProps {
    /// The text to copy
    pub text: AttrValue,
}

#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let on_copy = {
        let text = props.text.clone();

        Callback::from(move |_: MouseEvent| {
            let text = text.to_string();
            spawn_local(async move {
                clipboard::copy_with_acknowledgment(text).await;
            });
        })
    };

    html! {
        <button
            type="button"
            class="session-action copy"
            onclick={on_copy}
            title="Copy to clipboard"
        >
            { "Copy" }
        </button>
    }
}
