use shared::{Session, SessionList};
use yew::prelude::*;

use super::CopyButton;

#[derive(Properties, PartialEq)]
pub struct SessionRowProps {
    pub session: Session,
}

#[function_component(SessionRow)]
pub fn session_row(props: &SessionRowProps) -> Html {
    let session = &props.session;
    let details = format!("{} ({})", session.name, session.ip_label());

    html! {
        <li class="session-row">
            <span class="session-url">{ &session.url }</span>
            <span class="session-details">{ details }</span>
            <div class="session-actions">
                <CopyButton text={session.url.clone()} />
                <a
                    class="session-action open"
                    href={session.url.clone()}
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    { "Open" }
                </a>
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionListViewProps {
    pub sessions: SessionList,
}

/// Sessions created in this tab, newest first. Renders nothing when empty.
#[function_component(SessionListView)]
pub fn session_list_view(props: &SessionListViewProps) -> Html {
    if props.sessions.is_empty() {
        return html! {};
    }

    html! {
        <div class="session-list">
            <h3>{ "Your Proxy Sessions (Resets on page reload)" }</h3>
            <ul>
                // Rows are only ever prepended, so the position from the end is stable
                { for props.sessions.iter().enumerate().map(|(idx, session)| {
                    let key = props.sessions.len() - idx;
                    html! { <SessionRow key={key} session={session.clone()} /> }
                }) }
            </ul>
        </div>
    }
}
