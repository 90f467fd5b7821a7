//! Single page for creating proxy sessions and listing the ones created
//! during this visit.

use std::rc::Rc;

use shared::{
    ApiClientConfig, ApiError, CreateSessionResponse, DirectDnsApi, Phase, ProxySessionsState,
    SubmitError, Submission,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::client::GlooApiClient;
use crate::components::SessionListView;

#[derive(Properties, PartialEq)]
pub struct ProxySessionsProps {
    #[prop_or_default]
    pub config: ApiClientConfig,
}

pub enum ProxySessionsMsg {
    UpdateHostname(String),
    UpdateIp(String),
    Submit,
    Completed(Submission, Result<CreateSessionResponse, ApiError>),
}

fn phase_class(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Submitting => "submitting",
        Phase::Error => "has-error",
        Phase::IdleWithSessions => "has-sessions",
    }
}

pub struct ProxySessionsPage {
    client: Rc<GlooApiClient>,
    state: ProxySessionsState,
}

impl Component for ProxySessionsPage {
    type Message = ProxySessionsMsg;
    type Properties = ProxySessionsProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            client: Rc::new(GlooApiClient::new(ctx.props().config.clone())),
            state: ProxySessionsState::new(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.client = Rc::new(GlooApiClient::new(ctx.props().config.clone()));
        false
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ProxySessionsMsg::UpdateHostname(hostname) => {
                self.state.set_hostname(hostname);
                true
            }
            ProxySessionsMsg::UpdateIp(ip) => {
                self.state.set_ip(ip);
                true
            }
            ProxySessionsMsg::Submit => match self.state.begin_submit() {
                Ok(submission) => {
                    let client = self.client.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = client.create_session(submission.request.clone()).await;
                        if let Err(e) = &result {
                            log::error!("Failed to create session: {:?}", e);
                        }
                        link.send_message(ProxySessionsMsg::Completed(submission, result));
                    });
                    true
                }
                Err(SubmitError::Validation) => true,
                Err(SubmitError::InFlight) => {
                    log::debug!("Ignoring submit while a request is outstanding");
                    false
                }
            },
            ProxySessionsMsg::Completed(submission, result) => {
                let config = self.client.config();
                if let Some(session) = self.state.complete_submit(submission, result, config) {
                    log::info!("Created proxy session {} for {}", session.url, session.name);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let form = self.state.form();
        let submitting = self.state.is_submitting();

        let on_submit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ProxySessionsMsg::Submit
        });
        let on_hostname_input = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ProxySessionsMsg::UpdateHostname(input.value())
        });
        let on_ip_input = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ProxySessionsMsg::UpdateIp(input.value())
        });

        html! {
            <div class={classes!("proxy-sessions-page", phase_class(self.state.phase()))}>
                <div class="create-session-card">
                    <div class="create-session-header">
                        <h2>{ "Create New Proxy Session" }</h2>
                        <p class="create-session-help">
                            { "Enter the hostname and optional IP address to create a new proxy session. \
                               Proxy links are not permanent and are removed after a while \
                               (usually a few days)." }
                        </p>
                    </div>

                    <form class="create-session-form" onsubmit={on_submit}>
                        <label class="form-field">
                            <span class="form-label">
                                { "Hostname " }<span class="required">{ "*" }</span>
                            </span>
                            <input
                                type="text"
                                placeholder="example.com"
                                value={form.hostname.clone()}
                                oninput={on_hostname_input}
                            />
                        </label>

                        <label class="form-field">
                            <span class="form-label">{ "IP Address (Optional)" }</span>
                            <input
                                type="text"
                                placeholder="45.8.22.46"
                                value={form.ip.clone()}
                                oninput={on_ip_input}
                            />
                        </label>

                        if let Some(error) = &form.error {
                            <div class="form-error" role="alert">{ error }</div>
                        }

                        <div class="form-actions">
                            <button type="submit" disabled={submitting}>
                                { if submitting { "Creating..." } else { "Create Session" } }
                            </button>
                        </div>
                    </form>
                </div>

                <SessionListView sessions={self.state.sessions().clone()} />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_class() {
        let mut state = ProxySessionsState::new();
        assert_eq!(phase_class(state.phase()), "idle");

        let _ = state.begin_submit();
        assert_eq!(phase_class(state.phase()), "has-error");

        state.set_hostname("example.com".to_string());
        let _submission = state.begin_submit().unwrap();
        assert_eq!(phase_class(state.phase()), "submitting");
    }
}
