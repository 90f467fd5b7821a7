//! Browser HTTP client implementation using gloo-net

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{
    ApiClientConfig, ApiError, CreateSessionRequest, CreateSessionResponse, DirectDnsApi,
};
use web_sys::AbortController;

/// WASM API client using gloo-net
#[derive(Debug, Clone, Default)]
pub struct GlooApiClient {
    config: ApiClientConfig,
}

impl GlooApiClient {
    pub fn new(config: ApiClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }
}

/// setTimeout takes a signed 32-bit delay; anything larger fires at once
const MAX_TIMER_MILLIS: u32 = i32::MAX as u32;

fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis())
        .unwrap_or(MAX_TIMER_MILLIS)
        .min(MAX_TIMER_MILLIS)
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

impl DirectDnsApi for GlooApiClient {
    async fn create_session(
        &self,
        req: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, ApiError> {
        let url = self.config.create_url();

        // Abort the fetch once the timeout fires. Dropping the timer on
        // return cancels it.
        let controller = AbortController::new().ok();
        let timed_out = Rc::new(Cell::new(false));
        let _timer = match (self.config.timeout, controller.as_ref()) {
            (Some(timeout), Some(controller)) => {
                let controller = controller.clone();
                let timed_out = timed_out.clone();
                Some(Timeout::new(timeout_millis(timeout), move || {
                    timed_out.set(true);
                    controller.abort();
                }))
            }
            _ => None,
        };
        let signal = controller.as_ref().map(|c| c.signal());

        let result = async {
            let request = Request::post(&url)
                .abort_signal(signal.as_ref())
                .json(&req)
                .map_err(|e| ApiError::Parse(e.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            handle_response(response).await
        }
        .await;

        match (result, self.config.timeout) {
            (Err(_), Some(timeout)) if timed_out.get() => Err(ApiError::Timeout(timeout)),
            (result, _) => result,
        }
    }
}
