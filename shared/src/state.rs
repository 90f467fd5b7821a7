//! Page state for creating and listing proxy sessions.
//!
//! Kept free of any browser types so the submit lifecycle can be driven by
//! the Yew page, the CLI batch command and unit tests alike.

use crate::api::{ApiClientConfig, ApiError, CreateSessionRequest, CreateSessionResponse};
use crate::session::{Session, SessionList};

/// Shown when the form is submitted without a hostname
pub const HOSTNAME_REQUIRED: &str = "Hostname is required.";

/// Form inputs plus the inline error message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub hostname: String,
    pub ip: String,
    pub error: Option<String>,
}

impl FormState {
    pub fn clear_inputs(&mut self) {
        self.hostname.clear();
        self.ip.clear();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Where the page currently is in the submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Error,
    IdleWithSessions,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Hostname is required.")]
    Validation,
    #[error("A session is already being created")]
    InFlight,
}

/// An accepted submit: the inputs as they were when the user pressed the
/// button, and the request to send for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub hostname: String,
    pub ip: String,
    pub request: CreateSessionRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySessionsState {
    form: FormState,
    sessions: SessionList,
    in_flight: bool,
}

impl ProxySessionsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn sessions(&self) -> &SessionList {
        &self.sessions
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight {
            Phase::Submitting
        } else if self.form.error.is_some() {
            Phase::Error
        } else if self.sessions.is_empty() {
            Phase::Idle
        } else {
            Phase::IdleWithSessions
        }
    }

    pub fn set_hostname(&mut self, hostname: String) {
        self.form.hostname = hostname;
    }

    pub fn set_ip(&mut self, ip: String) {
        self.form.ip = ip;
    }

    /// Start a submit attempt.
    ///
    /// A rejected duplicate leaves the state untouched. Every other attempt
    /// clears the previous error first.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        self.form.clear_error();

        if self.form.hostname.is_empty() {
            self.form.error = Some(HOSTNAME_REQUIRED.to_string());
            return Err(SubmitError::Validation);
        }

        self.in_flight = true;
        Ok(Submission {
            hostname: self.form.hostname.clone(),
            ip: self.form.ip.clone(),
            request: CreateSessionRequest::from_form(&self.form.hostname, &self.form.ip),
        })
    }

    /// Apply the outcome of a request started by [`Self::begin_submit`].
    ///
    /// Returns the new session on success.
    pub fn complete_submit(
        &mut self,
        submission: Submission,
        result: Result<CreateSessionResponse, ApiError>,
        config: &ApiClientConfig,
    ) -> Option<&Session> {
        self.in_flight = false;

        match result {
            Ok(response) => {
                let session =
                    Session::from_response(&response, &submission.hostname, &submission.ip, config);
                self.sessions.prepend(session);
                self.form.clear_inputs();
                self.sessions.first()
            }
            Err(err) => {
                self.form.error = Some(err.to_string());
                None
            }
        }
    }
}

/// Result of a copy-to-clipboard attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn message(self) -> &'static str {
        match self {
            CopyOutcome::Copied => "Copied!",
            CopyOutcome::Failed => "Failed to copy!",
        }
    }
}
