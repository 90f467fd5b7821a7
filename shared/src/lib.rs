//! Types shared between the DirectDNS web page and the API tooling.

// API client types and trait
pub mod api;
pub use api::{
    ApiClientConfig, ApiError, CreateSessionRequest, CreateSessionResponse, DirectDnsApi,
};

// Session records
pub mod session;
pub use session::{Session, SessionList};

// Page state machine
pub mod state;
pub use state::{
    CopyOutcome, FormState, Phase, ProxySessionsState, SubmitError, Submission, HOSTNAME_REQUIRED,
};
