//! Create one or more sessions through the same state machine the web page
//! uses, so results come back newest first.

use shared::{DirectDnsApi, ProxySessionsState, Session};

/// A hostname and optional IP taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub hostname: String,
    pub ip: String,
}

impl Entry {
    pub fn new(hostname: &str, ip: &str) -> Self {
        Self {
            hostname: hostname.trim().to_string(),
            ip: ip.trim().to_string(),
        }
    }

    /// Parse `HOSTNAME` or `HOSTNAME=IP`
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((hostname, ip)) => Self::new(hostname, ip),
            None => Self::new(raw, ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub hostname: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub state: ProxySessionsState,
    pub failures: Vec<Failure>,
}

impl BatchOutcome {
    pub fn sessions(&self) -> Vec<Session> {
        self.state.sessions().iter().cloned().collect()
    }
}

/// Submit every entry in order. A failed entry is recorded and the batch
/// carries on.
pub async fn run<A: DirectDnsApi>(
    api: &A,
    config: &shared::ApiClientConfig,
    entries: Vec<Entry>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for entry in entries {
        outcome.state.set_hostname(entry.hostname.clone());
        outcome.state.set_ip(entry.ip);

        let submission = match outcome.state.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                outcome.failures.push(Failure {
                    hostname: entry.hostname,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let result = api.create_session(submission.request.clone()).await;
        match outcome.state.complete_submit(submission, result, config) {
            Some(session) => {
                tracing::info!(url = %session.url, hostname = %session.name, "session created");
            }
            None => {
                let message = outcome.state.form().error.clone().unwrap_or_default();
                tracing::warn!(hostname = %entry.hostname, error = %message, "session creation failed");
                outcome.failures.push(Failure {
                    hostname: entry.hostname,
                    message,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ApiClientConfig, ApiError, CreateSessionRequest, CreateSessionResponse};
    use std::sync::Mutex;

    /// Answers with the hostname as token, failing for hostnames starting with "bad"
    #[derive(Default)]
    struct FakeApi {
        requests: Mutex<Vec<CreateSessionRequest>>,
    }

    impl DirectDnsApi for FakeApi {
        async fn create_session(
            &self,
            req: CreateSessionRequest,
        ) -> Result<CreateSessionResponse, ApiError> {
            self.requests.lock().unwrap().push(req.clone());
            if req.hostname.starts_with("bad") {
                return Err(ApiError::Status {
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(CreateSessionResponse {
                token: req.hostname.replace('.', "-"),
                full_url: None,
                domain: None,
            })
        }
    }

    #[test]
    fn test_entry_parse() {
        assert_eq!(
            Entry::parse("example.com"),
            Entry {
                hostname: "example.com".to_string(),
                ip: String::new()
            }
        );
        assert_eq!(
            Entry::parse("example.com=45.8.22.46"),
            Entry {
                hostname: "example.com".to_string(),
                ip: "45.8.22.46".to_string()
            }
        );
        assert_eq!(Entry::parse("=1.2.3.4").hostname, "");
    }

    #[test]
    fn test_entry_new_trims_like_parse() {
        assert_eq!(Entry::new(" ", ""), Entry::parse(" "));
        assert_eq!(
            Entry::new(" example.com ", " 10.0.0.1 "),
            Entry::parse("example.com=10.0.0.1")
        );
    }

    #[tokio::test]
    async fn test_whitespace_hostname_never_reaches_api() {
        let api = FakeApi::default();
        let config = ApiClientConfig::default();

        let outcome = run(&api, &config, vec![Entry::new("   ", "")]).await;

        assert!(outcome.sessions().is_empty());
        assert_eq!(outcome.failures[0].message, "Hostname is required.");
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_is_newest_first_and_continues_after_failure() {
        let api = FakeApi::default();
        let config = ApiClientConfig::default();
        let entries = vec![
            Entry::parse("one.example"),
            Entry::parse("bad.example"),
            Entry::parse("=10.0.0.1"),
            Entry::parse("two.example=10.0.0.2"),
        ];

        let outcome = run(&api, &config, entries).await;

        let urls: Vec<String> = outcome.sessions().into_iter().map(|s| s.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://two-example.directdns.net/".to_string(),
                "https://one-example.directdns.net/".to_string(),
            ]
        );

        assert_eq!(
            outcome.failures,
            vec![
                Failure {
                    hostname: "bad.example".to_string(),
                    message: "Failed to create session".to_string(),
                },
                Failure {
                    hostname: String::new(),
                    message: "Hostname is required.".to_string(),
                },
            ]
        );

        // The empty hostname never reached the API
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].ip_address.as_deref(), Some("10.0.0.2"));
        assert_eq!(requests[0].ip_address, None);
    }
}
