pub mod proxy_sessions;
