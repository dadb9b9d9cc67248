// src/core/net.rs
//
// Blocking HTTP GET. One agent per run; connections are pooled inside it.

use std::time::Duration;

use thiserror::Error;

use crate::config::consts::USER_AGENT;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    #[error("request to {url} failed: {msg}")]
    Transport { url: String, msg: String },

    #[error("unreadable body from {url}: {source}")]
    Body { url: String, source: std::io::Error },
}

pub fn agent(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
}

/// Agent with no timeout configured: waits as long as the server does.
pub fn agent_untimed() -> ureq::Agent {
    ureq::AgentBuilder::new().user_agent(USER_AGENT).build()
}

fn call(req: ureq::Request, url: &str) -> Result<ureq::Response, NetError> {
    req.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => NetError::Status { code, url: s!(url) },
        ureq::Error::Transport(t) => NetError::Transport { url: s!(url), msg: t.to_string() },
    })
}

/// GET a text body. Any non-2xx status is an error.
pub fn http_get(agent: &ureq::Agent, url: &str) -> Result<String, NetError> {
    let resp = call(agent.get(url), url)?;
    resp.into_string()
        .map_err(|source| NetError::Body { url: s!(url), source })
}

/// GET with query parameters, body decoded as JSON.
pub fn http_get_json(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&str, &str)],
) -> Result<serde_json::Value, NetError> {
    let mut req = agent.get(url);
    for (k, v) in query {
        req = req.query(k, v);
    }
    let resp = call(req, url)?;
    resp.into_json()
        .map_err(|source| NetError::Body { url: s!(url), source })
}
