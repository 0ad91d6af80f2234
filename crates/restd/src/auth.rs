//! HTTP Basic credentials bound to per-request confd connections.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use base64::Engine;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Extract HTTP Basic credentials from the request headers.
pub fn basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Client address in the form confd expects, without IPv6 brackets.
pub fn client_ip(peer: &SocketAddr) -> String {
    peer.ip().to_string()
}

/// Open a connection for the given user. An unauthenticated session keeps
/// the daemon's null session id `"0"`, which counts as a failure here.
pub fn authenticated_conn(
    confd_url: &str,
    credentials: &Credentials,
    ip: &str,
) -> Result<confd::Conn, ApiError> {
    let conn = confd::Conn::new(confd_url).map_err(|_| ApiError::Unauthorized)?;
    {
        let mut options = conn.options();
        options.facility = "webadmin".to_string();
        options.username = credentials.username.clone();
        options.password = credentials.password.clone();
        options.ip = ip.to_string();
    }

    if conn.connect().is_err() || !sid_is_valid(conn.options().sid.as_ref()) {
        let _ = conn.close();
        return Err(ApiError::Unauthorized);
    }
    Ok(conn)
}

fn sid_is_valid(sid: Option<&Value>) -> bool {
    match sid {
        None => false,
        Some(Value::String(text)) => text != "0",
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(_) => true,
    }
}
