//! Object definitions under `/definitions`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use crate::auth::{basic_credentials, client_ip};
use crate::error::ApiError;
use crate::server::{Gateway, with_connection};

/// All object classes, each linked to its per-class definition.
pub async fn index(
    State(gateway): State<Arc<Gateway>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(&headers).ok_or(ApiError::Unauthorized)?;
    let ip = client_ip(&peer);
    let prefix = gateway.api_prefix.clone();

    let mut classes = with_connection(gateway, credentials, ip, |conn| {
        conn.get_object_classes()
    })
    .await?;
    classes.sort();

    let listing: Vec<Value> = classes
        .iter()
        .map(|class| {
            json!({
                "class": class,
                "link": format!("{prefix}/definitions/{class}"),
            })
        })
        .collect();
    Ok(Json(listing).into_response())
}

/// Attribute descriptions of every type in one class.
pub async fn class(
    State(gateway): State<Arc<Gateway>>,
    Path(class): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(&headers).ok_or(ApiError::Unauthorized)?;
    let ip = client_ip(&peer);

    let definitions = with_connection(gateway, credentials, ip, move |conn| {
        let types = conn.get_object_types(&class)?;
        let mut definitions = Map::new();
        for object_type in types {
            let description = conn.get_object_description(&class, &object_type)?;
            definitions.insert(object_type, Value::Object(description));
        }
        Ok(definitions)
    })
    .await?;

    if definitions.is_empty() {
        // an unknown class has no types
        return Err(ApiError::NotFound);
    }
    Ok(Json(Value::Object(definitions)).into_response())
}
