//! CRUD over `/objects/{class}/{type}`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use confd::AnyObject;

use crate::auth::{basic_credentials, client_ip};
use crate::error::ApiError;
use crate::server::{Gateway, with_connection};

/// Collection requests: GET lists, POST creates.
pub async fn collection(
    State(gateway): State<Arc<Gateway>>,
    Path((class, object_type)): Path<(String, String)>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(&headers).ok_or(ApiError::Unauthorized)?;
    let ip = client_ip(&peer);

    match method.as_str() {
        "GET" => {
            let objects = with_connection(gateway, credentials, ip, move |conn| {
                conn.filter_objects()
                    .class_name(&class)
                    .type_name(&object_type)
                    .get()
            })
            .await?;
            Ok((StatusCode::OK, Json(objects)).into_response())
        }
        "POST" => {
            let mut object: AnyObject =
                serde_json::from_slice(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;
            object.meta.class = class;
            object.meta.object_type = object_type;
            let reference = with_connection(gateway, credentials, ip, move |conn| {
                conn.set_object(&object, true)
            })
            .await?;
            Ok((StatusCode::CREATED, Json(json!({"ref": reference}))).into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// Member requests addressed by reference: GET, PUT, PATCH, DELETE, LOCK,
/// UNLOCK.
pub async fn member(
    State(gateway): State<Arc<Gateway>>,
    Path((class, object_type, reference)): Path<(String, String, String)>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(&headers).ok_or(ApiError::Unauthorized)?;
    let ip = client_ip(&peer);

    if !reference.starts_with("REF_") {
        return Err(ApiError::NotFound);
    }

    match method.as_str() {
        "GET" => {
            let object = with_connection(gateway, credentials, ip, move |conn| {
                conn.get_object::<AnyObject>(&reference)
            })
            .await
            // a core failure here most likely means the ref does not exist
            .map_err(|err| match err {
                ApiError::Unauthorized => ApiError::Unauthorized,
                _ => ApiError::NotFound,
            })?;
            if object.meta.class != class || object.meta.object_type != object_type {
                // an object, but from a different place in the taxonomy
                return Err(ApiError::NotFound);
            }
            Ok((StatusCode::OK, Json(object)).into_response())
        }
        "PUT" => {
            let mut object: AnyObject =
                serde_json::from_slice(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;
            object.meta.reference = reference;
            object.meta.class = class;
            object.meta.object_type = object_type;
            with_connection(gateway, credentials, ip, move |conn| {
                conn.set_object(&object, false)
            })
            .await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "PATCH" => {
            let attributes: Map<String, Value> =
                serde_json::from_slice(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;
            with_connection(gateway, credentials, ip, move |conn| {
                conn.change_object(&reference, &attributes)
            })
            .await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "DELETE" => {
            with_connection(gateway, credentials, ip, move |conn| {
                conn.del_object(&reference)
            })
            .await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "LOCK" => {
            with_connection(gateway, credentials, ip, move |conn| {
                conn.lock_object(&reference)
            })
            .await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        "UNLOCK" => {
            with_connection(gateway, credentials, ip, move |conn| {
                conn.unlock_object(&reference)
            })
            .await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}
