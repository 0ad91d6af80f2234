//! Router assembly and the blocking-call bridge into the client library.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get};

use crate::auth::{Credentials, authenticated_conn};
use crate::error::ApiError;
use crate::{definitions_api, objects_api};

pub struct Gateway {
    pub confd_url: String,
    pub api_prefix: String,
}

impl Gateway {
    pub fn new(confd_url: String, api_prefix: String) -> Gateway {
        Gateway {
            confd_url,
            api_prefix,
        }
    }
}

pub fn router(gateway: Arc<Gateway>) -> Router {
    let api = Router::new()
        .route("/objects/{class}/{type}", any(objects_api::collection))
        .route("/objects/{class}/{type}/{ref}", any(objects_api::member))
        .route("/definitions", get(definitions_api::index))
        .route("/definitions/{class}", get(definitions_api::class))
        .with_state(Arc::clone(&gateway));

    if gateway.api_prefix == "/" {
        api
    } else {
        Router::new().nest(&gateway.api_prefix, api)
    }
}

pub async fn serve(gateway: Gateway, listen: SocketAddr) -> io::Result<()> {
    let gateway = Arc::new(gateway);
    let app = router(Arc::clone(&gateway));
    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!("Listening on http://{listen}{}", gateway.api_prefix);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

/// Run one unit of work on a fresh authenticated connection, off the
/// async runtime. The connection is closed afterwards; if it were still
/// alive the daemon would kill it anyway.
pub async fn with_connection<T, F>(
    gateway: Arc<Gateway>,
    credentials: Credentials,
    ip: String,
    work: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&confd::Conn) -> confd::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let conn = authenticated_conn(&gateway.confd_url, &credentials, &ip)?;
        let result = work(&conn).map_err(ApiError::from);
        let _ = conn.close();
        result
    })
    .await
    .map_err(|err| ApiError::Confd(confd::Error::Transport(io::Error::other(err))))?
}
