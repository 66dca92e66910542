//! HTTP front for the mock service.

use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::debug;
use log::info;
use log::warn;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::ServerError;
use crate::query::QueryParams;

use super::MockVehicleService;
use super::Vehicle;
use super::VehicleQuery;

/// Path the vehicles resource is served at.
pub const VEHICLES_PATH: &str = "/vehicles";

/// A local HTTP server answering `GET /vehicles`.
///
/// # Example
///
/// ```ignore
/// let service = MockVehicleService::new(MockConfig::default());
/// let server = MockServer::bind("127.0.0.1:0".parse()?, service).await?;
/// let base_url = server.base_url()?;
///
/// let cancel = CancellationToken::new();
/// tokio::spawn(server.serve(cancel.clone()));
/// ```
pub struct MockServer {
    listener: TcpListener,
    service: Arc<MockVehicleService>,
}

#[derive(Serialize)]
struct PageBody<'a> {
    data: &'a [Vehicle],
    page: usize,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl MockServer {
    /// Binds a listener on `addr`. Use port 0 for an ephemeral port.
    pub async fn bind(addr: SocketAddr, service: MockVehicleService) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{}: {}", addr, e)))?;

        Ok(Self {
            listener,
            service: Arc::new(service),
        })
    }

    /// Returns the bound address.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener
            .local_addr()
            .map_err(|e| ServerError::Bind(format!("Failed to get local address: {}", e)))
    }

    /// Returns the `http://host:port` base URL of the server.
    pub fn base_url(&self) -> Result<String, ServerError> {
        Ok(format!("http://{}", self.local_addr()?))
    }

    /// Serves connections until `cancel` fires.
    pub async fn serve(self, cancel: CancellationToken) -> Result<(), ServerError> {
        info!("Mock server listening on {}", self.local_addr()?);

        loop {
            let (stream, peer) = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Mock server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted_or_warn(accepted) {
                    Some(accepted) => accepted,
                    None => continue,
                },
            };

            let io = TokioIo::new(stream);
            let service = self.service.clone();

            tokio::spawn(async move {
                let handler = service_fn(move |req: Request<Incoming>| {
                    let service = service.clone();
                    async move { Ok::<_, Infallible>(handle(&req, &service)) }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, handler).await {
                    warn!("Connection from {} failed: {}", peer, e);
                }
            });
        }
    }
}

/// Unwraps an accepted connection, logging and skipping failed accepts.
fn accepted_or_warn<T>(accepted: io::Result<T>) -> Option<T> {
    match accepted {
        Ok(accepted) => Some(accepted),
        Err(e) => {
            warn!("Failed to accept connection: {}", e);
            None
        }
    }
}

fn handle<B>(req: &Request<B>, service: &MockVehicleService) -> Response<Full<Bytes>> {
    if req.method() != Method::GET || req.uri().path() != VEHICLES_PATH {
        debug!("{} {} -> 404", req.method(), req.uri());
        return json(StatusCode::NOT_FOUND, &ErrorBody { error: "not found" });
    }

    let params = QueryParams::parse(req.uri().query().unwrap_or_default());
    let query = VehicleQuery::from_params(&params);
    let rows = service.page(&query);
    debug!("GET {} -> {} rows", req.uri(), rows.len());

    json(
        StatusCode::OK,
        &PageBody {
            data: &rows,
            page: query.page,
        },
    )
}

fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let (status, bytes) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, bytes),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{{\"error\":\"{}\"}}", e).into_bytes(),
        ),
    };

    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
