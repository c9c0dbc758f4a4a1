//! HTTP endpoints for generated site content
//!
//! - `GET /health` - Liveness check
//! - `/functions/generateTeamMembers` - Team profiles with photos
//! - `/functions/generateSuccessStories` - Farmer stories with photos
//! - `/functions/generateFaqs` - FAQ entries
//! - `POST /functions/processContactInquiry` - Triage a contact form
//!
//! The generate functions answer any method. A contact body that is not
//! JSON is a processing failure (500); valid JSON without a name, subject
//! or message is a client error (400).
//!
//! ## Example Usage
//!
//! ```bash
//! curl http://localhost:8888/functions/generateFaqs
//!
//! curl -X POST -H "Content-Type: application/json" \
//!      -d '{"name":"Daniel","email":"d@example.com","subject":"Investing","message":"Hi"}' \
//!      http://localhost:8888/functions/processContactInquiry
//! ```

use aquagrow_gateway::{ContactInquiry, ContentGateway, GatewayError};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::SiteError;

const INQUIRY_PATH: &str = "/functions/processContactInquiry";

/// Content functions server state
pub struct FunctionsServer {
    gateway: Arc<ContentGateway>,
    bind_addr: SocketAddr,
}

impl FunctionsServer {
    pub fn new(gateway: Arc<ContentGateway>, bind_addr: SocketAddr) -> Self {
        Self { gateway, bind_addr }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Run the HTTP server
    pub async fn run(self: Arc<Self>) -> Result<(), SiteError> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        info!(addr = %self.bind_addr, backend = %self.gateway.backend_id(), "Functions server listening");

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let server = self.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let server = server.clone();
                    async move { server.handle_request(req).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    warn!(addr = %remote_addr, error = %err, "Connection error");
                }
            });
        }
    }

    async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let body = req.into_body().collect().await?.to_bytes();

        Ok(self.route(&method, &path, body).await)
    }

    /// Dispatch one request. Every outcome, including failures, is a response.
    pub async fn route(&self, method: &Method, path: &str, body: Bytes) -> Response<Full<Bytes>> {
        debug!(method = %method, path = %path, "Incoming request");

        match (method, path) {
            (&Method::GET, "/health") => json_response(StatusCode::OK, &json!({"status": "ok"})),

            (_, "/functions/generateTeamMembers") => {
                generated("team members", self.gateway.team_members().await)
            }
            (_, "/functions/generateSuccessStories") => {
                generated("success stories", self.gateway.success_stories().await)
            }
            (_, "/functions/generateFaqs") => generated("FAQs", self.gateway.faqs().await),

            (&Method::POST, INQUIRY_PATH) => self.handle_inquiry(body).await,
            (_, INQUIRY_PATH) => text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),

            _ => text_response(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    /// POST /functions/processContactInquiry
    async fn handle_inquiry(&self, body: Bytes) -> Response<Full<Bytes>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return text_response(StatusCode::BAD_REQUEST, "Missing request body");
        }

        let inquiry = match parse_inquiry(&body) {
            Ok(Some(inquiry)) => inquiry,
            Ok(None) => {
                return text_response(StatusCode::BAD_REQUEST, "Missing required form fields.")
            }
            Err(e) => return inquiry_failure(&e),
        };

        match self.gateway.triage_inquiry(&inquiry).await {
            Ok(triage) => {
                info!(category = %triage.category, priority = ?triage.priority, "Inquiry triaged");
                json_response(StatusCode::OK, &triage)
            }
            Err(GatewayError::InvalidInquiry(_)) => {
                text_response(StatusCode::BAD_REQUEST, "Missing required form fields.")
            }
            Err(e) => inquiry_failure(&e),
        }
    }
}

/// Parse a contact body. `Ok(None)` when the JSON lacks a non-blank
/// name, subject or message.
fn parse_inquiry(body: &[u8]) -> Result<Option<ContactInquiry>, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    Ok(serde_json::from_value::<ContactInquiry>(value)
        .ok()
        .filter(|inquiry| inquiry.missing_fields().is_empty()))
}

fn inquiry_failure(e: &dyn std::fmt::Display) -> Response<Full<Bytes>> {
    error!(error = %e, "Inquiry processing failed");
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &json!({"error": format!("Failed to process inquiry: {}", e)}),
    )
}

fn generated<T: Serialize>(what: &str, result: Result<T, GatewayError>) -> Response<Full<Bytes>> {
    match result {
        Ok(content) => json_response(StatusCode::OK, &content),
        Err(e) => {
            error!(content = what, error = %e, "Generation failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": format!("Failed to generate {}: {}", what, e)}),
            )
        }
    }
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(bytes) => respond(status, "application/json", Bytes::from(bytes)),
        Err(e) => text_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Error: {}", e),
        ),
    }
}

fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    respond(status, "text/plain; charset=utf-8", Bytes::from(body.to_string()))
}

fn respond(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(content_type),
    );
    response
}
