use poem::http::{StatusCode, header};
use poem::{
    Endpoint, EndpointExt, IntoResponse, Request, Route, Server as PoemServer,
    listener::TcpListener, middleware::Tracing,
};
use poem_openapi::OpenApiService;

use crate::api::error::ErrorResponse;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

/// Room left for multipart boundaries and part headers around the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let body_limit = config
            .prescription
            .max_upload_bytes
            .saturating_add(MULTIPART_OVERHEAD_BYTES);

        let api_service = OpenApiService::new(
            (container.health_api, container.prescription_api),
            "Prescription Cart API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .around(move |ep, req| async move {
                if exceeds_declared_length(&req, body_limit) {
                    tracing::warn!("Rejected {} before reading an oversized body", req.uri());
                    return Ok((
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::validation("prescription.image_too_large"),
                    )
                        .into_response());
                }
                ep.call(req).await.map(IntoResponse::into_response)
            })
            .with(config.cors)
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}

/// Only a declared `Content-Length` is checked; requests without one
/// (GET, preflight, chunked) fall through to the route's own size check.
fn exceeds_declared_length(req: &Request, limit: usize) -> bool {
    req.header(header::CONTENT_LENGTH)
        .and_then(|length| length.trim().parse::<usize>().ok())
        .is_some_and(|length| length > limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_length(length: &str) -> Request {
        Request::builder()
            .header(header::CONTENT_LENGTH, length)
            .finish()
    }

    #[test]
    fn should_reject_when_declared_length_over_limit() {
        assert!(exceeds_declared_length(&request_with_length("2049"), 2048));
    }

    #[test]
    fn should_accept_when_declared_length_within_limit() {
        assert!(!exceeds_declared_length(&request_with_length("2048"), 2048));
    }

    #[test]
    fn should_accept_when_length_not_declared() {
        assert!(!exceeds_declared_length(&Request::builder().finish(), 0));
        assert!(!exceeds_declared_length(&request_with_length("lots"), 0));
    }
}
