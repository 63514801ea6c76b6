use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error category
    pub name: String,
    /// User-safe error code
    pub error: String,
    /// Upstream detail, only present when detail exposure is enabled
    #[oai(skip_serializing_if_is_none)]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn validation(error: &str) -> Json<Self> {
        Json(Self {
            name: "ValidationError".to_string(),
            error: error.to_string(),
            details: None,
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self, expose_details: bool) -> (StatusCode, Json<ErrorResponse>);
}
