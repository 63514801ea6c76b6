use anyhow::Context;
use std::env;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Settings for the prescription endpoints.
#[derive(Debug, Clone)]
pub struct PrescriptionApiConfig {
    pub max_upload_bytes: usize,
    pub expose_error_details: bool,
}

impl Default for PrescriptionApiConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            expose_error_details: false,
        }
    }
}

impl PrescriptionApiConfig {
    /// Environment variables:
    /// - MAX_UPLOAD_BYTES: Largest accepted image (default: 10 MiB)
    /// - EXPOSE_ERROR_DETAILS: Include upstream error detail in 500 bodies (default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{raw}'"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };
        let expose_error_details = env::var("EXPOSE_ERROR_DETAILS")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Ok(Self {
            max_upload_bytes,
            expose_error_details,
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
