use thiserror::Error;

/// Top-level error type for the `lumabox-api` crate.
///
/// Covers every failure mode across the device API surface:
/// session construction, transport, identification, and feature control.
/// `lumabox-hub` maps these into host-facing outcomes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device rejected the request (missing or wrong credentials).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Identification ──────────────────────────────────────────────
    /// The device reported a type this client does not know about.
    #[error("Unsupported device type: {device_type}")]
    UnsupportedDevice { device_type: String },

    /// Device firmware speaks an API level older than this client supports.
    #[error("Unsupported API level {api_level} (minimum supported: {min_supported})")]
    UnsupportedVersion { api_level: u32, min_supported: u32 },

    // ── Device API ──────────────────────────────────────────────────
    /// Non-success response or malformed reply from the device.
    #[error("Device error: {message}")]
    Device { message: String },

    /// A feature command was given a value the device cannot accept.
    #[error("Bad command value: {message}")]
    BadValue { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the failure is a firmware/type mismatch that a
    /// retry cannot fix.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedDevice { .. } | Self::UnsupportedVersion { .. }
        )
    }
}
