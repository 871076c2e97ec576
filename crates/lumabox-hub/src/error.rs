// Hub error types
//
// Two failure classes, per the setup contract: a retryable "not ready"
// from device identification, and opaque host failures passed through.

use thiserror::Error;

use crate::host::HostError;

/// Error returned by entry setup/unload and the registered actions.
#[derive(Debug, Error)]
pub enum HubError {
    /// Identification failed; the device may be booting or unreachable.
    /// The host should retry setup later.
    #[error("device at {host}:{port} is not ready: {source}")]
    NotReady {
        host: String,
        port: u16,
        #[source]
        source: lumabox_api::Error,
    },

    /// A host-side operation (platform forwarding, dashboard storage)
    /// failed; propagated unchanged.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl HubError {
    /// Whether the host should retry setup later instead of failing the
    /// entry permanently.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_display_names_host_port_and_cause() {
        let err = HubError::NotReady {
            host: "10.0.0.5".into(),
            port: 80,
            source: lumabox_api::Error::Timeout { timeout_secs: 10 },
        };

        let text = err.to_string();
        assert!(text.contains("10.0.0.5"));
        assert!(text.contains("80"));
        assert!(text.contains("timed out"));
        assert!(err.is_retryable());
    }

    #[test]
    fn host_errors_are_not_retryable() {
        let err = HubError::from(HostError::new("platform exploded"));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "platform exploded");
    }
}
