//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use lumabox_hub::HubError;

use crate::config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 3;
    pub const NOT_READY: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Device at {host}:{port} is not ready")]
    #[diagnostic(
        code(lumabox::not_ready),
        help(
            "The device did not answer identification. Check that it is powered,\n\
             reachable at {host}:{port}, and try again -- this condition is transient."
        )
    )]
    NotReady {
        host: String,
        port: u16,
        #[source]
        source: lumabox_api::Error,
    },

    #[error("Host operation failed: {0}")]
    #[diagnostic(code(lumabox::host))]
    Host(#[source] lumabox_hub::HostError),

    #[error("No devices configured")]
    #[diagnostic(
        code(lumabox::no_devices),
        help("Create a config with: lumabox config init\nExpected at: {path}")
    )]
    NoDevices { path: String },

    #[error(transparent)]
    #[diagnostic(code(lumabox::config))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(lumabox::api))]
    Api(#[from] lumabox_api::Error),
}

impl From<HubError> for CliError {
    fn from(err: HubError) -> Self {
        match err {
            HubError::NotReady { host, port, source } => Self::NotReady { host, port, source },
            HubError::Host(host_err) => Self::Host(host_err),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotReady { .. } => exit_code::NOT_READY,
            Self::Config(_) | Self::NoDevices { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}
