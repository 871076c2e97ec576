// lumabox-api: Async Rust client for Lumabox smart-home devices

pub mod capability;
pub mod client;
pub mod device;
pub mod error;
pub mod family;
pub mod features;
pub mod session;

pub use capability::CapabilitySet;
pub use device::{Device, DeviceId, DeviceInfo};
pub use error::Error;
pub use family::DeviceFamily;
pub use session::{ApiHost, Session};
