pub mod collector;
pub mod config;
pub mod formatter;
pub mod snmp;
pub mod vendor;

pub use collector::{DeviceTarget, UsageCollector, UsageResult};
pub use config::{AppConfig, Settings};
pub use vendor::Vendor;
