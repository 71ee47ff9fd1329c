
extern crate regex;
extern crate serde;
extern crate toml;

#[macro_use]
extern crate log;

#[macro_use]
extern crate prettytable;

#[macro_use]
extern crate lazy_static;

pub mod sanitize;
pub use crate::sanitize::{is_clean, sanitize};

pub mod record;
pub use crate::record::Record;

pub mod error;
pub use crate::error::{CleanupError, HostError};

pub mod host;
pub use crate::host::{MemoryHost, NameHost};

pub mod fs_host;
pub mod config;

pub mod snapshot;
pub use crate::snapshot::{capture, CapturePolicy, Snapshot};

pub mod outcome;
pub use crate::outcome::Outcome;

pub mod apply;
pub mod preview;
pub mod session;

pub const TITLE: &str = "Cleanup Name";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_title() -> String {
    format!("{} v{}", TITLE, VERSION)
}
