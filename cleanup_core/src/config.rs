use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CleanupError;
use crate::snapshot::CapturePolicy;

pub const DEFAULT_MESSAGE_PREFIX: &str = "[cleanup-name]";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub capture: Capture,
    #[serde(default)]
    pub apply: Apply,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Capture {
    #[serde(default)]
    pub policy: CapturePolicy,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Apply {
    /// Write empty names instead of reporting them as failures.
    #[serde(default)]
    pub allow_empty: bool,
    /// Refuse to apply a batch where distinct names sanitize to the same result.
    #[serde(default)]
    pub refuse_collisions: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Log {
    #[serde(default = "default_message_prefix")]
    pub message_prefix: String,
}

impl Default for Log {
    fn default() -> Log {
        Log {
            message_prefix: default_message_prefix(),
        }
    }
}

fn default_message_prefix() -> String {
    DEFAULT_MESSAGE_PREFIX.to_string()
}

impl Config {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CleanupError> {
        let contents = fs::read_to_string(path)?;
        let config = Config::new_from_string(&contents)?;

        debug!("capture policy: {:?}", config.capture.policy);
        debug!(
            "allow empty: {}, refuse collisions: {}",
            config.apply.allow_empty, config.apply.refuse_collisions
        );

        Ok(config)
    }

    pub fn new_from_string(contents: &str) -> Result<Self, CleanupError> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }
}

#[test]
fn config_read() {
    let config = Config::new_from_string(
        r#"
[capture]
policy = "skip"

[apply]
allow_empty = true
refuse_collisions = true

[log]
message_prefix = "[PYTHON HOOK]"
"#,
    )
    .unwrap();

    assert_eq!(config.capture.policy, CapturePolicy::Skip);
    assert!(config.apply.allow_empty);
    assert!(config.apply.refuse_collisions);
    assert_eq!(config.log.message_prefix, "[PYTHON HOOK]");
}

#[test]
fn config_defaults() {
    let config = Config::new_from_string("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.capture.policy, CapturePolicy::Abort);
    assert!(!config.apply.allow_empty);
    assert!(!config.apply.refuse_collisions);
    assert_eq!(config.log.message_prefix, DEFAULT_MESSAGE_PREFIX);
}

#[test]
fn config_rejects_unknown_policy() {
    let result = Config::new_from_string("[capture]\npolicy = \"retry\"\n");
    assert!(result.is_err());
}

#[test]
fn config_write() {
    let config = Config::default();
    let toml = toml::to_string(&config).unwrap();
    assert!(toml.contains("policy = \"abort\""));
    assert_eq!(Config::new_from_string(&toml).unwrap(), config);
}
