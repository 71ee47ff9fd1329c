use crate::config::{Config, DEFAULT_MESSAGE_PREFIX};
use crate::error::HostError;
use crate::host::NameHost;
use crate::outcome::Outcome;
use crate::snapshot::Snapshot;

/// Commits candidate names to the host.
///
/// The batch is not transactional: a rejected write becomes a `Failed` outcome
/// and the remaining records are still processed. The host display is refreshed
/// once at the end, whatever happened to the individual records.
pub struct Applier {
    allow_empty: bool,
    prefix: String,
}

impl Default for Applier {
    fn default() -> Applier {
        Applier {
            allow_empty: false,
            prefix: DEFAULT_MESSAGE_PREFIX.to_string(),
        }
    }
}

impl Applier {
    pub fn new(config: &Config) -> Self {
        Applier {
            allow_empty: config.apply.allow_empty,
            prefix: config.log.message_prefix.clone(),
        }
    }

    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    pub fn apply<H: NameHost>(&self, host: &mut H, snapshot: Snapshot<H::Handle>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(snapshot.len());

        for record in snapshot {
            let outcome = if record.is_unchanged() {
                Outcome::skipped(record.original())
            } else if record.candidate().is_empty() && !self.allow_empty {
                Outcome::failed(record.original(), HostError::EmptyName)
            } else {
                match host.set_name(record.handle(), record.candidate()) {
                    Ok(()) => Outcome::renamed(record.original(), record.candidate()),
                    Err(e) => Outcome::failed(record.original(), e),
                }
            };

            if outcome.is_failure() {
                warn!("{} {}", self.prefix, outcome);
            } else {
                info!("{} {}", self.prefix, outcome);
            }

            outcomes.push(outcome);
        }

        if let Err(e) = host.refresh_display() {
            warn!("{} {}", self.prefix, e);
        }

        info!("{} Done!", self.prefix);

        outcomes
    }
}
