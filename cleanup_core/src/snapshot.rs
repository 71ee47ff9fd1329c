use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CleanupError, HostError};
use crate::host::NameHost;
use crate::record::Record;

/// What to do when the name of a selected item cannot be read.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapturePolicy {
    /// The whole capture fails on the first unreadable item.
    Abort,
    /// Unreadable items are left out of the snapshot and reported in `excluded`.
    Skip,
}

impl Default for CapturePolicy {
    fn default() -> CapturePolicy {
        CapturePolicy::Abort
    }
}

#[derive(Debug)]
pub struct CaptureFailure {
    pub index: usize,
    pub error: HostError,
}

impl fmt::Display for CaptureFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "item {}: {}", self.index, self.error)
    }
}

/// Distinct original names that sanitize to the same candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub candidate: String,
    pub originals: Vec<String>,
}

/// Ordered capture of the selection, taken once per invocation.
#[derive(Debug)]
pub struct Snapshot<H> {
    records: Vec<Record<H>>,
    excluded: Vec<CaptureFailure>,
}

pub fn capture<H: NameHost>(
    host: &H,
    selection: &[H::Handle],
    policy: CapturePolicy,
) -> Result<Snapshot<H::Handle>, CleanupError> {
    let mut records = Vec::with_capacity(selection.len());
    let mut excluded = Vec::new();

    for (index, handle) in selection.iter().enumerate() {
        match host.name(handle) {
            Ok(name) => records.push(Record::new(handle.clone(), &name)),
            Err(error) => match policy {
                CapturePolicy::Abort => return Err(CleanupError::Capture { index, source: error }),
                CapturePolicy::Skip => {
                    warn!("excluding selected item {}: {}", index, error);
                    excluded.push(CaptureFailure { index, error });
                }
            },
        }
    }

    debug!("captured {} of {} selected items", records.len(), selection.len());

    Ok(Snapshot { records, excluded })
}

impl<H> Snapshot<H> {
    pub fn records(&self) -> &[Record<H>] {
        &self.records
    }

    pub fn excluded(&self) -> &[CaptureFailure] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn originals(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::original)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::candidate)
    }

    /// Number of records that would be written. Empty candidates only count
    /// when `allow_empty` is set.
    pub fn pending(&self, allow_empty: bool) -> usize {
        self.records
            .iter()
            .filter(|record| !record.is_unchanged())
            .filter(|record| allow_empty || !record.candidate().is_empty())
            .count()
    }

    pub fn collisions(&self) -> Vec<Collision> {
        let mut collisions: Vec<Collision> = Vec::new();

        for record in &self.records {
            match collisions.iter_mut().find(|c| c.candidate == record.candidate()) {
                Some(collision) => {
                    if !collision.originals.iter().any(|o| o == record.original()) {
                        collision.originals.push(record.original().to_owned());
                    }
                }
                None => collisions.push(Collision {
                    candidate: record.candidate().to_owned(),
                    originals: vec![record.original().to_owned()],
                }),
            }
        }

        collisions.retain(|collision| collision.originals.len() > 1);
        collisions
    }
}

impl<H> IntoIterator for Snapshot<H> {
    type Item = Record<H>;
    type IntoIter = std::vec::IntoIter<Record<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
