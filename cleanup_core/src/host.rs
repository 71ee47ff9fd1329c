use std::collections::{HashMap, HashSet};

use crate::error::HostError;

/// Capability interface a host application exposes to the renamer.
///
/// Handles are opaque to the core. The host owns the named entities; the core
/// only borrows the host for the duration of one invocation.
pub trait NameHost {
    type Handle: Clone;

    fn name(&self, handle: &Self::Handle) -> Result<String, HostError>;
    fn set_name(&mut self, handle: &Self::Handle, name: &str) -> Result<(), HostError>;
    fn refresh_display(&mut self) -> Result<(), HostError>;

    /// Whether the tool applies to this item at all.
    fn is_eligible(&self, _handle: &Self::Handle) -> bool {
        true
    }
}

/// The tool is offered when at least one selected item is eligible.
pub fn is_invocable<H: NameHost>(host: &H, selection: &[H::Handle]) -> bool {
    selection.iter().any(|handle| host.is_eligible(handle))
}

/// Vec-backed host, handles are indices.
#[derive(Debug, Default)]
pub struct MemoryHost {
    names: Vec<String>,
    unreadable: HashSet<usize>,
    rejections: HashMap<usize, String>,
    ineligible: HashSet<usize>,
    refresh_failure: Option<String>,
    writes: Vec<(usize, String)>,
    refreshes: usize,
}

impl MemoryHost {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        MemoryHost {
            names: names.iter().map(|name| name.as_ref().to_owned()).collect(),
            ..MemoryHost::default()
        }
    }

    pub fn selection(&self) -> Vec<usize> {
        (0..self.names.len()).collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn fail_read(&mut self, index: usize) {
        self.unreadable.insert(index);
    }

    pub fn reject_write(&mut self, index: usize, reason: &str) {
        self.rejections.insert(index, reason.to_owned());
    }

    pub fn set_ineligible(&mut self, index: usize) {
        self.ineligible.insert(index);
    }

    pub fn fail_refresh(&mut self, reason: &str) {
        self.refresh_failure = Some(reason.to_owned());
    }

    /// Every successful `set_name` call, in call order.
    pub fn writes(&self) -> &[(usize, String)] {
        &self.writes
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl NameHost for MemoryHost {
    type Handle = usize;

    fn name(&self, handle: &usize) -> Result<String, HostError> {
        if self.unreadable.contains(handle) {
            return Err(HostError::Read(format!("item {} is unreadable", handle)));
        }
        self.names
            .get(*handle)
            .cloned()
            .ok_or_else(|| HostError::Read(format!("no item {}", handle)))
    }

    fn set_name(&mut self, handle: &usize, name: &str) -> Result<(), HostError> {
        if let Some(reason) = self.rejections.get(handle) {
            return Err(HostError::Rejected {
                name: name.to_owned(),
                reason: reason.clone(),
            });
        }
        match self.names.get_mut(*handle) {
            Some(slot) => {
                *slot = name.to_owned();
                self.writes.push((*handle, name.to_owned()));
                Ok(())
            }
            None => Err(HostError::Rejected {
                name: name.to_owned(),
                reason: format!("no item {}", handle),
            }),
        }
    }

    fn refresh_display(&mut self) -> Result<(), HostError> {
        self.refreshes += 1;
        match self.refresh_failure {
            Some(ref reason) => Err(HostError::Refresh(reason.clone())),
            None => Ok(()),
        }
    }

    fn is_eligible(&self, handle: &usize) -> bool {
        *handle < self.names.len() && !self.ineligible.contains(handle)
    }
}

#[test]
fn memory_host_read_write() {
    let mut host = MemoryHost::new(&["a b", "c"]);
    assert_eq!(host.name(&0).unwrap(), "a b");
    host.set_name(&0, "a_b").unwrap();
    assert_eq!(host.names(), &["a_b".to_string(), "c".to_string()]);
    assert_eq!(host.writes(), &[(0, "a_b".to_string())]);
    assert!(host.name(&5).is_err());
}

#[test]
fn memory_host_invocable() {
    let mut host = MemoryHost::new(&["a", "b"]);
    assert!(is_invocable(&host, &host.selection()));
    host.set_ineligible(0);
    host.set_ineligible(1);
    assert!(!is_invocable(&host, &host.selection()));
    assert!(!is_invocable(&host, &[]));
}
