use std::fmt;

use crate::sanitize::sanitize;

#[derive(Clone)]
pub struct Record<H> {
    handle: H,
    original: String,
    candidate: String,
}

impl<H> fmt::Debug for Record<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.original, self.candidate)
    }
}

impl<H> fmt::Display for Record<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.original, self.candidate)
    }
}

impl<H> PartialEq for Record<H> {
    fn eq(&self, other: &Record<H>) -> bool {
        (self.original == other.original) && (self.candidate == other.candidate)
    }
}

impl<H> Record<H> {
    /// The candidate is computed here, once, and never again.
    pub fn new(handle: H, original: &str) -> Self {
        Record {
            handle,
            original: original.to_owned(),
            candidate: sanitize(original),
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn is_unchanged(&self) -> bool {
        self.candidate == self.original
    }
}

#[test]
fn record_new() {
    let record = Record::new(7usize, "Hello World!!");
    assert_eq!(*record.handle(), 7);
    assert_eq!(record.original(), "Hello World!!");
    assert_eq!(record.candidate(), "Hello_World");
    assert!(!record.is_unchanged());
    assert_eq!(record.to_string(), "Hello World!! -> Hello_World");
}

#[test]
fn record_unchanged() {
    let record = Record::new((), "Already_Clean");
    assert!(record.is_unchanged());
    assert_eq!(record, Record::new((), "Already_Clean"));
}
