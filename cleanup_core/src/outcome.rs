use std::fmt;

use crate::error::HostError;

/// Result of applying one record.
#[derive(Debug)]
pub enum Outcome {
    Renamed { original: String, candidate: String },
    Skipped { name: String },
    Failed { original: String, error: HostError },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Renamed { ref original, ref candidate } => write!(f, "Renamed {} to {}", original, candidate),
            Outcome::Skipped { ref name } => write!(f, "Skipping {}. No changes necessary.", name),
            Outcome::Failed { ref original, ref error } => write!(f, "Failed to rename {}: {}", original, error),
        }
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Outcome) -> bool {
        match (self, other) {
            (
                Outcome::Renamed { original: a, candidate: b },
                Outcome::Renamed { original: c, candidate: d },
            ) => a == c && b == d,
            (Outcome::Skipped { name: a }, Outcome::Skipped { name: b }) => a == b,
            (Outcome::Failed { original: a, error: e1 }, Outcome::Failed { original: b, error: e2 }) => {
                a == b && e1.to_string() == e2.to_string()
            }
            _ => false,
        }
    }
}

impl Outcome {
    pub fn renamed(original: &str, candidate: &str) -> Self {
        Outcome::Renamed {
            original: original.to_owned(),
            candidate: candidate.to_owned(),
        }
    }

    pub fn skipped(name: &str) -> Self {
        Outcome::Skipped { name: name.to_owned() }
    }

    pub fn failed(original: &str, error: HostError) -> Self {
        Outcome::Failed {
            original: original.to_owned(),
            error,
        }
    }

    pub fn original(&self) -> &str {
        match *self {
            Outcome::Renamed { ref original, .. } => original,
            Outcome::Skipped { ref name } => name,
            Outcome::Failed { ref original, .. } => original,
        }
    }

    pub fn is_failure(&self) -> bool {
        match *self {
            Outcome::Failed { .. } => true,
            _ => false,
        }
    }
}

/// Per-kind counts over an outcome log.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Summary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(outcomes: &[Outcome]) -> Self {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match *outcome {
                Outcome::Renamed { .. } => summary.renamed += 1,
                Outcome::Skipped { .. } => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} renamed, {} skipped, {} failed", self.renamed, self.skipped, self.failed)
    }
}

#[test]
fn outcome_messages() {
    assert_eq!(Outcome::renamed("A!", "A").to_string(), "Renamed A! to A");
    assert_eq!(Outcome::skipped("B").to_string(), "Skipping B. No changes necessary.");
    assert_eq!(
        Outcome::failed("C?", HostError::EmptyName).to_string(),
        "Failed to rename C?: sanitized name is empty"
    );
}

#[test]
fn outcome_summary() {
    let outcomes = vec![
        Outcome::renamed("A!", "A"),
        Outcome::skipped("B"),
        Outcome::renamed("A!", "A"),
        Outcome::failed("***", HostError::EmptyName),
    ];
    let summary = Summary::of(&outcomes);
    assert_eq!(summary, Summary { renamed: 2, skipped: 1, failed: 1 });
    assert_eq!(summary.to_string(), "2 renamed, 1 skipped, 1 failed");
    assert!(outcomes[3].is_failure());
    assert_eq!(outcomes[3].original(), "***");
}
