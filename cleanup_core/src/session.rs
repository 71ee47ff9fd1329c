use crate::apply::Applier;
use crate::config::Config;
use crate::error::CleanupError;
use crate::host::{is_invocable, NameHost};
use crate::outcome::Outcome;
use crate::preview::{PreviewController, ViewState};
use crate::snapshot::{capture, Snapshot};
use crate::version_title;

/// Operator input during the confirmation step.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Event {
    Confirm,
    Cancel,
    ToggleView(ViewState),
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
    Applied(Vec<Outcome>),
    Cancelled,
}

/// One invocation of the tool: capture, preview, then confirm or cancel.
///
/// The snapshot is taken when the session opens. `confirm` and `cancel` consume
/// the session, so a snapshot is applied at most once.
pub struct Session<'h, H: NameHost> {
    host: &'h mut H,
    snapshot: Snapshot<H::Handle>,
    view: ViewState,
    applier: Applier,
    refuse_collisions: bool,
}

impl<'h, H: NameHost> Session<'h, H> {
    pub fn open(host: &'h mut H, selection: &[H::Handle], config: &Config) -> Result<Self, CleanupError> {
        if !is_invocable(&*host, selection) {
            return Err(CleanupError::NotInvocable);
        }

        let prefix = &config.log.message_prefix;
        info!("{} {}", prefix, version_title());

        let snapshot = capture(&*host, selection, config.capture.policy)?;

        for collision in snapshot.collisions() {
            warn!(
                "{} {} would all be renamed to {:?}",
                prefix,
                collision.originals.join(", "),
                collision.candidate
            );
        }

        Ok(Session {
            host,
            snapshot,
            view: ViewState::default(),
            applier: Applier::new(config),
            refuse_collisions: config.apply.refuse_collisions,
        })
    }

    pub fn snapshot(&self) -> &Snapshot<H::Handle> {
        &self.snapshot
    }

    /// Number of names `confirm` would write.
    pub fn pending(&self) -> usize {
        self.snapshot.pending(self.applier.allows_empty())
    }

    pub fn preview(&self) -> PreviewController<'_, H::Handle> {
        PreviewController::with_state(&self.snapshot, self.view)
    }

    pub fn toggle_view(&mut self, next: ViewState) {
        self.view = next;
    }

    pub fn confirm(self) -> Result<Invocation, CleanupError> {
        if self.refuse_collisions {
            let collisions = self.snapshot.collisions();
            if !collisions.is_empty() {
                let candidates = collisions.into_iter().map(|c| c.candidate).collect();
                return Err(CleanupError::Collision(candidates));
            }
        }

        let outcomes = self.applier.apply(self.host, self.snapshot);
        Ok(Invocation::Applied(outcomes))
    }

    pub fn cancel(self) -> Invocation {
        debug!("cancelled, discarding {} captured names", self.snapshot.len());
        Invocation::Cancelled
    }

    /// Feeds operator events until one of them ends the session. Running out
    /// of events counts as a cancel.
    pub fn dispatch<I: IntoIterator<Item = Event>>(mut self, events: I) -> Result<Invocation, CleanupError> {
        for event in events {
            match event {
                Event::ToggleView(next) => self.toggle_view(next),
                Event::Confirm => return self.confirm(),
                Event::Cancel => return Ok(self.cancel()),
            }
        }
        Ok(self.cancel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::snapshot::CapturePolicy;

    #[test]
    fn confirm_applies_snapshot() {
        let mut host = MemoryHost::new(&["A!", "B", "A!"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &Config::default()).unwrap();

        match session.confirm().unwrap() {
            Invocation::Applied(outcomes) => assert_eq!(
                outcomes,
                vec![
                    Outcome::renamed("A!", "A"),
                    Outcome::skipped("B"),
                    Outcome::renamed("A!", "A"),
                ]
            ),
            Invocation::Cancelled => panic!("expected applied"),
        }
        assert_eq!(host.names(), &["A".to_string(), "B".to_string(), "A".to_string()]);
    }

    #[test]
    fn cancel_never_writes() {
        let mut host = MemoryHost::new(&["a a", "b!"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &Config::default()).unwrap();

        let result = session
            .dispatch(vec![Event::ToggleView(ViewState::Original), Event::Cancel, Event::Confirm])
            .unwrap();

        assert_eq!(result, Invocation::Cancelled);
        assert!(host.writes().is_empty());
        assert_eq!(host.refreshes(), 0);
    }

    #[test]
    fn closing_without_decision_cancels() {
        let mut host = MemoryHost::new(&["a a"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &Config::default()).unwrap();

        assert_eq!(session.dispatch(Vec::new()).unwrap(), Invocation::Cancelled);
        assert!(host.writes().is_empty());
    }

    #[test]
    fn toggles_change_preview_only() {
        let mut host = MemoryHost::new(&["x y", "z"]);
        let selection = host.selection();
        let mut session = Session::open(&mut host, &selection, &Config::default()).unwrap();

        assert_eq!(session.preview().current_view().collect::<Vec<_>>(), vec!["x_y", "z"]);
        session.toggle_view(ViewState::Original);
        assert_eq!(session.preview().current_view().collect::<Vec<_>>(), vec!["x y", "z"]);
        session.toggle_view(ViewState::Clean);

        let result = session.dispatch(vec![Event::Confirm]).unwrap();
        assert_eq!(result, Invocation::Applied(vec![Outcome::renamed("x y", "x_y"), Outcome::skipped("z")]));
    }

    #[test]
    fn pending_matches_writes() {
        let mut host = MemoryHost::new(&["***", "a a", "b"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &Config::default()).unwrap();

        assert_eq!(session.pending(), 1);
        session.confirm().unwrap();
        assert_eq!(host.writes().len(), 1);

        let mut config = Config::default();
        config.apply.allow_empty = true;
        let mut host = MemoryHost::new(&["***", "a a", "b"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &config).unwrap();
        assert_eq!(session.pending(), 2);
    }

    #[test]
    fn refuse_collisions_blocks_writes() {
        let mut config = Config::default();
        config.apply.refuse_collisions = true;
        let mut host = MemoryHost::new(&["A!", "A?"]);
        let selection = host.selection();
        let session = Session::open(&mut host, &selection, &config).unwrap();

        match session.confirm() {
            Err(CleanupError::Collision(names)) => assert_eq!(names, vec!["A".to_string()]),
            other => panic!("expected collision error, got {:?}", other),
        }
        assert!(host.writes().is_empty());
    }

    #[test]
    fn open_requires_eligible_item() {
        let mut host = MemoryHost::new(&["a"]);
        host.set_ineligible(0);
        let selection = host.selection();

        match Session::open(&mut host, &selection, &Config::default()) {
            Err(CleanupError::NotInvocable) => {}
            _ => panic!("expected not invocable"),
        }
    }

    #[test]
    fn open_uses_capture_policy() {
        let mut config = Config::default();
        config.capture.policy = CapturePolicy::Skip;
        let mut host = MemoryHost::new(&["a a", "b b"]);
        host.fail_read(0);
        let selection = host.selection();

        let session = Session::open(&mut host, &selection, &config).unwrap();
        assert_eq!(session.snapshot().len(), 1);
        assert_eq!(session.snapshot().excluded().len(), 1);

        let mut host = MemoryHost::new(&["a a", "b b"]);
        host.fail_read(0);
        let selection = host.selection();
        assert!(Session::open(&mut host, &selection, &Config::default()).is_err());
    }
}
