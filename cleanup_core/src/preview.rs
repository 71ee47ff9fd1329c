use prettytable::{Cell, Row, Table};

use crate::snapshot::Snapshot;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ViewState {
    Clean,
    Original,
}

impl Default for ViewState {
    fn default() -> ViewState {
        ViewState::Clean
    }
}

/// Read-only views over a snapshot for the confirmation step.
pub struct PreviewController<'a, H> {
    snapshot: &'a Snapshot<H>,
    state: ViewState,
}

impl<'a, H: 'a> PreviewController<'a, H> {
    pub fn new(snapshot: &'a Snapshot<H>) -> Self {
        PreviewController::with_state(snapshot, ViewState::default())
    }

    pub fn with_state(snapshot: &'a Snapshot<H>, state: ViewState) -> Self {
        PreviewController { snapshot, state }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn toggle_view(&mut self, next: ViewState) {
        self.state = next;
    }

    /// Names for the current view state, in selection order.
    pub fn current_view(&self) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self.state {
            ViewState::Clean => Box::new(self.snapshot.candidates()),
            ViewState::Original => Box::new(self.snapshot.originals()),
        }
    }

    /// Two-column table of the current view, changed rows marked with `*`.
    pub fn render(&self) -> Table {
        let mut table = Table::new();

        let title = match self.state {
            ViewState::Clean => "new",
            ViewState::Original => "current",
        };
        table.set_titles(row!["", title]);

        for (record, name) in self.snapshot.records().iter().zip(self.current_view()) {
            let marker = if record.is_unchanged() { "" } else { "*" };
            let mut row = Row::empty();
            row.add_cell(Cell::new(marker));
            row.add_cell(Cell::new(name));
            table.add_row(row);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::snapshot::{capture, CapturePolicy};

    #[test]
    fn preview_defaults_to_clean() {
        let host = MemoryHost::new(&["A!", "B", "A!"]);
        let snapshot = capture(&host, &host.selection(), CapturePolicy::Abort).unwrap();
        let preview = PreviewController::new(&snapshot);

        assert_eq!(preview.state(), ViewState::Clean);
        assert_eq!(preview.current_view().collect::<Vec<_>>(), vec!["A", "B", "A"]);
    }

    #[test]
    fn preview_original_view_survives_toggles() {
        let host = MemoryHost::new(&["x y", "z"]);
        let snapshot = capture(&host, &host.selection(), CapturePolicy::Abort).unwrap();
        let mut preview = PreviewController::new(&snapshot);

        for _ in 0..3 {
            preview.toggle_view(ViewState::Clean);
            preview.toggle_view(ViewState::Clean);
            preview.toggle_view(ViewState::Original);
            assert_eq!(preview.current_view().collect::<Vec<_>>(), vec!["x y", "z"]);
        }

        preview.toggle_view(ViewState::Clean);
        assert_eq!(preview.current_view().collect::<Vec<_>>(), vec!["x_y", "z"]);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn preview_render_marks_changes() {
        let host = MemoryHost::new(&["x y", "z"]);
        let snapshot = capture(&host, &host.selection(), CapturePolicy::Abort).unwrap();
        let mut preview = PreviewController::new(&snapshot);

        let table = preview.render().to_string();
        assert!(table.contains("x_y"));
        assert!(table.contains('*'));
        assert!(!table.contains("x y"));

        preview.toggle_view(ViewState::Original);
        let table = preview.render().to_string();
        assert!(table.contains("x y"));
        assert!(table.contains("current"));
    }
}
