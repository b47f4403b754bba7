//! Panel switching: one active tool panel at a time.
//!
//! The workbench registers a panel per tool identifier. Activating an
//! identifier deactivates every panel and activates the matching one;
//! unknown identifiers are silent no-ops. The merge tool re-runs its
//! idempotent initialization whenever its panel is activated.

use crate::session::{MergeSession, SessionView};

/// Identifier of the merge tool panel.
pub const MERGE_TOOL: &str = "merge";

#[derive(Debug, Clone)]
struct Panel {
    id: String,
    active: bool,
}

/// Registry of tool panels with at most one active.
#[derive(Debug, Clone, Default)]
pub struct PanelSwitcher {
    panels: Vec<Panel>,
}

impl PanelSwitcher {
    /// Create an empty switcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel under a tool identifier. The panel starts inactive.
    pub fn register(&mut self, id: impl Into<String>) {
        self.panels.push(Panel {
            id: id.into(),
            active: false,
        });
    }

    /// Activate the panel matching `id`, deactivating all others.
    ///
    /// Returns whether a panel matched. An unknown identifier changes
    /// nothing.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.panels.iter().any(|p| p.id == id) {
            return false;
        }
        for panel in &mut self.panels {
            panel.active = panel.id == id;
        }
        true
    }

    /// Identifier of the currently active panel, if any.
    pub fn active(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|p| p.active)
            .map(|p| p.id.as_str())
    }
}

/// The tool workbench: panel switcher plus the merge session it hosts.
///
/// At startup the merge panel is registered, active, and initialized.
#[derive(Debug, Default)]
pub struct Workbench {
    panels: PanelSwitcher,
    session: MergeSession,
}

impl Workbench {
    /// Create a workbench with the merge tool active by default.
    pub fn new() -> Self {
        let mut panels = PanelSwitcher::new();
        panels.register(MERGE_TOOL);
        panels.activate(MERGE_TOOL);

        let session = MergeSession::new();
        session.init();

        Self { panels, session }
    }

    /// Switch to the tool with the given identifier.
    ///
    /// Brings the matching panel into view and, for the merge tool, re-runs
    /// the session's initialization. Returns whether a panel matched; an
    /// unknown identifier is a silent no-op.
    pub fn select_tool(&mut self, id: &str) -> bool {
        if !self.panels.activate(id) {
            return false;
        }
        if id == MERGE_TOOL {
            self.session.init();
        }
        true
    }

    /// Identifier of the active tool panel.
    pub fn active_tool(&self) -> Option<&str> {
        self.panels.active()
    }

    /// The merge session hosted by this workbench.
    pub fn session(&self) -> &MergeSession {
        &self.session
    }

    /// Mutable access to the merge session.
    pub fn session_mut(&mut self) -> &mut MergeSession {
        &mut self.session
    }

    /// Render the merge tool's current view.
    pub fn view(&self) -> SessionView {
        self.session.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_panel_active_by_default() {
        let workbench = Workbench::new();
        assert_eq!(workbench.active_tool(), Some(MERGE_TOOL));
    }

    #[test]
    fn test_activate_switches_exclusively() {
        let mut switcher = PanelSwitcher::new();
        switcher.register("merge");
        switcher.register("split");

        assert!(switcher.activate("merge"));
        assert_eq!(switcher.active(), Some("merge"));

        assert!(switcher.activate("split"));
        assert_eq!(switcher.active(), Some("split"));
    }

    #[test]
    fn test_unknown_identifier_is_a_no_op() {
        let mut switcher = PanelSwitcher::new();
        switcher.register("merge");
        switcher.activate("merge");

        assert!(!switcher.activate("rotate"));
        assert_eq!(switcher.active(), Some("merge"));
    }

    #[test]
    fn test_select_unknown_tool_keeps_active_panel() {
        let mut workbench = Workbench::new();
        assert!(!workbench.select_tool("watermark"));
        assert_eq!(workbench.active_tool(), Some(MERGE_TOOL));
    }

    #[test]
    fn test_reselecting_merge_keeps_session_state() {
        use crate::intake::{PDF_CONTENT_TYPE, SelectedFile};

        let mut workbench = Workbench::new();
        workbench
            .session_mut()
            .intake([
                SelectedFile::from_bytes("a.pdf", PDF_CONTENT_TYPE, vec![1]),
                SelectedFile::from_bytes("b.pdf", PDF_CONTENT_TYPE, vec![2]),
            ])
            .unwrap();

        let before = workbench.view();
        assert!(workbench.select_tool(MERGE_TOOL));
        assert_eq!(workbench.view(), before);
        assert_eq!(workbench.session().files().len(), 2);
    }
}
