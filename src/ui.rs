/// What the selection controls should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionPanel {
    /// `None` hides the name label and both buttons.
    pub object_name: Option<String>,
    /// Title of the select/deselect button.
    pub toggle_label: Option<&'static str>,
    pub remove_visible: bool,
}

impl SelectionPanel {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn for_object(name: &str, selected: bool) -> Self {
        Self {
            object_name: Some(name.to_string()),
            toggle_label: Some(if selected { "deselect" } else { "select" }),
            remove_visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.object_name.is_some()
    }
}

/// One-way pushes into the on-screen controls.
pub trait UiSurface {
    fn show_selection(&mut self, panel: &SelectionPanel);
    fn set_status(&mut self, status: &str);
}

/// Keeps the latest pushed values and logs changes. Stands in for real
/// controls in headless runs.
#[derive(Debug, Default)]
pub struct LogUi {
    panel: SelectionPanel,
    status: String,
}

impl LogUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> &SelectionPanel {
        &self.panel
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl UiSurface for LogUi {
    fn show_selection(&mut self, panel: &SelectionPanel) {
        if self.panel == *panel {
            return;
        }

        match (&panel.object_name, panel.toggle_label) {
            (Some(name), Some(label)) => log::info!("[panel] {name} ({label})"),
            _ => log::info!("[panel] hidden"),
        }
        self.panel = panel.clone();
    }

    fn set_status(&mut self, status: &str) {
        if self.status != status {
            log::info!("[status] {status}");
            self.status = status.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_reflects_selection_state() {
        let panel = SelectionPanel::for_object("Teapot", true);
        assert!(panel.is_visible());
        assert_eq!(panel.toggle_label, Some("deselect"));
        assert_eq!(SelectionPanel::for_object("Teapot", false).toggle_label, Some("select"));
        assert!(!SelectionPanel::hidden().is_visible());
        assert!(!SelectionPanel::hidden().remove_visible);
    }

    #[test]
    fn log_ui_keeps_latest_values() {
        let mut ui = LogUi::new();
        ui.show_selection(&SelectionPanel::for_object("ChairSwan", true));
        ui.set_status("Tracking is normal.");

        assert_eq!(ui.panel().object_name.as_deref(), Some("ChairSwan"));
        assert_eq!(ui.status(), "Tracking is normal.");
    }
}
