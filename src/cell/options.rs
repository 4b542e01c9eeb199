use crate::control::Environment;
use crate::widget::WidgetOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOptions {
    pub environment: Environment,
    /// Parameter ids rendered as administratively disabled.
    pub disabled: Vec<String>,
    /// Seed each widget's first render with its first default value.
    pub seed_defaults: bool,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self {
            environment: Environment::Standard,
            disabled: Vec::new(),
            seed_defaults: true,
        }
    }
}

impl CellOptions {
    pub fn in_side_panel(mut self, side_panel: bool) -> Self {
        self.environment = if side_panel {
            Environment::SidePanel
        } else {
            Environment::Standard
        };
        self
    }

    pub fn with_disabled(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.disabled.contains(&id) {
            self.disabled.push(id);
        }
        self
    }

    pub fn with_seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    pub(crate) fn widget_options(&self, id: &str) -> WidgetOptions {
        WidgetOptions::default()
            .in_side_panel(self.environment == Environment::SidePanel)
            .with_enabled(!self.disabled.iter().any(|disabled| disabled == id))
    }
}
