use crate::control::Environment;
use crate::domain::ParameterSpec;

/// Environment flags supplied by the host when a widget is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub environment: Environment,
    pub enabled: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            environment: Environment::Standard,
            enabled: true,
        }
    }
}

impl WidgetOptions {
    pub fn in_side_panel(mut self, side_panel: bool) -> Self {
        self.environment = if side_panel {
            Environment::SidePanel
        } else {
            Environment::Standard
        };
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Display flags derived once from the spec and the host options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub multiple: bool,
    pub required: bool,
    pub enabled: bool,
    pub environment: Environment,
}

impl DisplayOptions {
    pub fn derive(spec: &ParameterSpec, options: &WidgetOptions) -> Self {
        Self {
            multiple: spec.multiple,
            required: spec.required,
            enabled: options.enabled,
            environment: options.environment,
        }
    }
}
