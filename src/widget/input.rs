use crossterm::event::KeyEvent;
use serde_json::Value;
use tracing::{debug, trace};

use crate::bus::{Bus, Inbound, Outbound, Topic};
use crate::control::{InputControl, PanelLayout, SharedSurface, SlotId};
use crate::domain::{ParameterSpec, SpecError};
use crate::validation::{FieldRules, ValidationResult};

use super::field::{ComponentKind, FormField};
use super::lifecycle::{LifecycleError, Phase};
use super::options::{DisplayOptions, WidgetOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// The control changed but the edit is not committed yet.
    Edited,
    /// The user finished a change; validate and report it.
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionChange {
    Unchanged,
    /// The suggestion list went away and the input was cleared with it.
    Cleared,
    Updated,
}

/// What differs between selection and free-text widgets.
pub trait InputKind: std::fmt::Debug {
    fn component(&self) -> ComponentKind;

    fn build_control(&self, model: Option<&Value>, display: &DisplayOptions) -> InputControl;

    fn handle_key(&self, control: &mut InputControl, key: &KeyEvent) -> KeyOutcome;

    fn suggestion_type(&self) -> Option<&str> {
        None
    }

    fn set_suggestions(&mut self, _suggestions: Vec<String>) -> SuggestionChange {
        SuggestionChange::Unchanged
    }
}

#[derive(Debug)]
struct Mount {
    surface: SharedSurface,
    slot: SlotId,
}

/// A parameter widget: one spec, one bus endpoint, one model.
#[derive(Debug)]
pub struct InputWidget<K> {
    spec: ParameterSpec,
    rules: FieldRules,
    display: DisplayOptions,
    bus: Box<dyn Bus>,
    kind: K,
    phase: Phase,
    mount: Option<Mount>,
    model: Option<Value>,
    control: Option<InputControl>,
    /// The control holds an edit the model has not seen yet.
    pending: bool,
}

impl<K: InputKind> InputWidget<K> {
    pub(crate) fn with_kind(
        spec: ParameterSpec,
        bus: Box<dyn Bus>,
        options: &WidgetOptions,
        kind: K,
    ) -> Result<Self, SpecError> {
        let rules = FieldRules::from_spec(&spec, options.enabled)?;
        let display = DisplayOptions::derive(&spec, options);
        Ok(Self {
            spec,
            rules,
            display,
            bus,
            kind,
            phase: Phase::Constructed,
            mount: None,
            model: None,
            control: None,
            pending: false,
        })
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn variant(&self) -> &K {
        &self.kind
    }

    pub fn slot(&self) -> Option<SlotId> {
        self.mount.as_ref().map(|mount| mount.slot)
    }

    fn repaint(&self) {
        if let (Some(mount), Some(control)) = (&self.mount, &self.control) {
            mount.surface.borrow_mut().paint(mount.slot, control);
        }
    }

    fn commit(&mut self, result: &ValidationResult) {
        self.pending = false;
        if result.is_valid {
            self.model = result.value.clone();
            self.bus.send(Outbound::Changed {
                new_value: result.value.clone().unwrap_or(Value::Null),
            });
        }
        self.bus.send(Outbound::validation(result));
    }
}

impl<K: InputKind> FormField for InputWidget<K> {
    fn kind(&self) -> ComponentKind {
        self.kind.component()
    }

    fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn attach(&mut self, surface: SharedSurface) -> Result<(), LifecycleError> {
        self.phase.advance(&self.spec.id, Phase::Attached)?;
        let slot = surface
            .borrow_mut()
            .mount(PanelLayout::new(self.display.environment));
        debug!(param = %self.spec.id, slot = slot.index(), "widget attached");
        self.mount = Some(Mount { surface, slot });
        Ok(())
    }

    fn start(&mut self) -> Result<(), LifecycleError> {
        self.phase.advance(&self.spec.id, Phase::Started)?;
        self.bus.listen(Topic::ResetToDefaults);
        self.bus.listen(Topic::Update);
        self.bus.send(Outbound::Sync);
        debug!(param = %self.spec.id, "widget started");
        Ok(())
    }

    fn run(&mut self, input: Option<Value>) -> Result<(), LifecycleError> {
        self.phase.advance(&self.spec.id, Phase::Running)?;
        if let Some(value) = input.filter(|value| !value.is_null()) {
            self.model = Some(value);
        }
        self.render();
        Ok(())
    }

    fn value(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    fn set_value(&mut self, value: Value) -> bool {
        let next = (!value.is_null()).then_some(value);
        let changed = self.model != next;
        self.model = next;
        // always re-render, even when the value is unchanged
        self.render();
        changed
    }

    fn unset_value(&mut self) {
        self.model = None;
        self.render();
    }

    fn reset_to_default(&mut self) {
        match self.spec.first_default().cloned() {
            Some(default) => {
                self.set_value(default);
            }
            None => self.unset_value(),
        }
    }

    fn render(&mut self) {
        let Some(mount) = &self.mount else {
            trace!(param = %self.spec.id, "render skipped; widget is not attached");
            return;
        };
        let control = self.kind.build_control(self.model.as_ref(), &self.display);
        mount.surface.borrow_mut().paint(mount.slot, &control);
        self.control = Some(control);
        self.pending = false;
        let result = self.validate();
        self.bus.send(Outbound::validation(&result));
    }

    fn validate(&self) -> ValidationResult {
        let raw = self
            .control
            .as_ref()
            .map(InputControl::raw_value)
            .unwrap_or(Value::Null);
        self.rules.validate(&raw)
    }

    fn process_inbound(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.bus.poll() {
            match message {
                Inbound::Update { value } => {
                    self.set_value(value);
                }
                Inbound::ResetToDefaults => self.reset_to_default(),
            }
            handled += 1;
        }
        handled
    }

    fn user_input(&mut self, raw: Value) -> ValidationResult {
        if !self.display.enabled {
            debug!(param = %self.spec.id, "ignoring input for a disabled widget");
            return ValidationResult::disabled();
        }
        if let Some(control) = self.control.as_mut() {
            control.assign_raw(&raw);
        }
        self.repaint();
        let result = self.rules.validate(&raw);
        self.commit(&result);
        result
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.display.enabled {
            return false;
        }
        let Some(control) = self.control.as_mut() else {
            return false;
        };
        let before = control.raw_value();
        let outcome = self.kind.handle_key(control, key);
        let raw = control.raw_value();
        match outcome {
            KeyOutcome::Ignored => false,
            KeyOutcome::Edited => {
                // moving the highlight alone leaves nothing to commit
                self.pending |= raw != before;
                self.repaint();
                true
            }
            KeyOutcome::Committed => {
                self.repaint();
                let result = self.rules.validate(&raw);
                self.commit(&result);
                true
            }
        }
    }

    fn commit_pending(&mut self) -> bool {
        if !self.pending || !self.display.enabled {
            return false;
        }
        let Some(control) = self.control.as_ref() else {
            return false;
        };
        let result = self.rules.validate(&control.raw_value());
        trace!(param = %self.spec.id, valid = result.is_valid, "committing pending edit");
        self.commit(&result);
        true
    }

    fn control(&self) -> Option<&InputControl> {
        self.control.as_ref()
    }

    fn suggestion_type(&self) -> Option<&str> {
        self.kind.suggestion_type()
    }

    fn set_suggestions(&mut self, suggestions: Vec<String>) -> bool {
        match self.kind.set_suggestions(suggestions) {
            SuggestionChange::Unchanged => false,
            SuggestionChange::Cleared => {
                self.unset_value();
                true
            }
            SuggestionChange::Updated => {
                self.render();
                true
            }
        }
    }
}
