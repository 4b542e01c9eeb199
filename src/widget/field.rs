use crossterm::event::KeyEvent;
use serde_json::Value;

use crate::control::{InputControl, SharedSurface};
use crate::domain::ParameterSpec;
use crate::validation::ValidationResult;

use super::lifecycle::{LifecycleError, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    SingleSelect,
    TextInput,
}

/// Capability set every parameter widget exposes to its host.
pub trait FormField: std::fmt::Debug {
    fn kind(&self) -> ComponentKind;
    fn spec(&self) -> &ParameterSpec;
    fn phase(&self) -> Phase;

    /// Mounts the widget's container on `surface`. Only once per widget.
    fn attach(&mut self, surface: SharedSurface) -> Result<(), LifecycleError>;

    /// Subscribes to host commands and announces `sync`.
    fn start(&mut self) -> Result<(), LifecycleError>;

    /// First render plus automatic validation, optionally seeded with `input`.
    fn run(&mut self, input: Option<Value>) -> Result<(), LifecycleError>;

    fn value(&self) -> Option<&Value>;

    /// Stores `value` and re-renders. Returns whether the model changed.
    fn set_value(&mut self, value: Value) -> bool;

    fn unset_value(&mut self);

    fn reset_to_default(&mut self);

    /// Rebuilds the control from the model, then validates and reports.
    fn render(&mut self);

    fn validate(&self) -> ValidationResult;

    /// Handles pending host commands. Returns how many were applied.
    fn process_inbound(&mut self) -> usize;

    /// A user edit of the control: reports `changed` when valid, then
    /// `validation` in every case.
    fn user_input(&mut self, raw: Value) -> ValidationResult;

    fn handle_key(&mut self, key: &KeyEvent) -> bool;

    /// Commits an edit typed into the control but not confirmed yet, as
    /// happens when focus leaves the field. Returns whether anything was sent.
    fn commit_pending(&mut self) -> bool;

    fn control(&self) -> Option<&InputControl>;

    fn suggestion_type(&self) -> Option<&str> {
        None
    }

    fn set_suggestions(&mut self, _suggestions: Vec<String>) -> bool {
        false
    }
}
