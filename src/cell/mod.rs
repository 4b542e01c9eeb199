//! Host side of the bus: one widget per method parameter, with their traffic
//! folded into per-parameter state.

mod options;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crossterm::event::KeyEvent;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::bus::{HostBus, Inbound, Outbound, channel};
use crate::control::{Environment, InputControl, RecordingSurface, SharedSurface};
use crate::domain::{MethodSpec, ParameterSpec, SpecError};
use crate::validation::Diagnosis;
use crate::widget::{FormField, LifecycleError, make_widget};

pub use options::CellOptions;

#[derive(Debug, thiserror::Error)]
pub enum CellError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("method has no parameter '{0}'")]
    UnknownParameter(String),
}

/// An outbound message tagged with the parameter that sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub param: String,
    #[serde(flatten)]
    pub message: Outbound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub diagnosis: Diagnosis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationReport {
    pub fn is_acceptable(&self) -> bool {
        self.diagnosis.is_acceptable()
    }
}

/// Read-only snapshot of one parameter for presentation.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub spec: &'a ParameterSpec,
    pub control: Option<&'a InputControl>,
    pub validation: Option<&'a ValidationReport>,
    pub synced: bool,
}

#[derive(Debug)]
struct FieldEntry {
    widget: Box<dyn FormField>,
    host: HostBus,
    synced: bool,
    dirty: bool,
    validation: Option<ValidationReport>,
}

#[derive(Debug)]
pub struct ParameterCell {
    method: MethodSpec,
    options: CellOptions,
    surface: Rc<RefCell<RecordingSurface>>,
    fields: IndexMap<String, FieldEntry>,
    transcript: Vec<Envelope>,
    started: bool,
}

impl ParameterCell {
    pub fn new(method: MethodSpec, options: CellOptions) -> Result<Self, CellError> {
        method.check()?;
        let mut fields = IndexMap::with_capacity(method.parameters.len());
        for spec in &method.parameters {
            let (bus, host) = channel();
            let widget = make_widget(
                spec.clone(),
                Box::new(bus),
                &options.widget_options(&spec.id),
            )?;
            fields.insert(
                spec.id.clone(),
                FieldEntry {
                    widget,
                    host,
                    synced: false,
                    dirty: false,
                    validation: None,
                },
            );
        }
        Ok(Self {
            method,
            options,
            surface: Rc::new(RefCell::new(RecordingSurface::new())),
            fields,
            transcript: Vec::new(),
            started: false,
        })
    }

    pub fn method(&self) -> &MethodSpec {
        &self.method
    }

    pub fn environment(&self) -> Environment {
        self.options.environment
    }

    pub fn surface(&self) -> Rc<RefCell<RecordingSurface>> {
        Rc::clone(&self.surface)
    }

    /// Attaches, starts and runs every widget in parameter order.
    pub fn start(&mut self) -> Result<Vec<Envelope>, CellError> {
        for entry in self.fields.values_mut() {
            let surface: SharedSurface = self.surface.clone();
            entry.widget.attach(surface)?;
            entry.widget.start()?;
            let seed = if self.options.seed_defaults {
                entry.widget.spec().first_default().cloned()
            } else {
                None
            };
            entry.widget.run(seed)?;
        }
        self.started = true;
        debug!(method = %self.method.id, fields = self.fields.len(), "cell started");
        Ok(self.pump())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Collects everything the widgets have sent since the last pump.
    pub fn pump(&mut self) -> Vec<Envelope> {
        let mut batch = Vec::new();
        for (id, entry) in &mut self.fields {
            for message in entry.host.drain() {
                match &message {
                    Outbound::Sync => entry.synced = true,
                    Outbound::Changed { .. } => entry.dirty = true,
                    Outbound::Validation {
                        diagnosis,
                        error_message,
                    } => {
                        entry.validation = Some(ValidationReport {
                            diagnosis: *diagnosis,
                            error_message: error_message.clone(),
                        });
                    }
                }
                batch.push(Envelope {
                    param: id.clone(),
                    message,
                });
            }
        }
        self.transcript.extend(batch.iter().cloned());
        batch
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut FieldEntry, CellError> {
        self.fields
            .get_mut(id)
            .ok_or_else(|| CellError::UnknownParameter(id.to_string()))
    }

    pub fn update(&mut self, id: &str, value: Value) -> Result<Vec<Envelope>, CellError> {
        let entry = self.entry_mut(id)?;
        entry.host.send(Inbound::Update { value });
        entry.widget.process_inbound();
        Ok(self.pump())
    }

    pub fn reset_to_defaults(&mut self) -> Vec<Envelope> {
        for entry in self.fields.values_mut() {
            entry.host.send(Inbound::ResetToDefaults);
            entry.widget.process_inbound();
        }
        self.pump()
    }

    pub fn user_input(&mut self, id: &str, raw: Value) -> Result<Vec<Envelope>, CellError> {
        let entry = self.entry_mut(id)?;
        entry.widget.user_input(raw);
        Ok(self.pump())
    }

    pub fn handle_key(&mut self, id: &str, key: &KeyEvent) -> Result<bool, CellError> {
        let handled = self.entry_mut(id)?.widget.handle_key(key);
        self.pump();
        Ok(handled)
    }

    /// Commits whatever the user typed into `id` without confirming it.
    pub fn commit_pending(&mut self, id: &str) -> Result<Vec<Envelope>, CellError> {
        if !self.entry_mut(id)?.widget.commit_pending() {
            return Ok(Vec::new());
        }
        Ok(self.pump())
    }

    /// Current values in parameter order, `null` when unset.
    pub fn parameters(&self) -> Vec<Value> {
        self.fields
            .values()
            .map(|entry| entry.widget.value().cloned().unwrap_or(Value::Null))
            .collect()
    }

    pub fn state(&self) -> IndexMap<String, Value> {
        self.fields
            .iter()
            .map(|(id, entry)| {
                (
                    id.clone(),
                    entry.widget.value().cloned().unwrap_or(Value::Null),
                )
            })
            .collect()
    }

    /// Pushes a saved state back through the bus. Unknown keys are skipped.
    pub fn load_state(&mut self, state: &IndexMap<String, Value>) -> Vec<Envelope> {
        for (id, value) in state {
            match self.fields.get_mut(id) {
                Some(entry) => {
                    entry.host.send(Inbound::Update {
                        value: value.clone(),
                    });
                    entry.widget.process_inbound();
                }
                None => debug!(param = %id, "saved state names an unknown parameter"),
            }
        }
        self.pump()
    }

    /// Hands each text parameter the names of its suggestion type.
    pub fn refresh_suggestions(&mut self, objects: &HashMap<String, Vec<String>>) -> Vec<Envelope> {
        for entry in self.fields.values_mut() {
            let Some(kind) = entry.widget.suggestion_type() else {
                continue;
            };
            let names = objects.get(kind).cloned().unwrap_or_default();
            entry.widget.set_suggestions(names);
        }
        self.pump()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|entry| {
            entry
                .validation
                .as_ref()
                .is_some_and(ValidationReport::is_acceptable)
        })
    }

    pub fn validation(&self, id: &str) -> Option<&ValidationReport> {
        self.fields
            .get(id)
            .and_then(|entry| entry.validation.as_ref())
    }

    pub fn is_dirty(&self, id: &str) -> bool {
        self.fields.get(id).is_some_and(|entry| entry.dirty)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn views(&self) -> Vec<FieldView<'_>> {
        self.fields
            .values()
            .map(|entry| FieldView {
                spec: entry.widget.spec(),
                control: entry.widget.control(),
                validation: entry.validation.as_ref(),
                synced: entry.synced,
            })
            .collect()
    }

    pub fn transcript(&self) -> &[Envelope] {
        &self.transcript
    }
}
