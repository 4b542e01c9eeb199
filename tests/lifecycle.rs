use methodinput::bus::{HostBus, Inbound, Outbound, channel};
use methodinput::control::{InputControl, RecordingSurface, shared};
use methodinput::prelude::*;
use methodinput::{Diagnosis, DropdownOption, LifecycleError, Phase};
use serde_json::{Value, json};

fn ab_spec() -> ParameterSpec {
    ParameterSpec::dropdown(
        "choice",
        vec![DropdownOption::new("a", "A"), DropdownOption::new("b", "B")],
    )
}

fn running(spec: ParameterSpec, options: WidgetOptions) -> (Box<dyn FormField>, HostBus) {
    let (bus, host) = channel();
    let mut widget = make_widget(spec, Box::new(bus), &options).expect("widget");
    widget
        .attach(shared(RecordingSurface::new()))
        .expect("attach");
    widget.start().expect("start");
    widget.run(None).expect("run");
    (widget, host)
}

fn diagnoses(messages: &[Outbound]) -> Vec<Diagnosis> {
    messages
        .iter()
        .filter_map(|message| match message {
            Outbound::Validation { diagnosis, .. } => Some(*diagnosis),
            _ => None,
        })
        .collect()
}

#[test]
fn startup_emits_one_sync_then_one_validation() {
    let (bus, host) = channel();
    let mut widget = make_widget(ab_spec(), Box::new(bus), &WidgetOptions::default()).unwrap();
    assert_eq!(widget.phase(), Phase::Constructed);
    widget.attach(shared(RecordingSurface::new())).unwrap();
    widget.start().unwrap();
    widget.run(None).unwrap();
    assert_eq!(widget.phase(), Phase::Running);

    let messages = host.drain();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], Outbound::Sync);
    assert_eq!(diagnoses(&messages), vec![Diagnosis::OptionalEmpty]);
}

#[test]
fn lifecycle_misuse_is_an_error() {
    let (bus, _host) = channel();
    let mut widget = make_widget(ab_spec(), Box::new(bus), &WidgetOptions::default()).unwrap();
    assert!(matches!(
        widget.start(),
        Err(LifecycleError::NotAttached { .. })
    ));
    widget.attach(shared(RecordingSurface::new())).unwrap();
    assert!(matches!(
        widget.attach(shared(RecordingSurface::new())),
        Err(LifecycleError::AlreadyAttached { .. })
    ));
}

#[test]
fn disabled_widgets_always_validate() {
    let (widget, _host) = running(
        ab_spec().with_required(true),
        WidgetOptions::default().with_enabled(false),
    );
    let result = widget.validate();
    assert!(result.is_valid);
    assert!(!result.validated);
    assert_eq!(result.diagnosis, Diagnosis::Disabled);
}

#[test]
fn required_and_empty_is_missing() {
    let (widget, _host) = running(ParameterSpec::text("name").with_required(true), WidgetOptions::default());
    let result = widget.validate();
    assert!(!result.is_valid);
    assert_eq!(result.diagnosis, Diagnosis::RequiredMissing);
    assert_eq!(result.error_message.as_deref(), Some("value is required"));
}

#[test]
fn rendering_twice_reports_the_same_validation() {
    let (mut widget, host) = running(ab_spec(), WidgetOptions::default());
    widget.render();
    let first = host.drain();
    widget.render();
    assert_eq!(host.drain(), first);
}

#[test]
fn set_value_selects_the_matching_option() {
    let (mut widget, _host) = running(ab_spec(), WidgetOptions::default());
    assert!(widget.set_value(json!("b")));
    let first = widget.control().cloned();
    assert!(!widget.set_value(json!("b")));
    assert_eq!(widget.control().cloned(), first);
    assert_eq!(
        widget.control().map(InputControl::selected_values),
        Some(vec!["b"])
    );
}

#[test]
fn reset_follows_the_declared_defaults() {
    let (mut widget, _host) = running(
        ab_spec().with_defaults(vec![json!("a")]),
        WidgetOptions::default(),
    );
    widget.set_value(json!("b"));
    widget.reset_to_default();
    assert_eq!(widget.value(), Some(&json!("a")));

    let (mut widget, host) = running(ab_spec().with_required(true), WidgetOptions::default());
    widget.set_value(json!("b"));
    host.drain();
    widget.reset_to_default();
    assert_eq!(widget.value(), None);
    assert_eq!(diagnoses(&host.drain()), vec![Diagnosis::RequiredMissing]);
}

#[test]
fn host_commands_arrive_over_the_bus() {
    let (mut widget, host) = running(ab_spec().with_defaults(vec![json!("a")]), WidgetOptions::default());
    assert!(host.send(Inbound::Update { value: json!("b") }));
    assert!(host.send(Inbound::ResetToDefaults));
    assert_eq!(widget.process_inbound(), 2);
    assert_eq!(widget.value(), Some(&json!("a")));
    let messages = host.drain();
    assert!(
        messages
            .iter()
            .all(|message| !matches!(message, Outbound::Changed { .. }))
    );
}

#[test]
fn user_edits_emit_changed_only_when_valid() {
    let (mut widget, host) = running(ab_spec(), WidgetOptions::default());
    let result = widget.user_input(json!("b"));
    assert!(result.is_valid);
    assert_eq!(
        host.drain(),
        vec![
            Outbound::Changed {
                new_value: json!("b")
            },
            Outbound::Validation {
                diagnosis: Diagnosis::Valid,
                error_message: None,
            },
        ]
    );

    let result = widget.user_input(json!("zzz"));
    assert_eq!(result.diagnosis, Diagnosis::InvalidValue);
    let messages = host.drain();
    assert_eq!(messages.len(), 1);
    assert_eq!(diagnoses(&messages), vec![Diagnosis::InvalidValue]);
    assert_eq!(widget.value(), Some(&json!("b")));
}

#[test]
fn a_cell_round_trips_its_state() {
    let method = methodinput::parse_method(&json!({
        "id": "trim",
        "parameters": [
            {"id": "quality", "required": true, "text_options": {"validate_as": "float", "min": 0, "max": 40}},
            {"id": "adapters", "multipleItems": true, "dropdown_options": {"options": [
                {"value": "nextera"}, {"value": "truseq"}
            ]}}
        ]
    }))
    .expect("method");

    let mut cell = ParameterCell::new(method.clone(), CellOptions::default()).unwrap();
    cell.start().unwrap();
    cell.update("quality", json!("20.5")).unwrap();
    cell.update("adapters", json!(["truseq", "nextera"])).unwrap();
    assert!(cell.is_valid());
    let saved = cell.state();

    let mut restored = ParameterCell::new(method, CellOptions::default()).unwrap();
    restored.start().unwrap();
    restored.load_state(&saved);
    assert_eq!(restored.parameters(), cell.parameters());
    assert!(restored.is_valid());
    assert_eq!(restored.parameters()[0], Value::String("20.5".into()));
}
