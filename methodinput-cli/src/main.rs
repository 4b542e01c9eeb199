use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use methodinput::{
    CellOptions, CellUi, DocumentFormat, Envelope, ParameterCell, UiOptions, ValidationReport,
    load_method_str, load_state_str, parse_document_str, render_document,
};

const LOG_ENV: &str = "METHODINPUT_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "methodinput",
    version,
    about = "Fill in and validate the parameters of a notebook method"
)]
struct Cli {
    /// Method document: file path, inline payload, or "-" for stdin
    #[arg(short = 'm', long = "method", value_name = "SPEC")]
    method: String,

    /// Saved state to restore: file path, inline payload, or "-" for stdin
    #[arg(short = 's', long = "state", value_name = "SPEC")]
    state: Option<String>,

    /// Push a value to a parameter as the host would (ID=JSON, bare text is a string)
    #[arg(long = "set", value_name = "ID=VALUE", action = ArgAction::Append)]
    set: Vec<String>,

    /// Restore every parameter to its default after state and --set are applied
    #[arg(long = "reset")]
    reset: bool,

    /// Suggestion names keyed by object type: file path, inline payload, or "-"
    #[arg(long = "suggestions", value_name = "SPEC")]
    suggestions: Option<String>,

    /// Lay the cell out for the narrow side panel
    #[arg(long = "side-panel")]
    side_panel: bool,

    /// Render a parameter as disabled. Repeatable.
    #[arg(long = "disable", value_name = "ID", action = ArgAction::Append)]
    disabled: Vec<String>,

    /// Start every parameter empty instead of at its first default
    #[arg(long = "no-defaults")]
    no_defaults: bool,

    /// Open the terminal UI before printing the result
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Include every bus message in the output
    #[arg(long = "transcript")]
    transcript: bool,

    /// Output format: json, yaml or toml
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    format: Option<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Exit with an error when any parameter fails validation
    #[arg(long = "strict")]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    method: &'a str,
    valid: bool,
    parameters: Vec<Value>,
    state: IndexMap<String, Value>,
    validation: IndexMap<String, ValidationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<&'a [Envelope]>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    let output_format = match cli.format.as_deref() {
        Some(name) => DocumentFormat::from_extension(name)
            .ok_or_else(|| eyre!("unsupported output format '{name}'"))?,
        None => DocumentFormat::Json,
    };
    let stdin_specs = [Some(cli.method.as_str()), cli.state.as_deref(), cli.suggestions.as_deref()]
        .into_iter()
        .filter(|spec| *spec == Some("-"))
        .count();
    if stdin_specs > 1 {
        bail!("only one of --method, --state and --suggestions can read from stdin");
    }

    let (contents, format) = read_spec(&cli.method, "method")?;
    let method = load_method_str(&contents, format).map_err(|err| eyre!("{err:#}"))?;
    info!(method = %method.id, parameters = method.parameters.len(), "method loaded");

    let mut options = CellOptions::default()
        .in_side_panel(cli.side_panel)
        .with_seed_defaults(!cli.no_defaults);
    for id in &cli.disabled {
        if method.parameter(id).is_none() {
            bail!("--disable names unknown parameter '{id}'");
        }
        options = options.with_disabled(id.clone());
    }

    let mut cell = ParameterCell::new(method, options)?;
    cell.start()?;

    if let Some(spec) = cli.state.as_deref() {
        let (contents, format) = read_spec(spec, "state")?;
        let state = load_state_str(&contents, format).map_err(|err| eyre!("{err:#}"))?;
        cell.load_state(&state);
    }
    for assignment in &cli.set {
        let (id, value) = parse_assignment(assignment)?;
        cell.update(id, value)?;
    }
    if cli.reset {
        cell.reset_to_defaults();
    }
    if let Some(spec) = cli.suggestions.as_deref() {
        let (contents, format) = read_spec(spec, "suggestions")?;
        let objects = parse_document_str(&contents, format).map_err(|err| eyre!("{err:#}"))?;
        let objects: HashMap<String, Vec<String>> = serde_json::from_value(objects)
            .wrap_err("suggestions must map object types to lists of names")?;
        cell.refresh_suggestions(&objects);
    }

    if cli.interactive {
        let mut ui = CellUi::new(cell).with_options(UiOptions::default());
        if let Some(title) = cli.title.as_ref() {
            ui = ui.with_title(title.clone());
        }
        cell = ui
            .run()
            .map_err(|err| eyre!("{err:#}"))?
            .ok_or_else(|| eyre!("parameter entry cancelled"))?;
    }

    let summary = Summary {
        method: &cell.method().id,
        valid: cell.is_valid(),
        parameters: cell.parameters(),
        state: cell.state(),
        validation: cell
            .field_ids()
            .filter_map(|id| cell.validation(id).map(|report| (id.to_string(), report.clone())))
            .collect(),
        transcript: cli.transcript.then(|| cell.transcript()),
    };
    let payload =
        render_document(&summary, output_format, !cli.no_pretty).map_err(|err| eyre!("{err:#}"))?;
    println!("{payload}");

    if cli.strict && !summary.valid {
        bail!("one or more parameters failed validation");
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("methodinput=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

/// `id=value`. The value is JSON when it parses as JSON, otherwise a string.
fn parse_assignment(raw: &str) -> Result<(&str, Value)> {
    let Some((id, value)) = raw.split_once('=') else {
        bail!("--set expects ID=VALUE, got '{raw}'");
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("--set is missing a parameter id in '{raw}'");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((id, value))
}

fn read_spec(spec: &str, label: &str) -> Result<(String, DocumentFormat)> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return Ok((buffer, DocumentFormat::Json));
    }
    if looks_inline(spec) {
        return Ok((spec.to_string(), DocumentFormat::Json));
    }

    let path = PathBuf::from(spec);
    let contents = fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to load {label} from {}", path.display()))?;
    debug!(label, path = %path.display(), "read document from file");
    Ok((contents, DocumentFormat::from_path(&path)))
}

fn looks_inline(spec: &str) -> bool {
    let trimmed = spec.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}
