//! Config-driven guest manifest compare and message runs (`mfst`).

pub mod exit_codes;

use std::path::{Path, PathBuf};

use manifest_engine::config::config_kind;
use manifest_engine::load::{load_csv_rows, load_json_rows};
use manifest_engine::{run_compare, run_messages, CompareJob, MessageJob, Row};

use exit_codes::{EXIT_DIFFERENCES, EXIT_INVALID_CONFIG, EXIT_RUNTIME};

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError {
        code,
        message: message.into(),
    }
}

/// Run a job config: dispatch on its `kind`, load sources, run the
/// engine, emit JSON and a stderr summary.
pub fn cmd_run(
    config_path: &Path,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    match config_kind(&config_str).as_str() {
        "compare" => cmd_run_compare(base_dir, &config_str, json_output, output_file),
        "messages" => cmd_run_messages(base_dir, &config_str, json_output, output_file),
        other => Err(cli_err(
            EXIT_INVALID_CONFIG,
            format!("unknown config kind: \"{other}\" (expected \"compare\" or \"messages\")"),
        )),
    }
}

fn cmd_run_compare(
    base_dir: &Path,
    config_str: &str,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let job = CompareJob::from_toml(config_str)
        .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    let rows_a = load_source(base_dir, &job.file1.file)?;
    let rows_b = load_source(base_dir, &job.file2.file)?;

    let report = run_compare(&job, &rows_a, &rows_b);

    emit_json(&report, json_output, output_file)?;

    let s = &report.summary;
    eprintln!(
        "compare '{}': {} guests, {} matched, {} different, {} only in file1, {} only in file2",
        report.meta.config_name, s.total, s.matched, s.different, s.only_file1, s.only_file2,
    );

    if s.different > 0 || s.only_file1 > 0 || s.only_file2 > 0 {
        return Err(cli_err(EXIT_DIFFERENCES, "differences found"));
    }
    Ok(())
}

fn cmd_run_messages(
    base_dir: &Path,
    config_str: &str,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let job = MessageJob::from_toml(config_str)
        .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    let rows = load_source(base_dir, &job.file.file)?;
    let report = run_messages(&job, &rows);

    emit_json(&report, json_output, output_file)?;

    // Without --json, the rendered texts go to stdout directly.
    if !json_output {
        for (i, msg) in report.messages.iter().enumerate() {
            if i > 0 {
                println!("---");
            }
            println!("{}", msg.text);
        }
    }

    eprintln!(
        "messages '{}': {} group(s) from {} row(s)",
        report.meta.config_name,
        report.group_count,
        rows.len(),
    );
    Ok(())
}

/// Validate a job config without running it.
pub fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    match config_kind(&config_str).as_str() {
        "messages" => {
            let job = MessageJob::from_toml(&config_str)
                .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;
            eprintln!(
                "valid: {} messages '{}' with {} cleanup rule(s)",
                job.mode,
                job.name,
                job.cleanup.len(),
            );
            Ok(())
        }
        _ => {
            let job = CompareJob::from_toml(&config_str)
                .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;
            eprintln!(
                "valid: compare '{}' on {} field(s), {} cleanup rule(s)",
                job.name,
                job.compare.fields.len(),
                job.cleanup.len(),
            );
            Ok(())
        }
    }
}

/// Load rows from a source path: `.json` loads as a JSON row array,
/// anything else as headered CSV.
fn load_source(base_dir: &Path, file: &str) -> Result<Vec<Row>, CliError> {
    let path: PathBuf = base_dir.join(file);
    let data = std::fs::read_to_string(&path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))?;

    let result = if path.extension().is_some_and(|ext| ext == "json") {
        load_json_rows(&data)
    } else {
        load_csv_rows(&data)
    };
    result.map_err(|e| cli_err(EXIT_RUNTIME, format!("{}: {e}", path.display())))
}

fn emit_json<T: serde::Serialize>(
    report: &T,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(report)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }
    Ok(())
}
