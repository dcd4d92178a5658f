// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::Context;
use clap::{Parser, Subcommand};
use copperv_config::HarnessConfig;
use copperv_harness::{describe, evaluate, AssertionResult, RunOptions, RunReport, TimerSample};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{error, info};

const EXIT_PASS: u8 = 0;
const EXIT_ASSERT_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

const RESULT_SCHEMA_VERSION: &str = "1.0";

fn parse_u32_word(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(&hex.replace('_', ""), 16)
            .map_err(|e| format!("Invalid hex word '{}': {}", s, e))
    } else {
        u32::from_str(trimmed).map_err(|e| format!("Invalid word '{}': {}", s, e))
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "copperv timer smoke test harness",
    long_about = None
)]
struct Cli {
    /// Enable per-access bus tracing
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the timer diagnostic against the modelled registers.
    Run(RunArgs),

    /// Check output and a status word captured from an external simulator run.
    Verify(VerifyArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Path to the harness config (YAML); built-in copperv layout if omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Disable output-port stdout echo (still captured for assertions/artifacts)
    #[arg(long)]
    no_output_stdout: bool,

    /// Directory to write run artifacts (result.json, output.log)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the result document as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Captured output stream
    #[arg(long)]
    transcript: PathBuf,

    /// Word found in the result register (omit if it was never written)
    #[arg(long, value_parser = parse_u32_word)]
    status: Option<u32>,

    /// Path to the harness config (YAML); built-in copperv layout if omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print the result document as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunResult {
    result_schema_version: String,
    status: String,
    verdict: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_word: Option<u32>,
    samples: Vec<TimerSample>,
    served: Vec<i32>,
    bus_accesses: usize,
    violations: Vec<String>,
    sequence_problems: Vec<String>,
    assertions: Vec<AssertionResult>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    devices: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PathBuf>,
}

impl RunResult {
    fn new(
        report: &RunReport,
        assertions: Vec<AssertionResult>,
        sequence_problems: Vec<String>,
        config: Option<PathBuf>,
    ) -> Self {
        let passed = report.passed()
            && sequence_problems.is_empty()
            && assertions.iter().all(|a| a.passed);
        Self {
            result_schema_version: RESULT_SCHEMA_VERSION.to_string(),
            status: if passed { "pass" } else { "fail" }.to_string(),
            verdict: report.verdict.as_str().to_string(),
            status_word: report.status_word,
            samples: report.samples.clone(),
            served: report.served.clone(),
            bus_accesses: report.accesses.len(),
            violations: report.violations.iter().map(|v| v.to_string()).collect(),
            sequence_problems,
            assertions,
            devices: report.devices.clone(),
            config,
        }
    }

    fn passed(&self) -> bool {
        self.status == "pass"
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level based on --trace flag
    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Verify(args) => verify(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<HarnessConfig> {
    match path {
        Some(path) => {
            info!("Loading harness config: {:?}", path);
            HarnessConfig::from_file(path)
        }
        None => Ok(HarnessConfig::default()),
    }
}

fn run(args: RunArgs) -> ExitCode {
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let options = RunOptions {
        echo_stdout: !args.no_output_stdout && !args.json,
        sink: None,
    };
    let report = match copperv_harness::run_diagnostic(&config, options) {
        Ok(report) => report,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    };

    let sequence_problems = report
        .check_sequence()
        .iter()
        .map(|p| p.to_string())
        .collect();
    let assertions = evaluate(&config.assertions, &report);
    let result = RunResult::new(&report, assertions, sequence_problems, args.config.clone());

    if let Some(output_dir) = &args.output_dir {
        if let Err(e) = write_artifacts(output_dir, &result, &report) {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    }

    finish(&result, args.json)
}

fn verify(args: VerifyArgs) -> ExitCode {
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let transcript = match std::fs::read(&args.transcript)
        .with_context(|| format!("Failed to read transcript {:?}", args.transcript))
    {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let report = copperv_harness::verify_transcript(&config, &transcript, args.status);
    let assertions = evaluate(&config.assertions, &report);
    let result = RunResult::new(&report, assertions, Vec::new(), args.config.clone());

    finish(&result, args.json)
}

fn finish(result: &RunResult, json: bool) -> ExitCode {
    for a in &result.assertions {
        let mark = if a.passed { "ok" } else { "FAILED" };
        info!("Assertion {}: {}", describe(&a.assertion), mark);
    }
    for v in result.violations.iter().chain(&result.sequence_problems) {
        error!("{}", v);
    }

    if json {
        match serde_json::to_string(result) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                return ExitCode::from(EXIT_RUNTIME_ERROR);
            }
        }
    }

    if result.passed() {
        info!("Timer diagnostic passed");
        ExitCode::from(EXIT_PASS)
    } else {
        error!("Timer diagnostic failed (verdict: {})", result.verdict);
        ExitCode::from(EXIT_ASSERT_FAIL)
    }
}

fn write_artifacts(output_dir: &Path, result: &RunResult, report: &RunReport) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let result_path = output_dir.join("result.json");
    let f = std::fs::File::create(&result_path)
        .with_context(|| format!("Failed to create {:?}", result_path))?;
    serde_json::to_writer_pretty(f, result).context("Failed to write result.json")?;

    let output_path = output_dir.join("output.log");
    std::fs::write(&output_path, report.output.as_bytes())
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    Ok(())
}
