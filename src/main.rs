// Main CLI entry point for urlscope
// Uses clap for argument parsing

use clap::{Arg, ArgAction, Command};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use urlscope::config::ScannerConfig;
use urlscope::engine::ScanEngine;
use urlscope::models::ScanService;
use urlscope::orchestrator::{ScanOrchestrator, ScanState};
use urlscope::params::QueryInspector;
use urlscope::reporting::{render_as, OutputFormat};
use urlscope::view::render;

fn cli() -> Command {
    Command::new("urlscope")
        .version(clap::crate_version!())
        .about("Ask a URL risk-scanning service for a verdict and show the evidence")
        .after_help("EXAMPLES:\n  urlscope http://example.com\n  urlscope -b http://10.0.0.5:5500 -f html 'http://login-verify.example.tk/?session=1'\n  cat urls.txt | urlscope -f json\n\nENVIRONMENT:\n  URLSCOPE_API_BASE       Scanning service base address\n  URLSCOPE_TIMEOUT_SECS   Request timeout in seconds\n  RUST_LOG                Log filter (logs go to stderr)")
        .arg(Arg::new("urls")
            .num_args(0..)
            .value_name("URL")
            .help("URLs to scan; read one per line from stdin when omitted"))
        .arg(Arg::new("base_url")
            .short('b')
            .long("base-url")
            .num_args(1)
            .help("Base address of the scanning service"))
        .arg(Arg::new("timeout")
            .short('t')
            .long("timeout")
            .num_args(1)
            .value_parser(clap::value_parser!(f64))
            .help("Request timeout in seconds"))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .num_args(1)
            .default_value("text")
            .value_parser(["html", "text", "json"])
            .help("Output format"))
        .arg(Arg::new("keyword")
            .short('k')
            .long("keyword")
            .num_args(1)
            .action(ArgAction::Append)
            .help("Suspicious query keyword (repeatable, replaces the default set)"))
        .arg(Arg::new("show_progress")
            .long("show-progress")
            .action(ArgAction::SetTrue)
            .help("Also print the scanning placeholder before each result"))
}

fn build_config(matches: &clap::ArgMatches) -> urlscope::ScanResult<ScannerConfig> {
    let mut config = ScannerConfig::from_env()?;
    if let Some(base) = matches.get_one::<String>("base_url") {
        config = config.with_base_url(base)?;
    }
    if let Some(secs) = matches.get_one::<f64>("timeout") {
        config = config.with_timeout_secs(*secs)?;
    }
    if let Some(keywords) = matches.get_many::<String>("keyword") {
        config = config.with_keywords(keywords.cloned().collect());
    }
    Ok(config)
}

/// What a run of the scan loop amounts to
#[derive(Debug, Default, PartialEq, Eq)]
struct ScanSummary {
    scanned: usize,
    failures: usize,
}

impl ScanSummary {
    /// 0 when every scan succeeded, 1 when any failed
    fn exit_status(&self) -> u8 {
        if self.failures > 0 {
            1
        } else {
            0
        }
    }
}

fn emit<W: Write>(
    out: &mut W,
    state: &ScanState,
    inspector: &QueryInspector,
    format: OutputFormat,
) -> io::Result<()> {
    match render_as(&render(state, inspector), format) {
        Ok(text) => {
            write!(out, "{}", text)?;
            if format == OutputFormat::Json {
                writeln!(out)?;
            }
            out.flush()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to render scan result");
            Ok(())
        }
    }
}

/// Scan every input in order, writing each result to `out`. Stops at the
/// first write error (a closed pipe ends the run).
async fn scan_all<S, I, W>(
    orchestrator: &mut ScanOrchestrator<S>,
    inputs: I,
    inspector: &QueryInspector,
    format: OutputFormat,
    show_progress: bool,
    out: &mut W,
) -> io::Result<ScanSummary>
where
    S: ScanService,
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut summary = ScanSummary::default();
    for input in inputs {
        // blank lines leave the state untouched and print nothing
        let Some(ticket) = orchestrator.begin(&input) else {
            continue;
        };
        if show_progress {
            emit(out, &orchestrator.state(), inspector, format)?;
        }
        let state = orchestrator.run(ticket).await;
        summary.scanned += 1;
        if matches!(state, ScanState::Failed(_)) {
            summary.failures += 1;
        }
        emit(out, &state, inspector, format)?;
    }
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let format = matches
        .get_one::<String>("format")
        .and_then(|f| f.parse::<OutputFormat>().ok())
        .unwrap_or(OutputFormat::Text);
    let show_progress = matches.get_flag("show_progress");

    let engine = match ScanEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    tracing::info!(endpoint = engine.endpoint(), "using scanning service");

    let inspector = config.inspector();
    let mut orchestrator = ScanOrchestrator::new(engine, config.timeout);

    // stdin is consumed lazily so each line is scanned as soon as it is entered
    let inputs: Box<dyn Iterator<Item = String>> = match matches.get_many::<String>("urls") {
        Some(urls) => Box::new(urls.cloned().collect::<Vec<_>>().into_iter()),
        None => Box::new(io::stdin().lock().lines().map_while(Result::ok)),
    };

    let mut stdout = io::stdout();
    match scan_all(&mut orchestrator, inputs, &inspector, format, show_progress, &mut stdout).await {
        Ok(summary) => ExitCode::from(summary.exit_status()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed, stopping");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}
