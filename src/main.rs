// Mon Jan 19 2026 - Alex

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use struct_lint::{
    config::Config,
    orchestration::{ExitStatus, LintReport, Linter},
    structure::{load_layouts, LayoutSet, StructLayout, TargetArch},
    validation::{Finding, Severity},
};

#[derive(Parser, Debug)]
#[command(name = "struct-lint")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Detect struct alignment issues from extracted layout records", long_about = None)]
struct Args {
    /// Layout record files (JSON) to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Older layout records to diff against for evolution regressions
    #[arg(long)]
    baseline: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Naming pattern for structs that should be packed (repeatable, `re:` for regex)
    #[arg(short, long)]
    pattern: Vec<String>,

    /// Target architecture for the alignment table
    #[arg(long)]
    target: Option<TargetArch>,

    /// Lowest severity that is reported
    #[arg(long)]
    min_severity: Option<Severity>,

    /// Suppress summary line, only print issues
    #[arg(short, long)]
    quiet: bool,

    /// Also print structs that passed checks
    #[arg(short, long)]
    verbose: bool,

    /// Skip "should be packed" detection
    #[arg(long)]
    no_packed_check: bool,

    /// Skip misaligned member detection
    #[arg(long)]
    no_alignment_check: bool,

    /// Analyze structs on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match run(&args) {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("{} {:#}", "[!]".red(), e);
            std::process::exit(ExitStatus::InputFailure.code());
        }
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> anyhow::Result<ExitStatus> {
    let linter = Linter::new(build_config(args)?).context("invalid configuration")?;

    let set = load_all(&args.paths);
    if set.is_empty() {
        anyhow::bail!("no struct records could be loaded");
    }

    let report = match &args.baseline {
        Some(path) => {
            let baseline = load_layouts(path)
                .with_context(|| format!("failed to load baseline {}", path.display()))?;
            linter.compare_set(&baseline, &set)
        }
        None => linter.lint_set(&set),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &set.structs, args);
    }

    Ok(report.exit_status())
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(target) = args.target {
        config = config.with_target(target);
    }
    if !args.pattern.is_empty() {
        config = config.with_naming_patterns(args.pattern.iter().cloned());
    }
    if let Some(severity) = args.min_severity {
        config = config.with_min_severity(severity);
    }
    if args.no_packed_check {
        config = config.with_packing_check(false);
    }
    if args.no_alignment_check {
        config = config.with_alignment_check(false);
    }
    if args.sequential {
        config = config.with_parallel(false);
    }
    Ok(config)
}

fn load_all(paths: &[PathBuf]) -> LayoutSet {
    let mut set = LayoutSet::default();
    for path in paths {
        match load_layouts(path) {
            Ok(loaded) => set.extend(loaded),
            Err(e) => eprintln!("{} Failed to load {}: {}", "[!]".red(), path.display(), e),
        }
    }
    log::info!("Loaded {} structs from {} files", set.structs.len(), paths.len());
    set
}

fn print_report(report: &LintReport, structs: &[StructLayout], args: &Args) {
    for finding in report.errors.iter().chain(&report.findings) {
        println!("{}", format_finding(finding));
    }

    if args.verbose {
        let flagged: HashSet<&str> = report
            .findings
            .iter()
            .chain(&report.errors)
            .map(|f| f.struct_name.as_str())
            .collect();
        let mut seen = HashSet::new();
        for layout in structs {
            if !flagged.contains(layout.name()) && seen.insert(layout.name()) {
                println!("{} {} ({} bytes)", "ok".green(), layout.name(), layout.total_size());
            }
        }
    }

    if args.quiet {
        return;
    }

    if report.findings.is_empty() && report.errors.is_empty() {
        println!("No issues found in {} structs.", report.structs_analyzed);
    } else {
        println!(
            "\n{} issues found in {} structs",
            report.findings.len() + report.errors.len(),
            report.structs_total
        );
    }
}

fn format_finding(finding: &Finding) -> String {
    let severity = match finding.severity {
        Severity::Error => finding.severity.to_string().red().bold(),
        Severity::Warning => finding.severity.to_string().yellow(),
        Severity::Advisory => finding.severity.to_string().cyan(),
        Severity::Info => finding.severity.to_string().normal(),
    };

    match &finding.location {
        Some(location) => format!(
            "{}:{}: {}: {}",
            make_relative(&location.file),
            location.line,
            severity,
            finding.message
        ),
        None => format!("{}: {}", severity, finding.message),
    }
}

fn make_relative(path: &str) -> String {
    let cwd = env::current_dir().unwrap_or_default();
    let p = Path::new(path);
    p.strip_prefix(&cwd)
        .unwrap_or(p)
        .to_string_lossy()
        .to_string()
}
