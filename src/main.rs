use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use recurrence_finder::{
    check_index, count_divisors, find_first, run, survey, verify_report, Filter, ScanConfig,
    ScanReport, Sequence, SurveyResults, Term, Verdict,
};
use std::path::Path;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "recurrence-finder")]
#[command(
    about = "Search a digital-root recurrence for the first index passing a chain of number-theoretic filters",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Log to stderr (-v info, -vv debug)")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Explain how the filter chain treats a single index")]
    Check {
        #[arg(help = "The index to check")]
        index: usize,
    },

    #[command(about = "Dump the recurrence as JSON")]
    Sequence {
        #[arg(short, long, help = "Output file (default: stdout)")]
        output: Option<String>,
    },

    #[command(about = "Evaluate every index and tally which filter rejected it")]
    Survey {
        #[arg(long, help = "Spread the checks over all CPU cores")]
        parallel: bool,

        #[arg(short, long, help = "Save a report (JSON) for later verification")]
        output: Option<String>,
    },

    #[command(about = "Recompute a saved report and compare the results")]
    Verify {
        #[arg(help = "Path to the report file")]
        report_file: String,
    },

    #[command(about = "Run benchmark tests")]
    Benchmark,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => solve(),
        Some(Commands::Check { index }) => check(index),
        Some(Commands::Sequence { output }) => dump_sequence(output.as_deref()),
        Some(Commands::Survey { parallel, output }) => survey_indices(parallel, output.as_deref()),
        Some(Commands::Verify { report_file }) => verify(&report_file),
        Some(Commands::Benchmark) => {
            run_benchmark();
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn solve() -> anyhow::Result<()> {
    if let Some(line) = run(&ScanConfig::default())?.result_line() {
        println!("{}", line);
    }
    Ok(())
}

fn check(index: usize) -> anyhow::Result<()> {
    let config = ScanConfig::default();
    let seq = Sequence::build(&config);

    let Some(verdict) = check_index(&seq, &config, index) else {
        bail!(
            "index {} is outside the scan range {}..={}",
            index,
            config.scan_start,
            config.length
        );
    };

    let value = seq.get(index).unwrap_or_default();
    let lagged = seq.get(index - config.lag).unwrap_or_default();

    println!("Index: {}", index);
    println!("  a[{}] = {}", index, value);
    println!("  a[{}] = {}", index - config.lag, lagged);
    println!(
        "  Residues mod {}: {} / {}",
        config.congruence_modulus,
        value % config.congruence_modulus,
        lagged % config.congruence_modulus
    );
    println!("  Divisor count of a[{}]: {}", index, count_divisors(value));
    match verdict {
        Verdict::Accepted => println!("  Status: passes every filter"),
        Verdict::Rejected(filter) => println!("  Status: rejected ({})", filter),
    }
    Ok(())
}

fn dump_sequence(output: Option<&str>) -> anyhow::Result<()> {
    let seq = Sequence::build(&ScanConfig::default());
    let terms: Vec<Term> = seq.terms().collect();

    match output {
        Some(path) => {
            recurrence_finder::io_utils::save_to_file(&terms, Path::new(path))
                .with_context(|| format!("failed to write {}", path))?;
            println!("✓ {} terms saved to {}", terms.len(), path);
        }
        None => println!("{}", serde_json::to_string_pretty(&terms)?),
    }
    Ok(())
}

fn survey_indices(parallel: bool, output: Option<&str>) -> anyhow::Result<()> {
    let config = ScanConfig::default();

    let start_time = Instant::now();
    let Some(path) = output else {
        let results = survey(&config, parallel)?;
        print_survey(&results, start_time.elapsed());
        return Ok(());
    };

    let report = ScanReport::generate(&config, parallel)?;
    report
        .save(Path::new(path))
        .with_context(|| format!("failed to write report {}", path))?;
    print_survey(&report.survey, start_time.elapsed());
    println!("\n✓ Report saved to {}", path);
    Ok(())
}

fn print_survey(results: &SurveyResults, elapsed: std::time::Duration) {
    println!("========================================");
    println!("  SURVEY");
    println!("========================================");
    println!("Indices scanned: {}", results.scanned);
    for filter in Filter::CHAIN {
        println!("  Rejected, {:<42} {}", format!("{}:", filter), results.rejected_by(filter));
    }
    println!("Accepted: {}", results.accepted.len());
    if !results.accepted.is_empty() {
        let shown: Vec<String> = results.accepted.iter().take(20).map(|n| n.to_string()).collect();
        println!("  {}", shown.join(", "));
    }
    println!("Time elapsed: {:.3}s", elapsed.as_secs_f64());
}

fn verify(report_file: &str) -> anyhow::Result<()> {
    let report = ScanReport::load(Path::new(report_file))
        .with_context(|| format!("failed to read report {}", report_file))?;

    verify_report(&report)?;
    println!("✓ Report {} reproduced (recorded {})", report_file, report.timestamp);
    Ok(())
}

fn run_benchmark() {
    println!("Running benchmarks...\n");
    let config = ScanConfig::default();

    let start_time = Instant::now();
    let seq = Sequence::build(&config);
    println!("Sequence build ({} terms):", seq.len());
    println!("  Time: {:.6}s\n", start_time.elapsed().as_secs_f64());

    let start_time = Instant::now();
    let outcome = find_first(&seq, &config);
    println!("Scan to first match:");
    println!("  Outcome: {:?}", outcome);
    println!("  Time: {:.6}s\n", start_time.elapsed().as_secs_f64());

    for parallel in [false, true] {
        let start_time = Instant::now();
        match survey(&config, parallel) {
            Ok(results) => {
                println!("Survey ({}):", if parallel { "parallel" } else { "sequential" });
                println!("  Scanned: {}", results.scanned);
                println!("  Time: {:.6}s\n", start_time.elapsed().as_secs_f64());
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
