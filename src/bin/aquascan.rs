use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use aquascan::{Analyzer, ProcessOptions, ProcessResult, Report};

#[derive(Parser)]
#[command(
    name = "aquascan",
    about = "Estimate water coverage and pollution level in photos via HSV color analysis",
    version,
    after_help = "Simple usage: aquascan <image>  (print water percentage and pollution label)\n\n\
                  NOTE: This is a color-space heuristic, not a calibrated measurement.\n\
                  Results are coarse estimates intended for crowdsourced triage."
)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Write a JSON report of all analysis records to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Degrade failures to legacy defaults (0.0 / "analysis error") instead of failing
    #[arg(long)]
    compat: bool,

    /// Print records as JSON lines instead of human-readable status
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let opts = ProcessOptions {
        compat: cli.compat,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if opts.compat && !opts.quiet {
        eprintln!("WARNING: Compat mode - analysis failures degrade to defaults silently!");
    }

    let analyzer = Analyzer::new();

    let results = if input_path.is_dir() {
        analyzer.process_directory(input_path, &opts)
    } else {
        vec![analyzer.process_file(input_path, &opts)]
    };

    let mut report = Report::new();
    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, &opts, cli.json);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
        if let Some(record) = &r.record {
            report.push(record.clone());
        }
    }

    if let Some(out) = &cli.output {
        if let Err(e) = report.save(&PathBuf::from(out)) {
            eprintln!("Error: Failed to write report to {out}: {e}");
            process::exit(1);
        }
        if !opts.quiet {
            eprintln!("Report with {} record(s) written to {out}", report.len());
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Analyzed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions, json: bool) {
    if json {
        if let Some(record) = &result.record {
            match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("[FAIL] serializing record: {e}"),
            }
        }
        if !result.success {
            eprintln!("[FAIL] {}: {}", result.path.display(), result.message);
        }
        return;
    }

    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !opts.quiet {
            eprintln!("[OK] {filename}: {}", result.message);
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose {
        if let Some(record) = &result.record {
            eprintln!(
                "  -> {}x{}, water={:.2}%, pollution={}",
                record.width, record.height, record.water_percent, record.pollution
            );
        }
    }
}
