use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use biosig_rs::{condition, load_csv_with, LoaderOptions, Result, SignalType, TimeSeries};

use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::output;

pub fn execute(args: BatchArgs) -> i32 {
    let signal_type: SignalType = match args.signal_type.parse() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let files = match resolve_files(&args.pattern) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No files match pattern '{}'", args.pattern);
        return exit_codes::INPUT_ERROR;
    }

    // Dry-run mode: print file list and exit
    if args.dry_run {
        for f in &files {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} file(s)", files.len());
        }
        return exit_codes::SUCCESS;
    }

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "Error: Failed to create output directory '{}': {}",
            args.output_dir, e
        );
        return exit_codes::INPUT_ERROR;
    }

    let options = LoaderOptions {
        skip_rows: args.skip_rows,
        has_header: !args.no_header,
    };

    let total = files.len();
    let start_time = Instant::now();

    // Each recording's run is independent, so files fan out across threads.
    let outcomes: Vec<(String, std::result::Result<u32, String>)> = files
        .par_iter()
        .map(|file| {
            let outcome = condition_file(file, &options, signal_type, &args.output_dir);
            (file.clone(), outcome)
        })
        .collect();

    let mut failed = 0usize;
    for (file, outcome) in &outcomes {
        match outcome {
            Ok(fs) => {
                if !args.quiet {
                    eprintln!("  {} ({} Hz)", file, fs);
                }
            }
            Err(msg) => {
                eprintln!("  {}: {}", file, msg);
                failed += 1;
            }
        }
    }

    if !args.quiet {
        eprintln!(
            "Conditioned {}/{} file(s) in {:.2}s",
            total - failed,
            total,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed > 0 {
        exit_codes::PROCESSING_ERROR
    } else {
        exit_codes::SUCCESS
    }
}

fn resolve_files(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let paths = glob::glob(pattern).map_err(|e| format!("Invalid glob pattern: {}", e))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| format!("Failed to read glob entry: {}", e))?;
        if path.is_file() {
            files.push(path.display().to_string());
        }
    }
    files.sort();
    Ok(files)
}

fn condition_file(
    file: &str,
    options: &LoaderOptions,
    signal_type: SignalType,
    output_dir: &str,
) -> std::result::Result<u32, String> {
    let run = || -> Result<(TimeSeries, biosig_rs::ConditioningResult)> {
        let series = load_csv_with(file, options)?;
        let result = condition(&series, signal_type)?;
        Ok((series, result))
    };

    let (series, result) = run().map_err(|e| e.to_string())?;

    let stem = Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recording");
    let out_path = Path::new(output_dir).join(format!("{}_filtered.csv", stem));

    output::write_filtered_csv(&out_path.display().to_string(), &series, &result)?;

    Ok(result.sampling_rate_hz)
}
