use biosig_rs::{condition, load_csv_with, LoaderOptions, SignalType};

use crate::cli::ConditionArgs;
use crate::exit_codes;
use crate::output;

pub fn execute(args: ConditionArgs) -> i32 {
    let signal_type: SignalType = match args.signal_type.parse() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let options = LoaderOptions {
        skip_rows: args.skip_rows,
        has_header: !args.no_header,
    };

    let series = match load_csv_with(&args.file, &options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if !args.quiet {
        eprintln!(
            "Conditioning {} ({} samples, {:.2} s) as {}...",
            args.file,
            series.len(),
            series.duration_secs(),
            signal_type
        );
    }

    let result = match condition(&series, signal_type) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Conditioning failed: {}", e);
            return exit_codes::PROCESSING_ERROR;
        }
    };

    if !args.quiet {
        eprintln!("Estimated sampling rate: {} Hz", result.sampling_rate_hz);
    }

    if let Some(ref csv_path) = args.csv {
        if let Err(e) = output::write_filtered_csv(csv_path, &series, &result) {
            eprintln!("Error: {}", e);
            return exit_codes::PROCESSING_ERROR;
        }
        if !args.quiet {
            eprintln!("Filtered signal written to {}", csv_path);
        }
    }

    match output::to_json(&result, args.compact) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::PROCESSING_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            exit_codes::PROCESSING_ERROR
        }
    }
}
