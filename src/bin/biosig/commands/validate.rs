use serde::Serialize;

use biosig_rs::{estimate_sampling_rate, load_csv_with, LoaderOptions};

use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    valid: bool,
    samples: Option<usize>,
    duration_secs: Option<f64>,
    estimated_rate_hz: Option<u32>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let options = LoaderOptions {
        skip_rows: args.skip_rows,
        has_header: !args.no_header,
    };

    let (result, exit_code) = match load_csv_with(&args.file, &options) {
        Ok(series) => {
            let estimated = estimate_sampling_rate(&series.timestamps()).ok();
            (
                ValidateOutput {
                    file: args.file.clone(),
                    valid: true,
                    samples: Some(series.len()),
                    duration_secs: Some(series.duration_secs()),
                    estimated_rate_hz: estimated,
                    error: None,
                },
                exit_codes::SUCCESS,
            )
        }
        Err(e) => (
            ValidateOutput {
                file: args.file.clone(),
                valid: false,
                samples: None,
                duration_secs: None,
                estimated_rate_hz: None,
                error: Some(e.to_string()),
            },
            exit_codes::INPUT_ERROR,
        ),
    };

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::PROCESSING_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::PROCESSING_ERROR;
            }
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' is valid ({} samples, {:.2} s{})",
            args.file,
            result.samples.unwrap_or(0),
            result.duration_secs.unwrap_or(0.0),
            result
                .estimated_rate_hz
                .map(|fs| format!(", ~{} Hz", fs))
                .unwrap_or_default()
        );
    }

    exit_code
}
