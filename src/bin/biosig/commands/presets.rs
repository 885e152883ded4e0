use serde::Serialize;

use biosig_rs::SignalType;

use crate::cli::PresetsArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct PresetRow {
    signal_type: String,
    lowcut_hz: f64,
    highcut_hz: f64,
    order: usize,
}

pub fn execute(args: PresetsArgs) -> i32 {
    let rows: Vec<PresetRow> = SignalType::ALL
        .iter()
        .map(|&t| {
            let preset = t.preset();
            PresetRow {
                signal_type: t.to_string(),
                lowcut_hz: preset.lowcut_hz,
                highcut_hz: preset.highcut_hz,
                order: preset.order,
            }
        })
        .collect();

    if args.json {
        match output::to_json(&rows, false) {
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
    } else {
        println!("{:<8} {:>10} {:>11} {:>6}", "SIGNAL", "LOWCUT(Hz)", "HIGHCUT(Hz)", "ORDER");
        for row in &rows {
            println!(
                "{:<8} {:>10} {:>11} {:>6}",
                row.signal_type, row.lowcut_hz, row.highcut_hz, row.order
            );
        }
        println!();
        println!("Filters are zero-phase Butterworth bandpass (forward-backward).");
    }

    exit_codes::SUCCESS
}
