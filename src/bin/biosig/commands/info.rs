use serde::Serialize;

use biosig_rs::SignalType;

use crate::cli::InfoArgs;
use crate::exit_codes;
use crate::output;

#[derive(Serialize)]
struct InfoOutput {
    cli_version: String,
    platform: String,
    arch: String,
    signal_types: Vec<String>,
}

pub fn execute(args: InfoArgs) -> i32 {
    let info = InfoOutput {
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        signal_types: SignalType::ALL.iter().map(|t| t.to_string()).collect(),
    };

    if args.json {
        match output::to_json(&info, false) {
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
        println!("biosig CLI v{}", info.cli_version);
        println!("Platform: {} ({})", info.platform, info.arch);
        println!("Signal types: {}", info.signal_types.join(", "));
    }

    exit_codes::SUCCESS
}
