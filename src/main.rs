//! lsm-inspect - Inspect Zeiss LSM microscopy files.
//!
//! This binary wires the library's container reader and LZW codec to a
//! small set of subcommands. Any error exits with a failure code.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lsm_reader::{
    config::{Cli, Command, InfoConfig, LzwConfig, StripConfig, SurveyConfig},
    lzw, LsmFile,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Info(config) => run_info(config),
        Command::Strip(config) => run_strip(config),
        Command::LzwSurvey(config) => run_survey(config),
        Command::Lzw(config) => run_lzw(config),
    }
}

/// Initialize tracing to stderr. `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "lsm_reader=debug,lsm_inspect=debug"
    } else {
        "lsm_reader=warn,lsm_inspect=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    let file = match LsmFile::open_path(&config.file) {
        Ok(file) => file,
        Err(e) => {
            error!("{}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        match serde_json::to_string_pretty(file.directories()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize directories: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", file.summary());
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Strip Command
// =============================================================================

fn run_strip(config: StripConfig) -> ExitCode {
    let result = LsmFile::open_path(&config.file).and_then(|file| {
        let data = file.read_strip_data(config.directory, config.strip)?;
        if config.undo_predictor {
            data.into_samples()
        } else {
            Ok(data.bytes.to_vec())
        }
    });

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(
                directory = config.directory,
                strip = config.strip,
                "{}: {}",
                config.file.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::write(&config.output, &bytes) {
        error!("Failed to write {}: {}", config.output.display(), e);
        return ExitCode::FAILURE;
    }

    info!(
        bytes = bytes.len(),
        output = %config.output.display(),
        "Wrote strip"
    );
    ExitCode::SUCCESS
}

// =============================================================================
// LZW Commands
// =============================================================================

fn run_survey(config: SurveyConfig) -> ExitCode {
    let data = match fs::read(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let Some(survey) = lzw::survey_max_bits(&data) else {
        error!("{} is empty", config.file.display());
        return ExitCode::FAILURE;
    };

    println!("{:>8} {:>12} {:>8} {:>7}", "max_bits", "bytes", "ratio", "clears");
    for trial in &survey.trials {
        println!(
            "{:>8} {:>12} {:>7.2}% {:>7}",
            trial.max_bits, trial.compressed_len, trial.ratio, trial.clear_codes
        );
    }
    if let Some(best) = survey.best() {
        println!();
        println!(
            "Best: {} bits, {:.2}% of {} bytes",
            best.max_bits,
            best.ratio,
            data.len()
        );
    }

    ExitCode::SUCCESS
}

fn run_lzw(config: LzwConfig) -> ExitCode {
    let input = match fs::read(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let output = if config.decode {
        match lzw::decode(&input) {
            Ok(decoded) => decoded,
            Err(e) => {
                error!("{}: {}", config.file.display(), e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        lzw::encode(&input, config.max_bits)
    };

    if let Err(e) = fs::write(&config.output, &output) {
        error!("Failed to write {}: {}", config.output.display(), e);
        return ExitCode::FAILURE;
    }

    info!(
        input = input.len(),
        output = output.len(),
        decode = config.decode,
        "LZW done"
    );
    ExitCode::SUCCESS
}
