// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the inertial sensor filtering driver
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use rust_filters::acquisition::{format_output_line, LineRecordReader, RecordSource};
use rust_filters::config::{self, Config};
use rust_filters::processing::SensorPipeline;
use rust_filters::FilterError;

/// Filters gyroscope/accelerometer recordings channel by channel
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input record file (timestamp,wx,wy,wz,ax,ay,az per line), stdin if omitted
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file for the filtered sentences
    #[arg(long, value_name = "FILE", default_value = "output.txt")]
    output: PathBuf,

    /// Path to configuration file (YAML format)
    #[arg(long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Number of samples kept per channel
    #[arg(long)]
    history_length: Option<usize>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    let mut config = Config::from_file(&args.config)?;
    config.apply_args(args.history_length);
    config::validate_specific_rules(&config)
        .context("Invalid command line override of the configuration")?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Reading records from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading records from standard input");
            Box::new(io::stdin().lock())
        }
    };

    let output = File::create(&args.output)
        .with_context(|| format!("Cannot open {} for writing", args.output.display()))?;
    let mut writer = BufWriter::new(output);

    let (written, skipped) = run(&config, LineRecordReader::new(input), &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        "Data processing completed: {} lines written to {}, {} malformed lines skipped",
        written,
        args.output.display(),
        skipped
    );
    Ok(())
}

/// Filter every record of `source` and write one sentence per record
///
/// Returns the number of lines written and of malformed records skipped.
fn run<S: RecordSource, W: Write>(config: &Config, mut source: S, out: &mut W) -> Result<(u64, u64)> {
    let mut pipeline = SensorPipeline::from_config(config);
    if let Some(chain) = pipeline.chain(0) {
        debug!(
            "Processing with history length {} and chain {}",
            config.history_length, chain
        );
    }

    let mut skipped = 0;
    while let Some(result) = source.next_record() {
        let record = match result {
            Ok(record) => record,
            Err(err @ FilterError::InvalidRecord { .. }) => {
                warn!("Skipping malformed record: {}", err);
                skipped += 1;
                continue;
            }
            Err(err) => return Err(err).context("Failed to read input records"),
        };

        let values = pipeline.process(&record);
        writeln!(
            out,
            "{}",
            format_output_line(&config.sentence, &values, record.timestamp)
        )
        .context("Failed to write output line")?;
    }

    Ok((pipeline.processed(), skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_skips_malformed_lines() {
        let config = Config::from_yaml_str(
            "history_length: 4\nsentence: \"$TEST\"\npipeline:\n  - type: moving_average\n    window_size: 2\n",
        )
        .unwrap();
        let input = "1000,1,1,1,1,1,1\nnot,a,record\n2000,3,3,3,3,3,3\n";
        let mut out = Vec::new();

        let (written, skipped) =
            run(&config, LineRecordReader::new(input.as_bytes()), &mut out).unwrap();

        assert_eq!((written, skipped), (2, 1));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "$TEST,1,1,1,1,1,1,1\n$TEST,2,2,2,2,2,2,2\n"
        );
    }

    #[test]
    fn test_run_skips_lines_with_invalid_utf8() {
        let config = Config::from_yaml_str(
            "sentence: \"$TEST\"\npipeline:\n  - type: moving_average\n    window_size: 1\n",
        )
        .unwrap();
        let input: &[u8] = b"1000,1,1,1,1,1,1\n2000,\xff\xfe,1,1,1,1,1\n3000,2,2,2,2,2,2\n";
        let mut out = Vec::new();

        let (written, skipped) = run(&config, LineRecordReader::new(input), &mut out).unwrap();

        assert_eq!((written, skipped), (2, 1));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "$TEST,1,1,1,1,1,1,1\n$TEST,2,2,2,2,2,2,3\n"
        );
    }
}
