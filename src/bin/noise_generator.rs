// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Synthetic inertial record generator for testing the filtering driver
// Every channel is a sinusoid corrupted by Gaussian white noise

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

// Import the NoiseGenerator from our library
use rust_filters::acquisition::{InertialRecord, CHANNEL_COUNT};
use rust_filters::utility::noise_generator::NoiseGenerator;

/// Synthetic gyroscope/accelerometer record generator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Number of records to generate
    #[arg(short = 'n', long, default_value_t = 1000)]
    records: usize,

    /// Time between two records in milliseconds
    #[arg(short, long, default_value_t = 10.0)]
    interval: f64,

    /// Period of the sinusoid, in records
    #[arg(short, long, default_value_t = 200.0)]
    period: f64,

    /// Peak amplitude of the sinusoid
    #[arg(short, long, default_value_t = 1.0)]
    amplitude: f64,

    /// Standard deviation of the noise
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// Seed of the noise generator, system time if omitted
    #[arg(short, long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.interval <= 0.0 {
        bail!("Interval must be strictly positive");
    }
    if args.noise < 0.0 {
        bail!("Noise standard deviation must not be negative");
    }

    let mut generator = match args.seed {
        Some(seed) => NoiseGenerator::new(seed),
        None => NoiseGenerator::new_from_system_time(),
    };

    info!(
        "Generating {} records ({} ms apart) into {}",
        args.records,
        args.interval,
        args.output.display()
    );

    // Phase-shift each channel so that they do not overlap
    let channels: Vec<Vec<f64>> = (0..CHANNEL_COUNT)
        .map(|channel| {
            let shift = (channel as f64 * args.period / CHANNEL_COUNT as f64).round() as usize;
            generator
                .noisy_sine(args.records + shift, args.period, args.amplitude, args.noise)
                .split_off(shift)
        })
        .collect();

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);

    for i in 0..args.records {
        let mut record = InertialRecord {
            timestamp: i as f64 * args.interval,
            channels: [0.0; CHANNEL_COUNT],
        };
        for (value, samples) in record.channels.iter_mut().zip(&channels) {
            *value = samples[i];
        }
        writeln!(writer, "{}", record.to_line())?;
    }
    writer.flush()?;

    println!(
        "Generated {} records in {}",
        args.records,
        args.output.display()
    );

    Ok(())
}
