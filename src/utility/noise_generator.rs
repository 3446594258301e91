// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Gaussian Noise Generator
//!
//! Deterministic source of Gaussian white noise used to build synthetic sensor
//! signals for tests, benchmarks and the `noise_generator` tool.
//!
//! ## Features
//!
//! * Fast XORShift pseudo-random number generation
//! * Box-Muller transform for Gaussian distribution
//! * Noisy sinusoid helper to emulate a slowly moving inertial axis
//!
//! ## Examples
//!
//! ```rust
//! use rust_filters::utility::noise_generator::NoiseGenerator;
//!
//! let mut generator = NoiseGenerator::new(42);
//!
//! // 256 samples of noise with a standard deviation of 0.5
//! let noise = generator.generate(256, 0.5);
//! assert_eq!(noise.len(), 256);
//!
//! // A sinusoid with a period of 64 samples buried in noise
//! let signal = generator.noisy_sine(256, 64.0, 1.0, 0.1);
//! assert_eq!(signal.len(), 256);
//! ```

use std::time::SystemTime;

/// Replacement seed, XORShift never leaves the all-zero state
const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// Random number generator using the XORShift algorithm
///
/// Two generators built from the same seed produce the same sequence. It is
/// not suitable for cryptographic purposes.
///
/// # Examples
///
/// ```
/// use rust_filters::utility::noise_generator::NoiseGenerator;
///
/// let mut a = NoiseGenerator::new(12345);
/// let mut b = NoiseGenerator::new(12345);
/// assert_eq!(a.random_gaussian(), b.random_gaussian());
/// ```
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    /// Internal state of the XORShift random number generator
    rng_state: u32,
}

impl NoiseGenerator {
    /// Creates a new noise generator with a given seed
    ///
    /// # Arguments
    ///
    /// * `seed` - Initial generator state (zero is replaced by a fixed non-zero seed)
    pub fn new(seed: u32) -> Self {
        let rng_state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { rng_state }
    }

    /// Creates a new noise generator seeded from the current system time
    ///
    /// A clock set before the Unix epoch falls back to the fixed non-zero seed.
    pub fn new_from_system_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as u32)
            .unwrap_or(0);
        Self::new(seed)
    }

    /// Generates a random floating-point number between -1.0 and 1.0
    pub fn random_float(&mut self) -> f64 {
        // XOR Shift algorithm for pseudo-random numbers
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 17;
        self.rng_state ^= self.rng_state << 5;

        (self.rng_state as f64 / u32::MAX as f64) * 2.0 - 1.0
    }

    /// Generates a random value from a standard Gaussian (normal) distribution
    ///
    /// # Mathematical Background
    ///
    /// The Box-Muller transform converts uniform random variables to normally
    /// distributed random variables using the formula:
    /// ```text
    /// z = sqrt(-2 * ln(u1)) * cos(2 * π * u2)
    /// ```
    /// where u1 and u2 are uniform random variables in the range (0,1).
    pub fn random_gaussian(&mut self) -> f64 {
        let u1 = (self.random_float() + 1.0) / 2.0;
        let u2 = (self.random_float() + 1.0) / 2.0;

        // Avoid ln(0)
        let u1 = if u1 < 0.0001 { 0.0001 } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Generates `num_samples` of Gaussian white noise scaled by `amplitude`
    ///
    /// # Arguments
    ///
    /// * `num_samples` - The number of samples to generate
    /// * `amplitude` - Standard deviation of the generated noise
    pub fn generate(&mut self, num_samples: usize, amplitude: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|_| self.random_gaussian() * amplitude)
            .collect()
    }

    /// Generates a sinusoid corrupted by additive Gaussian noise
    ///
    /// # Arguments
    ///
    /// * `num_samples` - The number of samples to generate
    /// * `period` - Period of the sinusoid, in samples
    /// * `amplitude` - Peak amplitude of the sinusoid
    /// * `noise_amplitude` - Standard deviation of the additive noise
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_filters::utility::noise_generator::NoiseGenerator;
    ///
    /// let mut generator = NoiseGenerator::new(7);
    /// let clean = generator.noisy_sine(8, 8.0, 2.0, 0.0);
    /// assert!((clean[2] - 2.0).abs() < 1e-12);
    /// ```
    pub fn noisy_sine(
        &mut self,
        num_samples: usize,
        period: f64,
        amplitude: f64,
        noise_amplitude: f64,
    ) -> Vec<f64> {
        let omega = if period != 0.0 {
            2.0 * std::f64::consts::PI / period
        } else {
            0.0
        };

        (0..num_samples)
            .map(|i| amplitude * (omega * i as f64).sin() + self.random_gaussian() * noise_amplitude)
            .collect()
    }
}
