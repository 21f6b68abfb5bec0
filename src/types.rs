use crate::filters::DenoiseConfig;
use serde::{Deserialize, Serialize};

/// Synthetic signal generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Length of the generated signal in seconds
    pub duration_secs: f64,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Pulse fundamental frequency in Hz (75 bpm = 1.25 Hz)
    #[serde(default = "default_heart_rate_hz")]
    pub heart_rate_hz: f64,
}

fn default_heart_rate_hz() -> f64 {
    1.25
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            duration_secs: 10.0,
            sample_rate: 1000.0,
            heart_rate_hz: 1.25,
        }
    }
}

/// Generated signal pair with its time axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSignal {
    /// Sample instants in seconds (`t[i] = i / sample_rate`)
    pub time: Vec<f64>,
    /// Noise-free reference waveform
    pub clean: Vec<f64>,
    /// Reference plus all noise components
    pub noisy: Vec<f64>,
}

/// One-sided magnitude spectrum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spectrum {
    /// Frequency bins in Hz, ascending from 0
    pub frequencies: Vec<f64>,
    /// Magnitude per bin, normalized so a bin-aligned unit sinusoid reads ~1
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Magnitude of the bin closest to `freq_hz`, or None for an
    /// out-of-range frequency.
    pub fn magnitude_at(&self, freq_hz: f64) -> Option<f64> {
        if self.frequencies.is_empty() || freq_hz < 0.0 {
            return None;
        }
        let step = match self.frequencies.get(1) {
            Some(&f1) => f1 - self.frequencies[0],
            None => return Some(self.magnitudes[0]),
        };
        let idx = (freq_hz / step).round() as usize;
        self.magnitudes.get(idx).copied()
    }
}

/// Signal-to-noise quality metrics, all in decibels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityReport {
    pub snr_before_db: f64,
    pub snr_after_db: f64,
    pub improvement_db: f64,
}

/// Complete denoising request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenoiseRequest {
    pub signal: SignalConfig,
    #[serde(default)]
    pub denoise: DenoiseConfig,
    /// Seed for the broadband noise source; omit for a fresh OS-seeded run
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Denoising analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenoiseResult {
    pub id: String,
    pub signal_config: SignalConfig,
    pub denoise_config: DenoiseConfig,
    pub time: Vec<f64>,
    pub clean: Vec<f64>,
    pub noisy: Vec<f64>,
    pub filtered: Vec<f64>,
    pub noisy_spectrum: Spectrum,
    pub filtered_spectrum: Spectrum,
    pub quality: QualityReport,
    pub created_at: String,
}

impl DenoiseResult {
    pub fn new(
        id: String,
        signal_config: SignalConfig,
        denoise_config: DenoiseConfig,
        generated: GeneratedSignal,
        filtered: Vec<f64>,
        noisy_spectrum: Spectrum,
        filtered_spectrum: Spectrum,
        quality: QualityReport,
    ) -> Self {
        Self {
            id,
            signal_config,
            denoise_config,
            time: generated.time,
            clean: generated.clean,
            noisy: generated.noisy,
            filtered,
            noisy_spectrum,
            filtered_spectrum,
            quality,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
