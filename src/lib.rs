pub mod config;
pub mod display; // Frame buffer, screensaver and parameter page
pub mod dsp;
pub mod engine; // Synthesis engine capability + TeeBee implementation
pub mod io;
pub mod synth; // Voice, note/gate articulation, host registration

pub use config::VoiceConfig;
pub use synth::{
    message::ControlFrame,
    params::{ParamId, VoiceParams},
    voice::{AcidVoice, VoiceMonitor},
};

/// Samples rendered per voice block.
pub const BLOCK_SIZE: usize = 32;
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
