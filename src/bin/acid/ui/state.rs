//! Shared state types for UI communication
//!
//! The audio thread only writes atomics and pops `ControlMessage`s, so
//! nothing here allocates after startup.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use crate::sequencer::Step;

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Toggle play/pause
    TogglePlayback,
    /// Back to step one
    Reset,
}

/// Transport view: static pattern info plus the live position
#[derive(Clone)]
pub struct TransportInfo {
    pub bpm: f64,
    pub sample_rate: f32,
    pub steps: Vec<Step>,
    /// Current step, written by the audio thread
    pub step: Arc<AtomicUsize>,
    /// Written by the audio thread
    pub playing: Arc<AtomicBool>,
}

impl TransportInfo {
    pub fn current_step(&self) -> usize {
        self.step.load(Ordering::Relaxed)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }
}
