//! Acid - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use super::sequencer::{Sequencer, Step};
use super::ui::{state::ControlMessage, state::TransportInfo, UiApp};

use saavy_acid::{
    io::{BlockBuffer, OutputSink},
    synth::factory::{register_acid, AudioUnit, MachineRegistry, ACID_NAME},
    VoiceConfig, BLOCK_SIZE,
};

/// Samples kept in flight for the oscilloscope
const SCOPE_CAPACITY: usize = 8192;
const CONTROL_CAPACITY: usize = 64;

/// Main application builder
pub struct Acid {
    bpm: f64,
    pattern: Vec<Step>,
    config: VoiceConfig,
}

impl Acid {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            pattern: vec![Step::note(0); 16],
            config: VoiceConfig::default(),
        }
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Steps played in a loop, one per 16th note
    pub fn pattern(mut self, steps: Vec<Step>) -> Self {
        self.pattern = steps;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        info!("output: {} Hz, {} channels", sample_rate, channels);

        let mut registry = MachineRegistry::new();
        register_acid(&mut registry);
        let config = self.config.sample_rate(sample_rate);
        let parts = registry
            .create(ACID_NAME, &config)
            .ok_or_else(|| eyre!("machine '{}' is not registered", ACID_NAME))?;

        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_CAPACITY);

        let transport = TransportInfo {
            bpm: self.bpm,
            sample_rate,
            steps: self.pattern.clone(),
            step: Arc::new(AtomicUsize::new(0)),
            playing: Arc::new(AtomicBool::new(true)),
        };

        let mut audio = AudioState {
            voice: parts.voice,
            sequencer: Sequencer::new(self.bpm, sample_rate as f64, self.pattern),
            block: BlockBuffer::new(),
            cursor: 0,
            scope: scope_tx,
            control_rx,
            step: transport.step.clone(),
            playing: transport.playing.clone(),
        };

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| audio.fill(data, channels),
            |err| error!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let mut ui = UiApp::new(scope_rx, control_tx, parts.display, parts.params, transport);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for Acid {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the audio callback owns
struct AudioState {
    voice: Box<dyn AudioUnit>,
    sequencer: Sequencer,
    block: BlockBuffer,
    /// Next unread sample in `block`
    cursor: usize,
    scope: Producer<f32>,
    control_rx: Consumer<ControlMessage>,
    step: Arc<AtomicUsize>,
    playing: Arc<AtomicBool>,
}

impl AudioState {
    /// Fill an interleaved device buffer, rendering voice blocks as needed.
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        while let Ok(message) = self.control_rx.pop() {
            match message {
                ControlMessage::TogglePlayback => self.sequencer.toggle(),
                ControlMessage::Reset => self.sequencer.reset(),
            }
        }

        for frame in data.chunks_mut(channels) {
            if self.cursor >= self.block.len() {
                let control = self.sequencer.next_frame(BLOCK_SIZE);
                self.voice.render(&control, &mut self.block);
                OutputSink::push(&mut self.scope, self.block.as_slice());
                self.cursor = 0;
            }
            let sample = self.block.as_slice()[self.cursor];
            self.cursor += 1;
            frame.fill(sample);
        }

        self.step.store(self.sequencer.step(), Ordering::Relaxed);
        self.playing
            .store(self.sequencer.is_playing(), Ordering::Relaxed);
    }
}
