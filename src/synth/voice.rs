use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};

use log::{debug, warn};

use crate::{
    config::VoiceConfig,
    dsp::{
        curve::{cutoff_hz, decay_ms},
        wavetable::{Heap, TableAllocator, WaveTable, WaveTableBuilder},
    },
    engine::SynthEngine,
    io::OutputSink,
    synth::{
        gate::{Articulation, NoteGate},
        message::ControlFrame,
        params::VoiceParams,
        pitch::{resolve_note, Quantizer, Scale},
    },
    BLOCK_SIZE,
};

#[derive(Debug, Default)]
struct MonitorState {
    gate: AtomicBool,
    out_of_memory: AtomicBool,
    note: AtomicU32,
}

/// Read-only view of a voice for the display thread.
#[derive(Debug, Clone)]
pub struct VoiceMonitor {
    state: Arc<MonitorState>,
}

impl VoiceMonitor {
    /// Gate latch as of the last rendered block.
    pub fn gate_latched(&self) -> bool {
        self.state.gate.load(Ordering::Relaxed)
    }

    /// True when the wavetable could not be allocated and the voice is silent.
    pub fn out_of_memory(&self) -> bool {
        self.state.out_of_memory.load(Ordering::Relaxed)
    }

    /// Note number resolved in the last rendered block.
    pub fn note(&self) -> f32 {
        f32::from_bits(self.state.note.load(Ordering::Relaxed))
    }
}

/// One monophonic acid voice.
///
/// Owns a [`SynthEngine`] and drives it block by block from a
/// [`ControlFrame`] and the shared [`VoiceParams`]. If the wavetable
/// allocation failed at construction the voice is degraded: it renders
/// silence and never touches the engine again.
pub struct AcidVoice<E: SynthEngine, Q: Quantizer = Scale> {
    engine: E,
    quantizer: Q,
    params: Arc<VoiceParams>,
    wavetable: Option<Arc<WaveTable>>,
    gate: NoteGate,
    monitor: Arc<MonitorState>,
    block: [f32; BLOCK_SIZE],

    base_note: f32,
    octave_offset: f32,
    waveform: f32,
}

impl<E: SynthEngine> AcidVoice<E, Scale> {
    pub fn new(config: VoiceConfig, engine: E) -> Self {
        Self::with_allocator(config, engine, &Heap)
    }

    /// Build the voice, taking wavetable memory from `allocator`.
    pub fn with_allocator(
        config: VoiceConfig,
        mut engine: E,
        allocator: &impl TableAllocator,
    ) -> Self {
        engine.set_sample_rate(config.sample_rate);
        engine.set_waveform(config.waveform);
        engine.set_tuning(config.tuning);
        engine.set_amp_sustain(config.amp_sustain_db);
        engine.set_accent_attack(config.accent_attack_ms);
        engine.set_pitch_bend(0.0);
        engine.set_slide_time(config.slide_time_ms);
        engine.set_volume(config.volume_db);

        let monitor = Arc::new(MonitorState::default());

        let wavetable = match WaveTableBuilder::square_303().build(allocator) {
            Ok(table) => {
                let table = Arc::new(table);
                engine.set_wave_tables(table.clone(), table.clone());
                debug!(
                    "wavetable ready: {} levels, {} bytes",
                    crate::dsp::wavetable::NUM_LEVELS,
                    WaveTable::size_in_bytes()
                );
                Some(table)
            }
            Err(err) => {
                warn!("acid voice degraded to silence: {}", err);
                monitor.out_of_memory.store(true, Ordering::Relaxed);
                None
            }
        };

        Self {
            engine,
            quantizer: Scale::chromatic(),
            params: Arc::new(VoiceParams::new()),
            wavetable,
            gate: NoteGate::new(),
            monitor,
            block: [0.0; BLOCK_SIZE],

            base_note: config.base_note,
            octave_offset: config.octave_offset,
            waveform: config.waveform,
        }
    }
}

impl<E: SynthEngine, Q: Quantizer> AcidVoice<E, Q> {
    /// Swap the pitch quantizer.
    pub fn with_quantizer<R: Quantizer>(self, quantizer: R) -> AcidVoice<E, R> {
        AcidVoice {
            engine: self.engine,
            quantizer,
            params: self.params,
            wavetable: self.wavetable,
            gate: self.gate,
            monitor: self.monitor,
            block: self.block,
            base_note: self.base_note,
            octave_offset: self.octave_offset,
            waveform: self.waveform,
        }
    }

    /// Share an existing parameter store, e.g. one owned by a control surface.
    pub fn with_params(mut self, params: Arc<VoiceParams>) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> Arc<VoiceParams> {
        self.params.clone()
    }

    pub fn monitor(&self) -> VoiceMonitor {
        VoiceMonitor {
            state: self.monitor.clone(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.wavetable.is_none()
    }

    pub fn gate_latched(&self) -> bool {
        self.gate.is_latched()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Render one block of `BLOCK_SIZE` samples into `sink`.
    ///
    /// Returns how the note was articulated, or `None` when degraded.
    pub fn render<S: OutputSink + ?Sized>(
        &mut self,
        frame: &ControlFrame,
        sink: &mut S,
    ) -> Option<Articulation> {
        if self.wavetable.is_none() {
            self.block.fill(0.0);
            sink.push(&self.block);
            return None;
        }

        let p = self.params.snapshot();

        self.engine.set_waveform(self.waveform);
        self.engine.set_accent(p.accent);
        self.engine.set_cutoff(cutoff_hz(p.cutoff));
        self.engine.set_resonance(p.resonance);
        self.engine.set_env_mod(p.env_mod);
        self.engine.set_decay(decay_ms(p.decay));
        if p.accent > 0.0 {
            self.engine.set_accent_decay(decay_ms(p.decay));
        }

        let volts = self.quantizer.quantize(frame.cv, p.pitch);
        let note = resolve_note(self.base_note, self.octave_offset, volts);
        let articulation =
            self.gate
                .advance(frame.note_event(), note, p.accent > 0.0, &mut self.engine);

        self.monitor
            .gate
            .store(self.gate.is_latched(), Ordering::Relaxed);
        self.monitor.note.store(note.to_bits(), Ordering::Relaxed);

        for sample in self.block.iter_mut() {
            *sample = self.engine.get_sample();
        }
        sink.push(&self.block);

        Some(articulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::wavetable::Budget, engine::TeeBee, synth::params::ParamId};

    fn voice() -> AcidVoice<TeeBee> {
        let config = VoiceConfig::default();
        AcidVoice::new(config, TeeBee::new(config.sample_rate))
    }

    #[test]
    fn renders_one_block_per_call() {
        let mut voice = voice();
        let mut out = Vec::new();
        voice.render(&ControlFrame::trigger(0.0), &mut out);
        voice.render(&ControlFrame::hold(0.0), &mut out);
        assert_eq!(out.len(), 2 * BLOCK_SIZE);
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn monitor_tracks_gate_and_note() {
        let mut voice = voice();
        let monitor = voice.monitor();
        let mut out = Vec::new();

        voice.render(&ControlFrame::trigger(1.0), &mut out);
        assert!(monitor.gate_latched());
        assert_eq!(monitor.note(), 60.0);

        voice.render(&ControlFrame::release(1.0), &mut out);
        assert!(!monitor.gate_latched());
    }

    #[test]
    fn out_of_memory_renders_silence() {
        let config = VoiceConfig::default();
        let mut voice =
            AcidVoice::with_allocator(config, TeeBee::new(config.sample_rate), &Budget(0));
        assert!(voice.is_degraded());
        assert!(voice.monitor().out_of_memory());

        let mut out = Vec::new();
        let a = voice.render(&ControlFrame::trigger(0.0), &mut out);
        assert_eq!(a, None);
        assert_eq!(out.len(), BLOCK_SIZE);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(!voice.engine().is_sounding());
    }

    #[test]
    fn pitch_knob_transposes() {
        let mut voice = voice();
        voice.params().set(ParamId::Pitch, 1.0);
        let mut out = Vec::new();
        voice.render(&ControlFrame::trigger(0.0), &mut out);
        assert_eq!(voice.monitor().note(), 60.0);
    }

    #[test]
    fn quantizer_can_be_swapped() {
        let mut voice = voice().with_quantizer(Scale::MINOR);
        let mut out = Vec::new();
        // 4 semitones above C snaps down to Eb.
        voice.render(&ControlFrame::trigger(4.0 / 12.0), &mut out);
        assert_eq!(voice.monitor().note(), 51.0);
    }
}
