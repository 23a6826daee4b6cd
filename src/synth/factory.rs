use std::sync::Arc;

use log::info;

use crate::{
    config::VoiceConfig,
    display::VoiceDisplay,
    engine::{SynthEngine, TeeBee},
    io::OutputSink,
    synth::{
        message::ControlFrame,
        params::VoiceParams,
        pitch::Quantizer,
        voice::AcidVoice,
    },
};

/// Display name under which the acid voice registers.
pub const ACID_NAME: &str = "Acid303";

/// Host-side view of a voice: render a block, nothing else.
pub trait AudioUnit: Send {
    fn render(&mut self, frame: &ControlFrame, sink: &mut dyn OutputSink);
    fn is_degraded(&self) -> bool;
}

impl<E: SynthEngine, Q: Quantizer> AudioUnit for AcidVoice<E, Q> {
    fn render(&mut self, frame: &ControlFrame, sink: &mut dyn OutputSink) {
        AcidVoice::render(self, frame, sink);
    }

    fn is_degraded(&self) -> bool {
        AcidVoice::is_degraded(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineKind {
    Synth,
    Drum,
}

/// Everything a host needs to run one machine.
pub struct MachineParts {
    pub voice: Box<dyn AudioUnit>,
    pub display: VoiceDisplay,
    pub params: Arc<VoiceParams>,
}

/// Registry entry: how to build a machine by name.
#[derive(Clone, Copy)]
pub struct MachineDescriptor {
    pub kind: MachineKind,
    pub name: &'static str,
    pub create: fn(&VoiceConfig) -> MachineParts,
}

/// Machines available to the host, in registration order.
#[derive(Default)]
pub struct MachineRegistry {
    machines: Vec<MachineDescriptor>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a machine. A later registration with the same name replaces the earlier one.
    pub fn register(&mut self, descriptor: MachineDescriptor) {
        if let Some(existing) = self.machines.iter_mut().find(|m| m.name == descriptor.name) {
            *existing = descriptor;
        } else {
            self.machines.push(descriptor);
        }
        info!("registered {:?} machine '{}'", descriptor.kind, descriptor.name);
    }

    pub fn find(&self, name: &str) -> Option<&MachineDescriptor> {
        self.machines.iter().find(|m| m.name == name)
    }

    pub fn create(&self, name: &str, config: &VoiceConfig) -> Option<MachineParts> {
        self.find(name).map(|m| (m.create)(config))
    }

    pub fn of_kind(&self, kind: MachineKind) -> impl Iterator<Item = &MachineDescriptor> {
        self.machines.iter().filter(move |m| m.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

fn create_acid(config: &VoiceConfig) -> MachineParts {
    let voice = AcidVoice::new(*config, TeeBee::new(config.sample_rate));
    let params = voice.params();
    let display = VoiceDisplay::new(voice.monitor(), params.clone());

    MachineParts {
        voice: Box::new(voice),
        display,
        params,
    }
}

/// Register the acid voice as a synth machine.
pub fn register_acid(registry: &mut MachineRegistry) {
    registry.register(MachineDescriptor {
        kind: MachineKind::Synth,
        name: ACID_NAME,
        create: create_acid,
    });
}
