// Purpose: the monophonic acid voice and how a host registers it
// Sits above the engine: resolves pitch, articulates notes, renders blocks

pub mod factory;
pub mod gate;
pub mod message;
pub mod params;
pub mod pitch;
pub mod voice;
