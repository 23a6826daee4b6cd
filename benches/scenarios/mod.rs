//! Real-world scenario benchmarks.
//!
//! The full voice as a host drives it: control frame in, one block out.

mod voice;

pub use voice::bench_voice;
