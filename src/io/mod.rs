// Purpose - output sinks, pitch conversions

pub mod converter;

#[cfg(feature = "rtrb")]
use rtrb::Producer;

use crate::BLOCK_SIZE;

/// Destination for rendered blocks.
///
/// Called from the audio thread once per block; implementations must not
/// block. A sink that runs out of room drops samples rather than waiting.
pub trait OutputSink {
    fn push(&mut self, block: &[f32]);
}

/// Offline rendering: collect everything.
impl OutputSink for Vec<f32> {
    fn push(&mut self, block: &[f32]) {
        self.extend_from_slice(block);
    }
}

/// Realtime hand-off to another thread (scope, recorder).
#[cfg(feature = "rtrb")]
impl OutputSink for Producer<f32> {
    fn push(&mut self, block: &[f32]) {
        for &sample in block {
            if Producer::push(self, sample).is_err() {
                break;
            }
        }
    }
}

/// Holds the most recent block; for hosts that pull audio at their own pace.
#[derive(Debug, Clone)]
pub struct BlockBuffer {
    samples: [f32; BLOCK_SIZE],
    len: usize,
}

impl BlockBuffer {
    pub fn new() -> Self {
        Self {
            samples: [0.0; BLOCK_SIZE],
            len: 0,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for BlockBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for BlockBuffer {
    fn push(&mut self, block: &[f32]) {
        let len = block.len().min(BLOCK_SIZE);
        self.samples[..len].copy_from_slice(&block[..len]);
        self.len = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_appends() {
        let mut sink: Vec<f32> = Vec::new();
        OutputSink::push(&mut sink, &[1.0, 2.0]);
        OutputSink::push(&mut sink, &[3.0]);
        assert_eq!(sink, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn block_buffer_keeps_latest() {
        let mut sink = BlockBuffer::new();
        assert!(sink.is_empty());
        sink.push(&[0.5; BLOCK_SIZE]);
        sink.push(&[0.25; 4]);
        assert_eq!(sink.as_slice(), &[0.25; 4]);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_drops_overflow() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<f32>::new(3);
        OutputSink::push(&mut tx, &[1.0, 2.0, 3.0, 4.0]);

        let mut received = Vec::new();
        while let Ok(sample) = rx.pop() {
            received.push(sample);
        }
        assert_eq!(received, vec![1.0, 2.0, 3.0]);
    }
}
