// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Produces the interleaved sample blocks fed to the output stream.

/// The format of the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48_000,
        }
    }
}

/// Length of one mixed block.
const BLOCK_MILLIS: u32 = 10;

/// Mixes the active voices into fixed-length blocks.
///
/// No voices are ever active in the bridge, so every block is silence; the mixer
/// exists so the stream is kept fed at the device's rate.
#[derive(Debug)]
pub struct Mixer {
    format: StreamFormat,
    block_frames: usize,
    blocks_mixed: u64,
}

impl Mixer {
    /// Creates a mixer for `format`.
    pub fn new(format: StreamFormat) -> Self {
        let block_frames = (format.sample_rate * BLOCK_MILLIS / 1000).max(1) as usize;
        Self {
            format,
            block_frames,
            blocks_mixed: 0,
        }
    }

    /// Mixes the next block of interleaved samples.
    pub fn mix(&mut self) -> Vec<f32> {
        self.blocks_mixed += 1;
        vec![0.0; self.block_len()]
    }

    /// Number of samples (frames times channels) in one block.
    pub fn block_len(&self) -> usize {
        self.block_frames * usize::from(self.format.channels.max(1))
    }

    /// The stream format.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Number of blocks mixed so far.
    pub fn blocks_mixed(&self) -> u64 {
        self.blocks_mixed
    }
}
