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

//! Contains the `CpalAudio` subsystem and the stream-side `StreamReader`.

use crate::audio::mixer::{Mixer, StreamFormat};
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use flume::{Receiver, Sender, TrySendError};
use hearth_core::AudioSubsystem;

/// Number of mixed blocks buffered between the frame loop and the stream.
const QUEUED_BLOCKS: usize = 4;

/// An [`AudioSubsystem`] that feeds the host's default output device via CPAL.
///
/// Each `update` tops up a bounded queue of mixed blocks; the stream callback
/// drains it and plays silence when it runs dry.
pub struct CpalAudio {
    mixer: Mixer,
    sender: Option<Sender<Vec<f32>>>,
    _stream: Option<cpal::Stream>,
}

impl CpalAudio {
    /// Opens the default output device and starts the stream.
    ///
    /// A machine without an output device runs muted rather than failing.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let Some(device) = host.default_output_device() else {
            log::warn!("No default audio output device available; running muted.");
            return Ok(Self::muted());
        };
        let config = device.default_output_config()?;

        let format = StreamFormat {
            channels: config.channels(),
            sample_rate: config.sample_rate(),
        };
        let (mut audio, mut reader) = Self::detached(format);

        let audio_callback = move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
            reader.fill(output_buffer);
        };

        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {err}");
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                device.build_output_stream(&config.into(), audio_callback, error_callback, None)?
            }
            sample_format => return Err(anyhow!("Unsupported sample format: {}", sample_format)),
        };

        stream.play()?;
        log::info!(
            "Audio stream started: {} channel(s) at {} Hz",
            format.channels,
            format.sample_rate
        );

        audio._stream = Some(stream);
        Ok(audio)
    }

    /// An audio subsystem with no output stream.
    pub fn muted() -> Self {
        Self {
            mixer: Mixer::new(StreamFormat::default()),
            sender: None,
            _stream: None,
        }
    }

    /// (Internal) Creates the subsystem and the reader the stream callback will own.
    fn detached(format: StreamFormat) -> (Self, StreamReader) {
        let (sender, receiver) = flume::bounded(QUEUED_BLOCKS);
        let audio = Self {
            mixer: Mixer::new(format),
            sender: Some(sender),
            _stream: None,
        };
        (audio, StreamReader::new(receiver))
    }

    /// Whether this subsystem is connected to an output stream.
    pub fn is_muted(&self) -> bool {
        self.sender.is_none()
    }

    /// The mixer feeding the stream.
    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }
}

impl AudioSubsystem for CpalAudio {
    fn update(&mut self) -> Result<()> {
        let Some(sender) = &self.sender else {
            return Ok(());
        };

        while !sender.is_full() {
            match sender.try_send(self.mixer.mix()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => break,
                Err(TrySendError::Disconnected(_)) => {
                    return Err(anyhow!("The audio stream is no longer consuming samples"));
                }
            }
        }
        Ok(())
    }
}

/// The stream-callback side of the queue.
#[derive(Debug)]
pub struct StreamReader {
    receiver: Receiver<Vec<f32>>,
    pending: Vec<f32>,
    cursor: usize,
    underruns: u64,
}

impl StreamReader {
    fn new(receiver: Receiver<Vec<f32>>) -> Self {
        Self {
            receiver,
            pending: Vec::new(),
            cursor: 0,
            underruns: 0,
        }
    }

    /// Fills `output` from queued blocks, padding with silence on underrun.
    pub fn fill(&mut self, output: &mut [f32]) {
        let mut written = 0;
        while written < output.len() {
            if self.cursor >= self.pending.len() {
                match self.receiver.try_recv() {
                    Ok(block) => {
                        self.pending = block;
                        self.cursor = 0;
                        continue;
                    }
                    Err(_) => {
                        output[written..].fill(0.0);
                        self.underruns += 1;
                        return;
                    }
                }
            }

            let available = &self.pending[self.cursor..];
            let count = available.len().min(output.len() - written);
            output[written..written + count].copy_from_slice(&available[..count]);
            written += count;
            self.cursor += count;
        }
    }

    /// Number of callbacks that ran out of queued samples.
    pub fn underruns(&self) -> u64 {
        self.underruns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_format() -> StreamFormat {
        // 100 Hz mono: one-sample blocks.
        StreamFormat {
            channels: 1,
            sample_rate: 100,
        }
    }

    #[test]
    fn update_tops_up_the_queue() {
        let (mut audio, reader) = CpalAudio::detached(tiny_format());

        audio.update().unwrap();
        assert_eq!(reader.receiver.len(), QUEUED_BLOCKS);

        // A full queue is left alone.
        audio.update().unwrap();
        assert_eq!(audio.mixer().blocks_mixed(), QUEUED_BLOCKS as u64);
    }

    #[test]
    fn reader_spans_blocks_then_pads_with_silence() {
        let (sender, receiver) = flume::bounded(4);
        let mut reader = StreamReader::new(receiver);
        sender.send(vec![0.25, 0.5]).unwrap();
        sender.send(vec![0.75]).unwrap();

        let mut output = [1.0f32; 5];
        reader.fill(&mut output);

        assert_eq!(output, [0.25, 0.5, 0.75, 0.0, 0.0]);
        assert_eq!(reader.underruns(), 1);
    }

    #[test]
    fn reader_keeps_the_remainder_of_a_block() {
        let (sender, receiver) = flume::bounded(4);
        let mut reader = StreamReader::new(receiver);
        sender.send(vec![0.1, 0.2, 0.3]).unwrap();

        let mut first = [0.0f32; 2];
        reader.fill(&mut first);
        let mut second = [0.0f32; 1];
        reader.fill(&mut second);

        assert_eq!(first, [0.1, 0.2]);
        assert_eq!(second, [0.3]);
        assert_eq!(reader.underruns(), 0);
    }

    #[test]
    fn a_closed_stream_is_an_error() {
        let (mut audio, reader) = CpalAudio::detached(tiny_format());
        drop(reader);
        assert!(audio.update().is_err());
    }

    #[test]
    fn muted_audio_updates_without_a_stream() {
        let mut audio = CpalAudio::muted();
        assert!(audio.is_muted());
        audio.update().unwrap();
        assert_eq!(audio.mixer().blocks_mixed(), 0);
    }
}
