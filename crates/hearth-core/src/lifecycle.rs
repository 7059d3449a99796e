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

//! The foreground/background state machine.
//!
//! Visibility only changes on explicit [`LifecycleSignal::Foreground`] and
//! [`LifecycleSignal::Background`] signals. Resume and pause are forwarded without
//! touching it, and the bridge never infers visibility from anything else.

use crate::dispatch::LifecycleSink;
use crate::state::BridgeState;

/// A lifecycle transition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSignal {
    /// The application became visible.
    Foreground,
    /// The application is no longer visible.
    Background,
    /// The application resumed.
    Resume,
    /// The application paused.
    Pause,
    /// The application is terminating.
    Shutdown,
}

/// Applies lifecycle signals to the [`BridgeState`] and forwards them to a sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct LifecycleController;

impl LifecycleController {
    /// Applies `signal`.
    pub fn apply<S: LifecycleSink + ?Sized>(
        state: &mut BridgeState,
        sink: &mut S,
        signal: LifecycleSignal,
    ) {
        match signal {
            LifecycleSignal::Foreground => Self::foreground(state, sink),
            LifecycleSignal::Background => Self::background(state, sink),
            LifecycleSignal::Resume => Self::resume(sink),
            LifecycleSignal::Pause => Self::pause(sink),
            LifecycleSignal::Shutdown => Self::shutdown(state, sink),
        }
    }

    /// Marks the bridge visible and notifies the sink.
    pub fn foreground<S: LifecycleSink + ?Sized>(state: &mut BridgeState, sink: &mut S) {
        log::info!("Lifecycle: foreground");
        state.set_visible(true);
        sink.foreground();
    }

    /// Marks the bridge hidden and notifies the sink.
    pub fn background<S: LifecycleSink + ?Sized>(state: &mut BridgeState, sink: &mut S) {
        log::info!("Lifecycle: background");
        state.set_visible(false);
        sink.background();
    }

    /// Forwards a resume notification.
    pub fn resume<S: LifecycleSink + ?Sized>(sink: &mut S) {
        log::info!("Lifecycle: resume");
        sink.resume();
    }

    /// Forwards a pause notification.
    pub fn pause<S: LifecycleSink + ?Sized>(sink: &mut S) {
        log::info!("Lifecycle: pause");
        sink.pause();
    }

    /// Forwards the shutdown notification. Only the first one reaches the sink.
    pub fn shutdown<S: LifecycleSink + ?Sized>(state: &mut BridgeState, sink: &mut S) {
        if state.is_shut_down() {
            log::debug!("Lifecycle: shutdown already delivered, ignoring");
            return;
        }
        log::info!("Lifecycle: shutdown");
        state.mark_shut_down();
        sink.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingTarget};

    #[test]
    fn starts_visible() {
        assert!(BridgeState::new().is_visible());
    }

    #[test]
    fn background_and_foreground_toggle_visibility() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();

        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Background);
        assert!(!state.is_visible());

        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Foreground);
        assert!(state.is_visible());

        assert_eq!(target.calls, vec![Call::Background, Call::Foreground]);
    }

    #[test]
    fn resume_and_pause_do_not_touch_visibility() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();

        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Pause);
        assert!(state.is_visible());

        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Background);
        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Resume);
        assert!(!state.is_visible());

        assert_eq!(
            target.calls,
            vec![Call::Pause, Call::Background, Call::Resume]
        );
    }

    #[test]
    fn repeated_signals_are_idempotent_on_state() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();

        for _ in 0..3 {
            LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Background);
        }
        assert!(!state.is_visible());
        assert_eq!(target.calls.len(), 3);
    }

    #[test]
    fn shutdown_is_forwarded_once() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();

        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Shutdown);
        LifecycleController::apply(&mut state, &mut target, LifecycleSignal::Shutdown);

        assert!(state.is_shut_down());
        // Shutdown is advisory: visibility is left as it was.
        assert!(state.is_visible());
        assert_eq!(target.calls, vec![Call::Shutdown]);
    }
}
