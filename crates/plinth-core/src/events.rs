//! Sample-accurate events delivered with a process block.

use crate::types::{ParameterId, ParameterValue};

/// An event at a sample position within the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Offset from the start of the block, in samples.
    pub sample_offset: u32,
    /// Event payload.
    pub body: EventBody,
}

/// Event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventBody {
    /// Note on. Velocity is 0.0-1.0.
    NoteOn {
        /// MIDI channel (0-15).
        channel: u8,
        /// MIDI note number (0-127).
        pitch: u8,
        /// Velocity (0.0-1.0).
        velocity: f32,
    },
    /// Note off.
    NoteOff {
        /// MIDI channel (0-15).
        channel: u8,
        /// MIDI note number (0-127).
        pitch: u8,
        /// Release velocity (0.0-1.0).
        velocity: f32,
    },
    /// MIDI control change.
    ControlChange {
        /// MIDI channel (0-15).
        channel: u8,
        /// Controller number (0-127).
        controller: u8,
        /// Value (0.0-1.0).
        value: f32,
    },
    /// Host automation of a parameter, as a normalized value.
    ParameterChange {
        /// Parameter id.
        id: ParameterId,
        /// Normalized value.
        value: ParameterValue,
    },
}

impl Event {
    /// Parameter change at `sample_offset`.
    pub const fn parameter_change(sample_offset: u32, id: ParameterId, value: ParameterValue) -> Self {
        Self {
            sample_offset,
            body: EventBody::ParameterChange { id, value },
        }
    }

    /// Note on at `sample_offset`.
    pub const fn note_on(sample_offset: u32, channel: u8, pitch: u8, velocity: f32) -> Self {
        Self {
            sample_offset,
            body: EventBody::NoteOn {
                channel,
                pitch,
                velocity,
            },
        }
    }

    /// Note off at `sample_offset`.
    pub const fn note_off(sample_offset: u32, channel: u8, pitch: u8, velocity: f32) -> Self {
        Self {
            sample_offset,
            body: EventBody::NoteOff {
                channel,
                pitch,
                velocity,
            },
        }
    }

    /// Whether this event is MIDI (notes or controllers).
    pub const fn is_midi(&self) -> bool {
        !matches!(self.body, EventBody::ParameterChange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let e = Event::parameter_change(16, 7, 0.5);
        assert_eq!(e.sample_offset, 16);
        assert_eq!(e.body, EventBody::ParameterChange { id: 7, value: 0.5 });
        assert!(!e.is_midi());
        assert!(Event::note_on(0, 0, 60, 1.0).is_midi());
        assert!(Event::note_off(3, 1, 60, 0.0).is_midi());
    }
}
