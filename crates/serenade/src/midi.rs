//! Standard MIDI File assembly via midly.

use std::path::Path;

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tracing::{debug, info};

use crate::chord::ChordSource;
use crate::progression::{ChordSpec, DEFAULT_DURATION};
use crate::render::{ChordRenderer, EventBuffer, NoteEvent};
use crate::Result;

/// Parameters for MIDI generation.
#[derive(Debug, Clone)]
pub struct MidiParams {
    /// Ticks per quarter note.
    pub ticks_per_beat: u16,
    /// Note velocity (1-127).
    pub velocity: u8,
    /// GM program number (0 = acoustic grand piano).
    pub program: u8,
    /// MIDI channel (0-15).
    pub channel: u8,
}

impl Default for MidiParams {
    fn default() -> Self {
        MidiParams {
            ticks_per_beat: 480,
            velocity: 64,
            program: 0,
            channel: 0,
        }
    }
}

/// Render a progression to SMF format 0 bytes.
///
/// Each chord is resolved through `source`, laid out by `renderer`, and
/// the whole sequence is delta-encoded into a single track behind a tempo
/// and program-change preamble.
pub fn progression_to_midi(
    specs: &[ChordSpec],
    source: &dyn ChordSource,
    renderer: &dyn ChordRenderer,
    params: &MidiParams,
) -> Result<Vec<u8>> {
    let mut buffer = EventBuffer::new();

    for spec in specs {
        let notes = source.notes(spec.symbol())?;
        if notes.is_empty() {
            continue;
        }
        renderer.render(
            &notes,
            spec.duration_or(DEFAULT_DURATION),
            params.velocity,
            &mut buffer,
        );
    }

    debug!(
        chords = specs.len(),
        events = buffer.len(),
        "rendered progression"
    );

    encode(buffer, params)
}

/// Render a progression and write it to a MIDI file.
pub fn write_midi(
    path: &Path,
    specs: &[ChordSpec],
    source: &dyn ChordSource,
    renderer: &dyn ChordRenderer,
    params: &MidiParams,
) -> Result<()> {
    let bytes = progression_to_midi(specs, source, renderer, params)?;
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), "wrote MIDI file");
    Ok(())
}

fn encode(buffer: EventBuffer, params: &MidiParams) -> Result<Vec<u8>> {
    let mut track: Vec<TrackEvent> = Vec::new();

    // Default 120 BPM tempo
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(500_000.into())),
    });
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Midi {
            channel: params.channel.into(),
            message: MidiMessage::ProgramChange {
                program: params.program.into(),
            },
        },
    });

    let mut last_tick = 0u64;
    for (tick, event) in buffer.into_sorted() {
        let delta = (tick - last_tick) as u32;
        last_tick = tick;

        let message = match event {
            NoteEvent::On { key, velocity } => MidiMessage::NoteOn {
                key: key.into(),
                vel: velocity.into(),
            },
            NoteEvent::Off { key } => MidiMessage::NoteOff {
                key: key.into(),
                vel: 0.into(),
            },
        };

        track.push(TrackEvent {
            delta: delta.into(),
            kind: TrackEventKind::Midi {
                channel: params.channel.into(),
                message,
            },
        });
    }

    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header::new(
            Format::SingleTrack,
            Timing::Metrical(params.ticks_per_beat.into()),
        ),
        tracks: vec![track],
    };

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes)?;
    Ok(bytes)
}
