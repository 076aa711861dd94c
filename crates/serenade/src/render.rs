//! Chord rendering strategies.
//!
//! A [`ChordRenderer`] turns one resolved chord into timed note events.
//! Renderers append to an [`EventBuffer`] of absolute-tick events; the
//! MIDI assembler sorts and delta-encodes afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Error, Result};

/// A single note event at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    On { key: u8, velocity: u8 },
    Off { key: u8 },
}

/// Collects note events at absolute ticks. The cursor marks where the
/// next chord begins.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<(u64, NoteEvent)>,
    cursor: u64,
}

impl EventBuffer {
    pub fn new() -> Self {
        EventBuffer::default()
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn advance(&mut self, ticks: u64) {
        self.cursor += ticks;
    }

    pub fn push_on(&mut self, tick: u64, key: u8, velocity: u8) {
        self.events.push((tick, NoteEvent::On { key, velocity }));
    }

    pub fn push_off(&mut self, tick: u64, key: u8) {
        self.events.push((tick, NoteEvent::Off { key }));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events sorted by tick, note-offs before note-ons at equal ticks so
    /// repeated pitches re-strike cleanly.
    pub fn into_sorted(self) -> Vec<(u64, NoteEvent)> {
        let mut events = self.events;
        events.sort_by(|a, b| {
            a.0.cmp(&b.0).then_with(|| {
                let a_off = matches!(a.1, NoteEvent::Off { .. });
                let b_off = matches!(b.1, NoteEvent::Off { .. });
                b_off.cmp(&a_off)
            })
        });
        events
    }
}

/// Lays one chord out in time, starting at the buffer cursor and
/// advancing it by the chord's duration.
pub trait ChordRenderer: Send + Sync {
    fn render(&self, notes: &[u8], duration: u32, velocity: u8, events: &mut EventBuffer);
}

/// All chord tones struck together and held for the full duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockChord;

impl ChordRenderer for BlockChord {
    fn render(&self, notes: &[u8], duration: u32, velocity: u8, events: &mut EventBuffer) {
        let start = events.cursor();
        for &note in notes {
            events.push_on(start, note, velocity);
        }
        events.advance(duration as u64);
        let end = events.cursor();
        for &note in notes {
            events.push_off(end, note);
        }
    }
}

/// Chord tones rolled in sequence, splitting the duration evenly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arpeggio;

impl ChordRenderer for Arpeggio {
    fn render(&self, notes: &[u8], duration: u32, velocity: u8, events: &mut EventBuffer) {
        if notes.is_empty() {
            events.advance(duration as u64);
            return;
        }

        let step = (duration / notes.len() as u32) as u64;
        let mut tick = events.cursor();
        for &note in notes {
            events.push_on(tick, note, velocity);
            tick += step;
            events.push_off(tick, note);
        }
        events.advance(duration as u64);
    }
}

/// Renderers resolvable by name. `"block"` and `"arpeggio"` are
/// registered out of the box.
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn ChordRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut registry = RendererRegistry {
            renderers: HashMap::new(),
        };
        registry.register("block", Arc::new(BlockChord));
        registry.register("arpeggio", Arc::new(Arpeggio));
        registry
    }
}

impl RendererRegistry {
    pub fn new() -> Self {
        RendererRegistry::default()
    }

    pub fn register(&mut self, name: impl Into<String>, renderer: Arc<dyn ChordRenderer>) {
        self.renderers.insert(name.into(), renderer);
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ChordRenderer>> {
        self.renderers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownRenderer(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_chord_holds_every_note() {
        let mut buffer = EventBuffer::new();
        BlockChord.render(&[60, 64, 67], 480, 64, &mut buffer);

        assert_eq!(buffer.cursor(), 480);
        let events = buffer.into_sorted();
        assert_eq!(events.len(), 6);

        let ons: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, NoteEvent::On { .. }))
            .collect();
        assert!(ons.iter().all(|(tick, _)| *tick == 0));

        let offs: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, NoteEvent::Off { .. }))
            .collect();
        assert!(offs.iter().all(|(tick, _)| *tick == 480));
    }

    #[test]
    fn arpeggio_subdivides_the_duration() {
        let mut buffer = EventBuffer::new();
        Arpeggio.render(&[60, 64, 67], 480, 64, &mut buffer);

        assert_eq!(buffer.cursor(), 480);
        let on_ticks: Vec<u64> = buffer
            .into_sorted()
            .into_iter()
            .filter(|(_, e)| matches!(e, NoteEvent::On { .. }))
            .map(|(tick, _)| tick)
            .collect();
        assert_eq!(on_ticks, vec![0, 160, 320]);
    }

    #[test]
    fn arpeggio_of_nothing_still_advances() {
        let mut buffer = EventBuffer::new();
        Arpeggio.render(&[], 480, 64, &mut buffer);
        assert_eq!(buffer.cursor(), 480);
        assert!(buffer.is_empty());
    }

    #[test]
    fn offs_sort_before_ons_at_equal_ticks() {
        let mut buffer = EventBuffer::new();
        // Two back-to-back C major chords share the 480 boundary.
        BlockChord.render(&[60], 480, 64, &mut buffer);
        BlockChord.render(&[60], 480, 64, &mut buffer);

        let events = buffer.into_sorted();
        let boundary: Vec<_> = events.iter().filter(|(tick, _)| *tick == 480).collect();
        assert_eq!(boundary.len(), 2);
        assert!(matches!(boundary[0].1, NoteEvent::Off { .. }));
        assert!(matches!(boundary[1].1, NoteEvent::On { .. }));
    }

    #[test]
    fn registry_resolves_defaults() {
        let registry = RendererRegistry::new();
        assert!(registry.resolve("block").is_ok());
        assert!(registry.resolve("arpeggio").is_ok());
        assert_eq!(registry.names(), vec!["arpeggio", "block"]);

        assert!(matches!(
            registry.resolve("strum"),
            Err(Error::UnknownRenderer(_))
        ));
    }

    #[test]
    fn registry_accepts_custom_renderers() {
        struct Silent;
        impl ChordRenderer for Silent {
            fn render(&self, _: &[u8], duration: u32, _: u8, events: &mut EventBuffer) {
                events.advance(duration as u64);
            }
        }

        let mut registry = RendererRegistry::new();
        registry.register("silent", Arc::new(Silent));
        let renderer = registry.resolve("silent").unwrap();

        let mut buffer = EventBuffer::new();
        renderer.render(&[60, 64], 100, 64, &mut buffer);
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 100);
    }
}
