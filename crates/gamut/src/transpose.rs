//! Scale-relative transposition of melodic lines.
//!
//! A track is an ordered sequence of pitches. The step policy is either a
//! single shift applied to every note, or one shift per time position; a
//! per-position sequence must match the track length exactly, and the
//! check runs before any note is touched.

use serde::{Deserialize, Serialize};

use crate::pitch::{format_names, parse_names, Pitch, PitchClass};
use crate::scale::{MajorScale, Scale, ScaleBuilder};
use crate::{Error, Result};

/// One melodic line.
pub type Track = Vec<Pitch>;

/// Step policy: one shift for every note, or one shift per time position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steps {
    Uniform(i32),
    PerPosition(Vec<i32>),
}

impl From<i32> for Steps {
    fn from(steps: i32) -> Self {
        Steps::Uniform(steps)
    }
}

impl From<Vec<i32>> for Steps {
    fn from(steps: Vec<i32>) -> Self {
        Steps::PerPosition(steps)
    }
}

impl Steps {
    /// Validate against a track length, then resolve to one shift per
    /// position.
    fn resolve(&self, positions: usize) -> Result<Vec<i32>> {
        match self {
            Steps::Uniform(k) => Ok(vec![*k; positions]),
            Steps::PerPosition(seq) => {
                if seq.len() != positions {
                    return Err(Error::StepCountMismatch {
                        expected: positions,
                        found: seq.len(),
                    });
                }
                Ok(seq.clone())
            }
        }
    }
}

/// Transpose a single track within a scale.
pub fn transpose_track(track: &[Pitch], steps: &Steps, scale: &Scale) -> Result<Track> {
    let shifts = steps.resolve(track.len())?;
    track
        .iter()
        .zip(shifts)
        .map(|(pitch, k)| scale.transpose(pitch, k))
        .collect()
}

/// Transpose several aligned tracks within a scale, broadcasting the same
/// step policy across all tracks at each position.
pub fn transpose_tracks(tracks: &[Track], steps: &Steps, scale: &Scale) -> Result<Vec<Track>> {
    // Every track must match a per-position sequence; validate the whole
    // input before transposing anything.
    if let Steps::PerPosition(seq) = steps {
        for track in tracks {
            if track.len() != seq.len() {
                return Err(Error::StepCountMismatch {
                    expected: track.len(),
                    found: seq.len(),
                });
            }
        }
    }

    tracks
        .iter()
        .map(|track| transpose_track(track, steps, scale))
        .collect()
}

/// Transpose note names within the major scale on `root`.
pub fn transpose_names<S: AsRef<str>>(
    notes: &[S],
    steps: impl Into<Steps>,
    root: &str,
) -> Result<Vec<String>> {
    transpose_names_in(notes, steps, root, &MajorScale)
}

/// Transpose note names within a scale built on `root` by `builder`.
pub fn transpose_names_in<S: AsRef<str>>(
    notes: &[S],
    steps: impl Into<Steps>,
    root: &str,
    builder: &dyn ScaleBuilder,
) -> Result<Vec<String>> {
    let scale = build_scale(root, builder)?;
    let track = parse_names(notes)?;
    let shifted = transpose_track(&track, &steps.into(), &scale)?;
    Ok(format_names(&shifted))
}

/// Transpose several tracks of note names within the major scale on `root`.
pub fn transpose_name_tracks<S: AsRef<str>>(
    tracks: &[Vec<S>],
    steps: impl Into<Steps>,
    root: &str,
) -> Result<Vec<Vec<String>>> {
    transpose_name_tracks_in(tracks, steps, root, &MajorScale)
}

/// Transpose several tracks of note names within a scale built on `root`
/// by `builder`.
pub fn transpose_name_tracks_in<S: AsRef<str>>(
    tracks: &[Vec<S>],
    steps: impl Into<Steps>,
    root: &str,
    builder: &dyn ScaleBuilder,
) -> Result<Vec<Vec<String>>> {
    let scale = build_scale(root, builder)?;
    let parsed: Vec<Track> = tracks
        .iter()
        .map(|track| parse_names(track))
        .collect::<Result<_>>()?;
    let shifted = transpose_tracks(&parsed, &steps.into(), &scale)?;
    Ok(shifted.iter().map(|track| format_names(track)).collect())
}

/// The scale is built once per call and reused for every note.
fn build_scale(root: &str, builder: &dyn ScaleBuilder) -> Result<Scale> {
    let root = PitchClass::parse(root).ok_or_else(|| Error::InvalidRoot(root.to_string()))?;
    builder.build(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::HarmonicMinorScale;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_track_down_two_in_c() {
        let shifted = transpose_names(&["C4", "E4", "B3", "C4"], -2, "C").unwrap();
        assert_eq!(shifted, vec!["A3", "C4", "G3", "A3"]);
    }

    #[test]
    fn multi_track_down_two_in_c() {
        let motif = vec![vec!["C4", "E4", "G4"], vec!["A4", "C5", "E5"]];
        let shifted = transpose_name_tracks(&motif, -2, "C").unwrap();
        assert_eq!(
            shifted,
            vec![vec!["A3", "C4", "E4"], vec!["F4", "A4", "C5"]]
        );
    }

    #[test]
    fn multi_track_up_one_in_e() {
        let motif = vec![vec!["E4", "G#4", "B4"], vec!["C#5", "E5", "G#5"]];
        let shifted = transpose_name_tracks(&motif, 1, "E").unwrap();
        assert_eq!(
            shifted,
            vec![vec!["F#4", "A4", "C#5"], vec!["D#5", "F#5", "A5"]]
        );
    }

    #[test]
    fn multi_track_down_three_in_d_flat() {
        let motif = vec![vec!["Db4", "F4", "Ab4"], vec!["Bb4", "Db5", "F5"]];
        let shifted = transpose_name_tracks(&motif, -3, "Db").unwrap();
        assert_eq!(
            shifted,
            vec![vec!["Ab3", "C4", "Eb4"], vec!["F4", "Ab4", "C5"]]
        );
    }

    #[test]
    fn harmonic_minor_builder() {
        let motif = vec![vec!["A4", "C5", "E5"], vec!["G#5", "A5", "C6"]];
        let shifted = transpose_name_tracks_in(&motif, 2, "A", &HarmonicMinorScale).unwrap();
        assert_eq!(
            shifted,
            vec![vec!["C5", "E5", "G#5"], vec!["B5", "C6", "E6"]]
        );
    }

    #[test]
    fn zero_steps_is_identity() {
        let notes = ["C4", "E4", "B3", "F#2", "Bb5"];
        for root in ["C", "G", "Bb"] {
            let there = transpose_names(&notes, 0, root).unwrap();
            // F# is outside C and Bb major and snaps, so only compare
            // notes that belong to the scale.
            if root == "C" {
                assert_eq!(there[..3].to_vec(), vec!["C4", "E4", "B3"]);
            }
            assert_eq!(there.len(), notes.len());
        }
    }

    #[test]
    fn round_trip_restores_input() {
        let notes = ["C4", "E4", "B3", "C4"];
        for k in [-9, -2, 0, 3, 7, 12] {
            let there = transpose_names(&notes, k, "C").unwrap();
            let back = transpose_names(&there, -k, "C").unwrap();
            assert_eq!(back, notes.to_vec(), "round trip failed for k={}", k);
        }
    }

    #[test]
    fn uniform_multi_track_matches_per_track() {
        let motif = vec![
            vec!["C4", "E4", "G4"],
            vec!["A4", "C5", "E5"],
            vec!["E3", "G3", "B3"],
        ];
        let together = transpose_name_tracks(&motif, -2, "C").unwrap();
        for (track, expected) in motif.iter().zip(&together) {
            let alone = transpose_names(track, -2, "C").unwrap();
            assert_eq!(&alone, expected);
        }
    }

    #[test]
    fn per_position_steps_apply_by_position() {
        let shifted = transpose_names(&["C4", "E4", "G4"], vec![1, 2, 3], "C").unwrap();
        assert_eq!(shifted, vec!["D4", "G4", "C5"]);
    }

    #[test]
    fn per_position_steps_broadcast_across_tracks() {
        let motif = vec![vec!["C4", "E4", "G4"], vec!["E4", "G4", "B4"]];
        let shifted = transpose_name_tracks(&motif, vec![0, 0, 1], "C").unwrap();
        assert_eq!(
            shifted,
            vec![vec!["C4", "E4", "A4"], vec!["E4", "G4", "C5"]]
        );
    }

    #[test]
    fn per_position_length_mismatch_is_rejected() {
        let result = transpose_names(&["C4", "E4", "G4"], vec![1, 2], "C");
        assert!(matches!(
            result,
            Err(Error::StepCountMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn per_position_mismatch_rejected_for_every_track() {
        // The second track is short: nothing is transposed.
        let motif = vec![vec!["C4", "E4", "G4"], vec!["A4", "C5"]];
        let result = transpose_name_tracks(&motif, vec![1, 1, 1], "C");
        assert!(matches!(result, Err(Error::StepCountMismatch { .. })));
    }

    #[test]
    fn invalid_root_is_rejected() {
        let result = transpose_names(&["C4"], 1, "H");
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn invalid_note_name_is_rejected() {
        let result = transpose_names(&["C4", "X2"], 1, "C");
        assert!(matches!(result, Err(Error::InvalidPitch(_))));
    }
}
