//! Shift a motif around a few scales.
//!
//! Usage: cargo run --example shift_motif

use gamut::{transpose_name_tracks, transpose_names_in, HarmonicMinorScale};

fn main() {
    let motif = ["C4", "E4", "B3", "C4"];
    for steps in [-2, 0, 3] {
        let shifted = transpose_names_in(&motif, steps, "C", &gamut::MajorScale).unwrap();
        println!("{:>3} steps in C major: {:?}", steps, shifted);
    }

    let tracks = vec![vec!["A4", "C5", "E5"], vec!["G#5", "A5", "C6"]];
    let shifted = transpose_name_tracks(&tracks, 2, "A").unwrap();
    println!("two tracks up 2 in A major: {:?}", shifted);

    let minor = transpose_names_in(&["A4", "C5", "E5"], 2, "A", &HarmonicMinorScale).unwrap();
    println!("harmonic minor colors the same shift: {:?}", minor);
}
