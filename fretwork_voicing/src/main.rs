// Fretwork — CLI entry point.
//
// Prints the ranked playable voicings of a chord, or the smoothed voicing
// sequence of a whole progression.
//
// Usage:
//   voicings 0,4,7 [--bass N] [--tuning NAME] [--frets N] [--max-span N]
//     [--max-fingers N] [--max-results N] [--min-fret N] [--no-open] [--json]
//   voicings "0,4,7;5,9,0;7,11,2" --progression [same flags]
//
// Chords are pitch-class lists (0 = C .. 11 = B); the first listed class is
// the root/bass unless --bass overrides it. Tunings: standard, drop-d,
// dadgad, open-g, bass, mandolin.

use fretwork_theory::{pitch_class_name, ChordSpec, PitchClassSet, Tuning};
use fretwork_voicing::{
    compute_voice_leading, generate_voicings, optimize_progression, progression_families,
    ScoringWeights, SearchLimits,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let Some(chord_arg) = args.get(1).filter(|s| !s.starts_with("--")) else {
        eprintln!("Usage: voicings <pitch-classes> [--progression] [--bass N] [--tuning NAME]");
        eprintln!("       e.g. voicings 0,4,7            (C major)");
        eprintln!("            voicings \"0,4,7;5,9,0\" --progression");
        std::process::exit(1);
    };

    let tuning_name: String = parse_flag(&args, "--tuning").unwrap_or_else(|| "standard".to_string());
    let Some(tuning) = Tuning::preset(&tuning_name) else {
        eprintln!("Unknown tuning '{}'.", tuning_name);
        std::process::exit(1);
    };

    let fret_count: u8 = parse_flag(&args, "--frets").unwrap_or(5);
    let limits = SearchLimits {
        max_fingers: parse_flag(&args, "--max-fingers"),
        max_span: parse_flag(&args, "--max-span"),
        max_results: parse_flag(&args, "--max-results").unwrap_or(15),
        allow_open: !has_flag(&args, "--no-open"),
        min_fret: parse_flag(&args, "--min-fret").unwrap_or(1),
    };
    let json = has_flag(&args, "--json");

    if has_flag(&args, "--progression") {
        run_progression(chord_arg, &tuning, fret_count, &limits, json);
    } else {
        let bass_override: Option<u8> = parse_flag(&args, "--bass");
        run_single(chord_arg, bass_override, &tuning, fret_count, &limits, json);
    }
}

fn run_single(
    chord_arg: &str,
    bass_override: Option<u8>,
    tuning: &Tuning,
    fret_count: u8,
    limits: &SearchLimits,
    json: bool,
) {
    let classes = parse_classes(chord_arg);
    let bass = bass_override.unwrap_or_else(|| classes.first().copied().unwrap_or(0));
    let target = PitchClassSet::from_classes(&classes);
    let results = generate_voicings(&target, bass, tuning, fret_count, limits);

    if json {
        print_json(&results);
        return;
    }

    println!(
        "Chord {{{}}} over {} | {} strings, {} frets",
        classes
            .iter()
            .map(|&pc| pitch_class_name(pc))
            .collect::<Vec<_>>()
            .join(" "),
        pitch_class_name(bass),
        tuning.string_count(),
        fret_count,
    );

    if results.is_empty() {
        println!("No playable voicing found.");
        return;
    }

    for (rank, scored) in results.iter().enumerate() {
        println!(
            "{:>2}. {:<16} cost {:6.2}  [{}]",
            rank + 1,
            scored.voicing.pattern(),
            scored.breakdown.total_cost,
            scored.breakdown,
        );
    }
}

fn run_progression(
    chord_arg: &str,
    tuning: &Tuning,
    fret_count: u8,
    limits: &SearchLimits,
    json: bool,
) {
    let chords: Vec<ChordSpec> = chord_arg
        .split(';')
        .map(|part| ChordSpec::new(parse_classes(part)))
        .collect();

    let weights = ScoringWeights::default();
    let families = progression_families(&chords, tuning, fret_count, limits, &weights);
    let selections = optimize_progression(&families);

    if json {
        print_json(&selections);
        return;
    }

    let mut previous = None;
    for (index, (chord, selection)) in chords.iter().zip(&selections).enumerate() {
        let name = chord
            .pitch_classes
            .iter()
            .map(|&pc| pitch_class_name(pc))
            .collect::<Vec<_>>()
            .join(" ");
        match selection {
            None => println!("{:>2}. {{{}}}  no playable voicing", index + 1, name),
            Some(s) => {
                let family = &families[index].inversions[s.inversion];
                let voicing = &family.voicings[s.voicing].voicing;
                let movement = previous
                    .map(|prev| {
                        compute_voice_leading(prev, voicing, tuning.string_count())
                            .total_distance
                            .to_string()
                    })
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>2}. {{{}}}  inv {} over {:<2}  {:<16} moved {}",
                    index + 1,
                    name,
                    s.inversion,
                    pitch_class_name(family.bass),
                    voicing.pattern(),
                    movement,
                );
                previous = Some(voicing);
            }
        }
    }
}

fn parse_classes(arg: &str) -> Vec<u8> {
    let mut classes = Vec::new();
    for token in arg.split(',') {
        match token.trim().parse::<u8>() {
            Ok(pc) if pc < 12 => classes.push(pc),
            _ => {
                eprintln!("Invalid pitch class '{}': must be 0-11.", token.trim());
                std::process::exit(1);
            }
        }
    }
    classes
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
