use crate::search::voicing::{Fret, RankedVoicing, Voicing};
use crate::types::chord::ChordSpec;
use crate::types::tuning::{Tuning, STRING_COUNT};
use std::collections::BTreeSet;

/// Voicings must sound at least this many strings
pub const MIN_SOUNDING_STRINGS: usize = 3;

/// At most this many fingers on the fretboard
pub const MAX_FRETTED_NOTES: usize = 4;

/// Maximum frets a hand can cover, inclusive of both end frets
pub const HAND_SPAN: u8 = 4;

/// Frets above the base position included in one search window
const WINDOW_REACH: u8 = 4;

/// Search policy knobs.
///
/// `require_root` restores the historical rule that the chord's root pitch
/// class must be among the sounded notes. The canonical algorithm leaves it
/// off, which admits root-less "shell" voicings of 4-note chords (triads
/// always sound their root anyway, because all three distinct tones are
/// required).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub require_root: bool,
}

struct SearchContext<'a> {
    chord: &'a ChordSpec,
    allowed: BTreeSet<u8>,
    pitches: [u8; STRING_COUNT],
    active: [bool; STRING_COUNT],
    max_fret: u8,
    base_fret: u8,
    min_distinct: usize,
    require_root: bool,
}

/// Enumerate every structurally valid fret assignment for the chord on this
/// tuning, across all base-fret positions up to `max_fret`. Any ceiling in
/// the `u8` range is accepted. Results are raw candidates in deterministic
/// order; see [`crate::search::select`] for grouping and ranking.
pub fn search(
    chord: &ChordSpec,
    tuning: &Tuning,
    max_fret: u8,
    options: &SearchOptions,
) -> Vec<RankedVoicing> {
    let allowed = chord.allowed_pitch_classes();
    let min_distinct = MIN_SOUNDING_STRINGS.min(chord.intervals().len());
    let mut results = Vec::new();

    for base_fret in 0..=max_fret {
        let ctx = SearchContext {
            chord,
            allowed: allowed.clone(),
            pitches: tuning.pitches(),
            active: tuning.active(),
            max_fret,
            base_fret,
            min_distinct,
            require_root: options.require_root,
        };

        let candidates: Vec<Vec<Fret>> = (0..STRING_COUNT)
            .map(|string| candidate_frets(&ctx, string))
            .collect();

        let mut current = [Fret::Muted; STRING_COUNT];
        enumerate(&candidates, 0, &mut current, &ctx, &mut results);
    }

    results
}

/// Per-string candidate set at the current base position: mute always, open
/// when the open pitch is a chord tone, and every in-window fret that sounds
/// a chord tone. Disabled strings can only mute. Window arithmetic saturates
/// so the full `u8` ceiling range is safe.
fn candidate_frets(ctx: &SearchContext<'_>, string: usize) -> Vec<Fret> {
    let mut options = vec![Fret::Muted];
    if !ctx.active[string] {
        return options;
    }

    let open = ctx.pitches[string];
    if ctx.allowed.contains(&open) {
        options.push(Fret::Played(0));
    }

    let start = ctx.base_fret.max(1);
    let end = ctx.base_fret.saturating_add(WINDOW_REACH).min(ctx.max_fret);
    for fret in start..=end {
        if ctx.allowed.contains(&(((u16::from(open) + u16::from(fret)) % 12) as u8)) {
            options.push(Fret::Played(fret));
        }
    }

    options
}

/// Depth-first walk of the per-string candidate sets, folding surviving
/// voicings into the accumulator.
fn enumerate(
    candidates: &[Vec<Fret>],
    string: usize,
    current: &mut [Fret; STRING_COUNT],
    ctx: &SearchContext<'_>,
    out: &mut Vec<RankedVoicing>,
) {
    if string == STRING_COUNT {
        if let Some(ranked) = evaluate(Voicing::new(*current), ctx) {
            out.push(ranked);
        }
        return;
    }

    for &fret in &candidates[string] {
        current[string] = fret;
        enumerate(candidates, string + 1, current, ctx, out);
    }
}

/// The validity predicate of the search: at least three sounding strings,
/// enough distinct chord tones, a playable hand shape, and no string muted
/// that should obviously ring.
fn evaluate(voicing: Voicing, ctx: &SearchContext<'_>) -> Option<RankedVoicing> {
    let sounding_count = voicing.sounding_count();
    if sounding_count < MIN_SOUNDING_STRINGS {
        return None;
    }

    let sounded = voicing.sounded_pitch_classes(&ctx.pitches);
    // Candidate construction only offers chord tones
    debug_assert!(sounded.iter().all(|pc| ctx.allowed.contains(pc)));

    let distinct: BTreeSet<u8> = sounded.iter().copied().collect();
    if distinct.len() < ctx.min_distinct {
        return None;
    }

    if ctx.require_root && !distinct.contains(&ctx.chord.root().pitch_class()) {
        return None;
    }

    let fretted: Vec<u8> = voicing.fretted().collect();
    if fretted.len() > MAX_FRETTED_NOTES {
        return None;
    }

    if let (Some(&min), Some(&max)) = (fretted.iter().min(), fretted.iter().max()) {
        if max - min + 1 > HAND_SPAN {
            return None;
        }
    }

    // Pure open-string shapes belong to base position 0 only
    if ctx.base_fret > 0 && fretted.is_empty() {
        return None;
    }

    if hides_reachable_chord_tone(&voicing, &fretted, ctx) {
        return None;
    }

    if open_chord_tone_above(&voicing, ctx) {
        return None;
    }

    Some(RankedVoicing::derive(
        voicing,
        ctx.base_fret,
        &ctx.pitches,
        ctx.chord,
    ))
}

/// Reject a candidate that mutes a string inside its own string range even
/// though that string could have sounded a chord tone without changing the
/// hand shape: any fret in a window one fret wider than the voicing's own
/// fretted span. The open string counts only when that window reaches fret
/// 0, so a shape high on the neck may mute a string whose open pitch is a
/// chord tone.
fn hides_reachable_chord_tone(
    voicing: &Voicing,
    fretted: &[u8],
    ctx: &SearchContext<'_>,
) -> bool {
    let (Some(lowest), Some(highest)) = (voicing.lowest_sounding(), voicing.highest_sounding())
    else {
        return false;
    };

    let reach = fretted
        .iter()
        .min()
        .zip(fretted.iter().max())
        .map(|(&min, &max)| (u16::from(min.saturating_sub(1)), u16::from(max) + 1));

    for string in lowest + 1..highest {
        if !voicing.frets()[string].is_muted() || !ctx.active[string] {
            continue;
        }

        let open = u16::from(ctx.pitches[string]);
        match reach {
            // All-open voicings have no fretted span; only the open string
            // is reachable
            None => {
                if ctx.allowed.contains(&(open as u8)) {
                    return true;
                }
            }
            Some((lo, hi)) => {
                for fret in lo..=hi {
                    if ctx.allowed.contains(&(((open + fret) % 12) as u8)) {
                        return true;
                    }
                }
            }
        }
    }

    false
}

/// Reject a candidate whose shape would leave an accidental open chord tone
/// ringing above the top voice. The scan stops at the first disabled string.
fn open_chord_tone_above(voicing: &Voicing, ctx: &SearchContext<'_>) -> bool {
    let Some(highest) = voicing.highest_sounding() else {
        return false;
    };

    for string in highest + 1..STRING_COUNT {
        if !ctx.active[string] {
            break;
        }
        if ctx.allowed.contains(&ctx.pitches[string]) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chord::ChordFamily;
    use crate::types::note::Note;

    fn chord(root: &str, family: ChordFamily) -> ChordSpec {
        ChordSpec::from_family(root.parse::<Note>().unwrap(), family)
    }

    fn frets(ranked: &RankedVoicing) -> Vec<i16> {
        ranked
            .voicing
            .frets()
            .iter()
            .map(|f| f.fret().map_or(-1, i16::from))
            .collect()
    }

    #[test]
    fn test_e_major_finds_canonical_open_shape() {
        let results = search(
            &chord("E", ChordFamily::Major),
            &Tuning::standard(),
            9,
            &SearchOptions::default(),
        );
        assert!(results
            .iter()
            .any(|r| frets(r) == vec![0, 2, 2, 1, 0, 0]));
    }

    #[test]
    fn test_results_respect_structural_invariants() {
        let tuning = Tuning::standard();
        let spec = chord("C", ChordFamily::Seventh);
        let allowed = spec.allowed_pitch_classes();

        for ranked in search(&spec, &tuning, 12, &SearchOptions::default()) {
            assert!(ranked.sounding as usize >= MIN_SOUNDING_STRINGS);
            assert!(ranked.voicing.fretted().count() <= MAX_FRETTED_NOTES);

            for pc in ranked.voicing.sounded_pitch_classes(&tuning.pitches()) {
                assert!(allowed.contains(&pc));
            }

            let fretted: Vec<u8> = ranked.voicing.fretted().collect();
            if let (Some(&min), Some(&max)) = (fretted.iter().min(), fretted.iter().max()) {
                assert!(max - min <= HAND_SPAN - 1);
                assert!(max <= 12);
            }

            // Pure open shapes only at base position 0
            if fretted.is_empty() {
                assert_eq!(ranked.base_fret, 0);
            }
        }
    }

    #[test]
    fn test_open_chord_tone_above_rejected() {
        // Every E major result that stops short of the top string would leave
        // the open high E (a chord tone) ringing, so none may do so while the
        // top string is active
        let results = search(
            &chord("E", ChordFamily::Major),
            &Tuning::standard(),
            5,
            &SearchOptions::default(),
        );
        for ranked in &results {
            let highest = ranked.voicing.highest_sounding().unwrap();
            assert_eq!(
                highest, 5,
                "voicing {} leaves the open high E muted",
                ranked.voicing
            );
        }
    }

    #[test]
    fn test_disabled_strings_never_sound() {
        let mut tuning = Tuning::standard();
        tuning.set_active(0, false);
        tuning.set_active(5, false);

        let results = search(
            &chord("A", ChordFamily::Minor),
            &tuning,
            9,
            &SearchOptions::default(),
        );
        assert!(!results.is_empty());
        for ranked in results {
            assert!(ranked.voicing.frets()[0].is_muted());
            assert!(ranked.voicing.frets()[5].is_muted());
        }
    }

    #[test]
    fn test_too_few_strings_yields_nothing() {
        let mut tuning = Tuning::standard();
        for string in 0..STRING_COUNT - 1 {
            tuning.set_active(string, false);
        }

        let results = search(
            &chord("E", ChordFamily::Major),
            &tuning,
            15,
            &SearchOptions::default(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_max_fret_zero_open_positions_only() {
        // E minor sounds from open strings alone: 0 x x 0 0 0
        let results = search(
            &chord("E", ChordFamily::Minor),
            &Tuning::standard(),
            0,
            &SearchOptions::default(),
        );
        assert!(results.iter().all(|r| r.voicing.fretted().count() == 0));
        assert!(results
            .iter()
            .any(|r| frets(r) == vec![0, -1, -1, 0, 0, 0]));

        // D major needs fretted notes, so a zero ceiling yields nothing
        let results = search(
            &chord("D", ChordFamily::Major),
            &Tuning::standard(),
            0,
            &SearchOptions::default(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_muted_string_with_distant_open_tone_allowed() {
        // x x 10 0 x 0 for Cmaj7: the muted B string has no chord tone in
        // the hand's window [9, 11], and its open B sits far below the
        // shape, so muting it is legitimate
        let results = search(
            &chord("C", ChordFamily::MajorSeventh),
            &Tuning::standard(),
            12,
            &SearchOptions::default(),
        );
        assert!(results
            .iter()
            .any(|r| frets(r) == vec![-1, -1, 10, 0, -1, 0]));
    }

    #[test]
    fn test_muted_string_with_open_tone_in_reach_rejected() {
        // A shape fretted at the first fret reaches fret 0, so muting the
        // open B inside an E major voicing hides a reachable chord tone
        let results = search(
            &chord("E", ChordFamily::Major),
            &Tuning::standard(),
            9,
            &SearchOptions::default(),
        );
        assert!(!results
            .iter()
            .any(|r| frets(r) == vec![0, 2, 2, 1, -1, 0]));
    }

    #[test]
    fn test_full_u8_fret_ceiling_is_safe() {
        // The window and pitch arithmetic must not wrap at the top of the
        // ceiling range
        let results = search(
            &chord("E", ChordFamily::Major),
            &Tuning::standard(),
            u8::MAX,
            &SearchOptions::default(),
        );
        assert!(results
            .iter()
            .any(|r| frets(r) == vec![0, 2, 2, 1, 0, 0]));
        for ranked in &results {
            for pc in &ranked.pitch_classes {
                assert!(*pc < 12);
            }
        }
    }

    #[test]
    fn test_monotonic_fret_ceiling() {
        let spec = chord("G", ChordFamily::Major);
        let tuning = Tuning::standard();
        let options = SearchOptions::default();

        let narrow: std::collections::HashSet<Vec<i16>> = search(&spec, &tuning, 5, &options)
            .iter()
            .map(frets)
            .collect();
        let wide: std::collections::HashSet<Vec<i16>> = search(&spec, &tuning, 9, &options)
            .iter()
            .map(frets)
            .collect();

        assert!(narrow.is_subset(&wide));
        assert!(wide.len() > narrow.len());
    }

    #[test]
    fn test_root_presence_policies() {
        let spec = chord("G", ChordFamily::Seventh);
        let tuning = Tuning::standard();
        let root_pc = spec.root().pitch_class();

        // The canonical policy admits root-less shell voicings of 4-note chords
        let relaxed = search(&spec, &tuning, 9, &SearchOptions::default());
        assert!(relaxed
            .iter()
            .any(|r| !r.pitch_classes.contains(&root_pc)));

        // The historical policy filters them out, and nothing else is added
        let strict = search(&spec, &tuning, 9, &SearchOptions { require_root: true });
        assert!(strict.iter().all(|r| r.pitch_classes.contains(&root_pc)));

        let relaxed_patterns: std::collections::HashSet<Vec<i16>> =
            relaxed.iter().map(frets).collect();
        for ranked in &strict {
            assert!(relaxed_patterns.contains(&frets(ranked)));
        }
    }

    #[test]
    fn test_triads_always_sound_their_root() {
        // With three distinct tones required, both policies agree on triads
        let spec = chord("C", ChordFamily::Major);
        let tuning = Tuning::standard();
        let root_pc = spec.root().pitch_class();

        for ranked in search(&spec, &tuning, 9, &SearchOptions::default()) {
            assert!(ranked.pitch_classes.contains(&root_pc));
        }
    }

    #[test]
    fn test_determinism() {
        let spec = chord("A", ChordFamily::MinorSeventh);
        let tuning = Tuning::standard();
        let options = SearchOptions::default();

        let first = search(&spec, &tuning, 9, &options);
        let second = search(&spec, &tuning, 9, &options);
        assert_eq!(first, second);
    }
}
