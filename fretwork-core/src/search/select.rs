use crate::search::voicing::RankedVoicing;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Hard cap on the selected list, to bound output size. Pagination is the
/// caller's concern.
pub const MAX_VOICINGS: usize = 240;

/// Collapse raw candidates into the final ordered list: group harmonically
/// equivalent voicings, keep one representative per group, rank, dedup by
/// exact fret pattern, and cap.
pub fn select(candidates: Vec<RankedVoicing>) -> Vec<RankedVoicing> {
    // BTreeMap keeps group iteration deterministic
    let mut groups: BTreeMap<(u8, Vec<u8>), RankedVoicing> = BTreeMap::new();

    for candidate in candidates {
        match groups.entry(candidate.group_key()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                if better_representative(&candidate, slot.get()) {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut selected: Vec<RankedVoicing> = groups.into_values().collect();
    selected.sort_by(rank_order);

    // Safety net after grouping: identical fret patterns collapse to one
    let mut seen = HashSet::new();
    selected.retain(|ranked| seen.insert(*ranked.voicing.frets()));

    selected.truncate(MAX_VOICINGS);
    selected
}

/// Within a group: prefer more sounding strings, then a lower sum of fretted
/// fret numbers, then a lower maximum fret. Ties keep the earlier find.
fn better_representative(candidate: &RankedVoicing, current: &RankedVoicing) -> bool {
    candidate
        .sounding
        .cmp(&current.sounding)
        .then_with(|| {
            current
                .voicing
                .fretted_sum()
                .cmp(&candidate.voicing.fretted_sum())
        })
        .then_with(|| current.max_fret.cmp(&candidate.max_fret))
        == Ordering::Greater
}

/// Display order of the final list: low positions first, then compact,
/// full-sounding, gap-free shapes, then bass pitch, then open-string count.
fn rank_order(a: &RankedVoicing, b: &RankedVoicing) -> Ordering {
    a.min_fret
        .cmp(&b.min_fret)
        .then_with(|| a.max_fret.cmp(&b.max_fret))
        .then_with(|| a.span.cmp(&b.span))
        .then_with(|| b.sounding.cmp(&a.sounding))
        .then_with(|| a.inner_muted.cmp(&b.inner_muted))
        .then_with(|| a.bass.cmp(&b.bass))
        .then_with(|| b.open_strings.cmp(&a.open_strings))
}
