//! Name candidates for the parcel lookup flow.
//!
//! Unlike [`NameExtractor`](super::NameExtractor) this works on arbitrary
//! text, e.g. the OCR of a parcel label, and only harvests runs of
//! uppercase words that could be a recipient name.

use std::collections::HashSet;

use super::patterns::CANDIDATE_TOKEN;

const MIN_LEN: usize = 5;
const MAX_LEN: usize = 50;

/// Harvest plausible names from free text, in document order.
///
/// Consecutive uppercase tokens longer than two characters form a run; any
/// other token ends it. Each run is emitted as a whole first. When it has
/// three tokens or more, its adjacent token pairs follow right after it, in
/// order, before the next run, so that a name inside a longer run
/// ("COLIS POUR JEAN MARTIN") is still probed on its own. Duplicates keep
/// their first position and candidates outside 5..=50 characters are
/// filtered out.
pub fn name_candidates(text: &str) -> Vec<String> {
    let mut runs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if is_name_token(token) {
            current.push(token);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for run in &runs {
        let mut emit = |candidate: String| {
            let len = candidate.chars().count();
            if (MIN_LEN..=MAX_LEN).contains(&len) && seen.insert(candidate.clone()) {
                candidates.push(candidate);
            }
        };

        emit(run.join(" "));
        if run.len() > 2 {
            for pair in run.windows(2) {
                emit(pair.join(" "));
            }
        }
    }

    candidates
}

fn is_name_token(token: &str) -> bool {
    token.chars().count() > 2 && token == token.to_uppercase() && CANDIDATE_TOKEN.is_match(token)
}
