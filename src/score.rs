//! Weighted string similarity for name lookups
//!
//! Scores are integers in `0..=100` and combine:
//! - Plain Levenshtein ratio
//! - Best equal-width window ratio (so "Red Sox" scores well against "Boston Red Sox")
//! - Token sort and token set ratios (word order and repeated words don't matter)

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Weight applied to token-based scorers
const UNBASE_SCALE: f64 = 0.95;

/// Weight applied to partial scorers when lengths differ moderately
const PARTIAL_SCALE: f64 = 0.9;

/// Weight applied to partial scorers when one side is much longer
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Length ratio below which partial scorers are skipped
const PARTIAL_MIN_LEN_RATIO: f64 = 1.5;

/// Length ratio above which `LONG_PARTIAL_SCALE` kicks in
const LONG_LEN_RATIO: f64 = 8.0;

type Scorer = fn(&str, &str) -> f64;

/// Lowercase, turn punctuation into spaces, trim
pub fn process(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Levenshtein similarity scaled to `0.0..=100.0`
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` of the shorter string against every same-width window of the longer one
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let width = shorter.chars().count();
    if width == 0 {
        return 0.0;
    }

    let longer: Vec<char> = longer.chars().collect();
    let mut best = 0.0_f64;

    for start in 0..=(longer.len() - width) {
        let window: String = longer[start..start + width].iter().collect();
        let score = ratio(shorter, &window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, scorer: Scorer) -> f64 {
    scorer(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set(a: &str, b: &str, scorer: Scorer) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let sect = join(tokens_a.intersection(&tokens_b).copied());
    let diff_ab = join(tokens_a.difference(&tokens_b).copied());
    let diff_ba = join(tokens_b.difference(&tokens_a).copied());

    let combined_ab = join([sect.as_str(), diff_ab.as_str()].into_iter());
    let combined_ba = join([sect.as_str(), diff_ba.as_str()].into_iter());

    [
        scorer(&sect, &combined_ab),
        scorer(&sect, &combined_ba),
        scorer(&combined_ab, &combined_ba),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Combined similarity score in `0..=100`.
///
/// Both inputs go through [`process`] first, so comparison ignores case
/// and punctuation. An empty side scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = process(a);
    let b = process(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(&a, &b);
    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if len_ratio < PARTIAL_MIN_LEN_RATIO {
        let tsor = token_sort(&a, &b, ratio) * UNBASE_SCALE;
        let tser = token_set(&a, &b, ratio) * UNBASE_SCALE;
        base.max(tsor).max(tser)
    } else {
        let partial_scale = if len_ratio > LONG_LEN_RATIO {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        let partial = partial_ratio(&a, &b) * partial_scale;
        let ptsor = token_sort(&a, &b, partial_ratio) * UNBASE_SCALE * partial_scale;
        let ptser = token_set(&a, &b, partial_ratio) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(ptsor).max(ptser)
    };

    best.round().clamp(0.0, 100.0) as u8
}
