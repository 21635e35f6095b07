//! Display names for rivers and lakes.
//!
//! Pure functions of a seed: the same seed always yields the same name. They
//! use their own ChaCha stream and never touch the terrain generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ONSETS: [&str; 22] = [
    "b", "br", "c", "cl", "d", "dr", "f", "g", "gr", "h", "k", "l", "m", "n", "p", "r", "s", "sh",
    "st", "t", "th", "w",
];
const VOWELS: [&str; 9] = ["a", "e", "i", "o", "u", "ai", "ea", "ou", "y"];
const CODAS: [&str; 10] = ["", "", "n", "r", "l", "s", "nd", "rk", "ll", "m"];

const RIVER_FORMS: [(&str, &str, f64); 5] = [
    ("", " River", 0.5),
    ("River ", "", 0.15),
    ("", " Creek", 0.15),
    ("", " Run", 0.1),
    ("", "water", 0.1),
];

const LAKE_FORMS: [(&str, &str, f64); 5] = [
    ("Lake ", "", 0.5),
    ("", " Lake", 0.2),
    ("", " Pond", 0.1),
    ("", " Reservoir", 0.1),
    ("", "mere", 0.1),
];

/// Name for a river or channel, e.g. "Thornel River".
#[must_use]
pub fn name_river(seed: i64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let root = root_name(&mut rng);
    apply_form(&root, &RIVER_FORMS, &mut rng)
}

/// Name for a lake, e.g. "Lake Brouma".
#[must_use]
pub fn name_lake(seed: i64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let root = root_name(&mut rng);
    apply_form(&root, &LAKE_FORMS, &mut rng)
}

fn root_name(rng: &mut impl Rng) -> String {
    let syllables = rng.gen_range(2..=3);
    let mut name = String::new();
    for i in 0..syllables {
        // Vowel-leading first syllable now and then
        if i > 0 || !rng.gen_bool(0.2) {
            name.push_str(ONSETS[rng.gen_range(0..ONSETS.len())]);
        }
        name.push_str(VOWELS[rng.gen_range(0..VOWELS.len())]);
        if i == syllables - 1 || rng.gen_bool(0.3) {
            name.push_str(CODAS[rng.gen_range(0..CODAS.len())]);
        }
    }
    capitalize(&name)
}

fn apply_form(root: &str, forms: &[(&str, &str, f64)], rng: &mut impl Rng) -> String {
    let roll: f64 = rng.gen_range(0.0..1.0);
    let mut acc = 0.0;
    for &(prefix, suffix, weight) in forms {
        acc += weight;
        if roll < acc {
            return format!("{prefix}{root}{suffix}");
        }
    }
    let (prefix, suffix, _) = forms[0];
    format!("{prefix}{root}{suffix}")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        first.to_uppercase().chain(chars).collect()
    } else {
        String::new()
    }
}
