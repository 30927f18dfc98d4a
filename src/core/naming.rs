use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Fixed label alphabet. Twenty letters; farms past twenty plots wrap into a
/// second generation ("Plot 2A").
const ALPHABET: &[u8; 20] = b"ABCDEFGHIJKLMNOPQRST";

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Plot (\d*)([A-T])$").unwrap())
}

/// Label for the plot at `index` (0-based) in the fixed sequence:
/// `Plot A` .. `Plot T`, then `Plot 2A` .. `Plot 2T`, `Plot 3A`, ...
pub fn label_for_index(index: usize) -> String {
    let generation = index / ALPHABET.len() + 1;
    let letter = ALPHABET[index % ALPHABET.len()] as char;
    if generation == 1 {
        format!("Plot {}", letter)
    } else {
        format!("Plot {}{}", generation, letter)
    }
}

/// Labels for `count` plots generated in bulk.
pub fn generate_labels(count: usize) -> Vec<String> {
    (0..count).map(label_for_index).collect()
}

/// Maps a label back to its 0-based sequence index. Labels outside the
/// scheme (including an explicit "1" generation, which is never emitted)
/// return `None` and are ignored by the gap-filling logic.
pub fn parse_label(label: &str) -> Option<usize> {
    let caps = label_regex().captures(label)?;
    let generation = match &caps[1] {
        "" => 1,
        digits => digits.parse::<usize>().ok().filter(|&g| g >= 2)?,
    };
    let letter_index = (caps[2].as_bytes()[0] - b'A') as usize;
    Some((generation - 1) * ALPHABET.len() + letter_index)
}

/// First label in the fixed sequence not already taken. New plots fill gaps
/// left by removed plots instead of continuing past the highest label.
pub fn next_unused_label<S: AsRef<str>>(existing: &[S]) -> String {
    let used: HashSet<usize> = existing
        .iter()
        .filter_map(|label| parse_label(label.as_ref()))
        .collect();

    let mut index = 0;
    while used.contains(&index) {
        index += 1;
    }
    label_for_index(index)
}
