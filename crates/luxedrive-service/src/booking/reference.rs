//! Human-facing booking references of the form `LX-XXXXXX`.

use rand::Rng;

const PREFIX: &str = "LX-";
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

/// Draw a fresh reference, each suffix character uniformly from `[A-Z0-9]`.
pub fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{PREFIX}{suffix}")
}

/// Fill `slot` with a fresh reference unless it already holds one.
pub fn assign_reference(slot: &mut Option<String>) -> &str {
    slot.get_or_insert_with(generate_reference)
}

/// Whether `reference` matches `LX-[A-Z0-9]{6}`.
pub fn is_valid_reference(reference: &str) -> bool {
    reference
        .strip_prefix(PREFIX)
        .is_some_and(|suffix| suffix.len() == SUFFIX_LEN && suffix.bytes().all(|b| ALPHABET.contains(&b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_references_match_format() {
        for _ in 0..500 {
            let reference = generate_reference();
            assert!(is_valid_reference(&reference), "{reference}");
        }
    }

    #[test]
    fn test_format_check_rejects_lookalikes() {
        assert!(!is_valid_reference("LX-abc123"));
        assert!(!is_valid_reference("LX-ABC12"));
        assert!(!is_valid_reference("LX-ABC1234"));
        assert!(!is_valid_reference("LY-ABC123"));
        assert!(is_valid_reference("LX-ABC123"));
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let mut slot = Some("LX-KEEP01".to_string());
        assert_eq!(assign_reference(&mut slot), "LX-KEEP01");

        let mut empty = None;
        let first = assign_reference(&mut empty).to_string();
        let second = assign_reference(&mut empty).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_references_are_spread_out() {
        let seen: HashSet<String> = (0..200).map(|_| generate_reference()).collect();
        assert!(seen.len() > 190);
    }
}
