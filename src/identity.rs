//! Content-addressed prompt identifiers
//!
//! Catalog prompts have no stored identity. Their id is derived from the full
//! taxonomy path plus the prompt text, so the same content always maps to the
//! same id across reloads, and any edit produces a new one.

/// Separator placed between the four fields before hashing.
const FIELD_SEPARATOR: &str = "::";

/// Prefix for catalog ids. Custom prompts use a different prefix.
pub const CATALOG_ID_PREFIX: char = 'p';

/// Compute the id of a catalog prompt.
///
/// The fields are joined with `::` and folded into a 32-bit signed
/// accumulator (`acc * 31 + unit`, wrapping) over the UTF-16 code units of
/// the key. The absolute value is rendered in base 36 behind a `p` prefix,
/// so ids never look like bare numbers and are never empty.
///
/// Distinct inputs may collide; they then share an id.
pub fn prompt_id(tab: &str, section: &str, category: &str, text: &str) -> String {
    let key = [tab, section, category, text].join(FIELD_SEPARATOR);

    let hash = key
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)));

    let mut id = String::with_capacity(8);
    id.push(CATALOG_ID_PREFIX);
    id.push_str(&to_base36(u128::from(hash.unsigned_abs())));
    id
}

/// Lowercase base-36 rendering, shared with the custom id generator.
pub(crate) fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_deterministic() {
        let first = prompt_id("T", "S", "C", "hello");
        let second = prompt_id("T", "S", "C", "hello");
        assert_eq!(first, second);
        assert!(first.starts_with('p'));
        assert!(first.len() > 1);
    }

    #[test]
    fn test_id_changes_with_any_field() {
        let base = prompt_id("T", "S", "C", "a");
        assert_ne!(base, prompt_id("T", "S", "C", "b"));
        assert_ne!(base, prompt_id("X", "S", "C", "a"));
        assert_ne!(base, prompt_id("T", "X", "C", "a"));
        assert_ne!(base, prompt_id("T", "S", "X", "a"));
    }

    #[test]
    fn test_known_values() {
        // "::::::" never leaves the positive i32 range, so no wrap is involved
        let expected = "::::::".chars().fold(0i64, |acc, c| acc * 31 + c as i64);
        assert_eq!(expected, 1_715_840_448);
        assert_eq!(
            prompt_id("", "", "", ""),
            format!("p{}", to_base36(expected as u128))
        );
    }

    #[test]
    fn test_ids_are_stable_across_implementations() {
        assert_eq!(prompt_id("T", "S", "C", "hello"), "pm7bp76");
        assert_eq!(prompt_id("Work", "Email", "Reply", "Say Thanks"), "pxk4q3n");
    }

    #[test]
    fn test_wrapping_matches_32_bit_arithmetic() {
        let text = "A fairly long prompt that overflows the accumulator many times over";
        let key = format!("Work::Email::Reply::{}", text);
        let mut acc: i64 = 0;
        for unit in key.encode_utf16() {
            acc = ((acc * 31 + unit as i64) as i32) as i64;
        }
        let expected = format!("p{}", to_base36(acc.unsigned_abs() as u128));
        assert_eq!(prompt_id("Work", "Email", "Reply", text), expected);
    }

    #[test]
    fn test_non_ascii_text_hashes_utf16_units() {
        let id = prompt_id("⭐ Favoritter", "Søg", "Kategori", "Skriv et svar 🙂");
        assert_eq!(id, prompt_id("⭐ Favoritter", "Søg", "Kategori", "Skriv et svar 🙂"));
        assert!(id.chars().skip(1).all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(2_147_483_648), "zik0zk");
    }
}
