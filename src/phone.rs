//! Phone number variant generation.
//!
//! A single phone number shows up in export filenames and contact records
//! in several textual forms: `+14155551234`, `14155551234`, `4155551234`,
//! `(415) 555-1234`, and so on. [`phone_variants`] produces the canonical
//! set of forms a number may appear in, so the same set can key both sides
//! of a lookup.
//!
//! Generation is a pure function of the input string: deterministic, no
//! I/O, no error conditions. Malformed input simply yields no productive
//! variants.
//!
//! # Example
//!
//! ```rust
//! use msgtidy::phone::phone_variants;
//!
//! let variants = phone_variants("(415) 555-1234");
//! assert!(variants.contains(&"+14155551234".to_string()));
//! assert!(variants.contains(&"4155551234".to_string()));
//! ```

/// Strips every character except digits and a leading `+`.
fn clean(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .char_indices()
        .filter(|&(i, c)| c.is_ascii_digit() || (c == '+' && i == 0))
        .map(|(_, c)| c)
        .collect()
}

/// Produces the ordered, duplicate-free set of textual forms a phone
/// number may appear in.
///
/// Recognized shapes after cleaning:
/// - `+1` followed by 10 digits (North American with country code)
/// - `1` followed by 10 digits
/// - exactly 10 digits
/// - any other `+`-prefixed string (international, kept as-is)
///
/// The original untouched input is always appended when it differs from
/// every generated variant, so raw forms still match each other even when
/// no shape is recognized.
pub fn phone_variants(raw: &str) -> Vec<String> {
    let cleaned = clean(raw);
    let mut variants: Vec<String> = Vec::new();

    if cleaned.len() == 12 && cleaned.starts_with("+1") {
        variants.push(cleaned.clone());
        variants.push(cleaned[2..].to_string());
        variants.push(format!("1{}", &cleaned[2..]));
    } else if cleaned.len() == 11 && cleaned.starts_with('1') {
        variants.push(format!("+{cleaned}"));
        variants.push(cleaned.clone());
        variants.push(cleaned[1..].to_string());
    } else if cleaned.len() == 10 && !cleaned.starts_with('+') {
        variants.push(format!("+1{cleaned}"));
        variants.push(format!("1{cleaned}"));
        variants.push(cleaned.clone());
    } else if cleaned.starts_with('+') {
        variants.push(cleaned.clone());
    }

    if !raw.is_empty() && !variants.iter().any(|v| v == raw) {
        variants.push(raw.to_string());
    }

    variants.retain(|v| !v.is_empty());
    variants
}
