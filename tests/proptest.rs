//! Property-based tests for msgtidy.
//!
//! These tests generate random inputs to find edge cases in the pure
//! text-processing core: phone variant generation, filename sanitizing,
//! and tokenization.

use proptest::prelude::*;

use msgtidy::contacts::{ContactIndex, ContactRecord};
use msgtidy::phone::phone_variants;
use msgtidy::rename::sanitize_name;
use msgtidy::resolver::resolve_names;
use msgtidy::tokenizer::raw_identifiers;

/// A 10-digit number as a string.
fn arb_ten_digits() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{10}").expect("valid strategy regex")
}

/// Arbitrary phone-ish input: digits mixed with common formatting.
fn arb_phone_input() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r"\+?[0-9() .\-]{0,16}").expect("valid strategy regex")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================
    // PHONE VARIANT PROPERTIES
    // ============================================

    /// Ten digits expand to exactly the three canonical forms.
    #[test]
    fn ten_digits_expand_canonically(d in arb_ten_digits()) {
        let variants = phone_variants(&d);
        prop_assert_eq!(
            variants,
            vec![format!("+1{d}"), format!("1{d}"), d]
        );
    }

    /// Variant generation is deterministic.
    #[test]
    fn variants_are_deterministic(input in arb_phone_input()) {
        prop_assert_eq!(phone_variants(&input), phone_variants(&input));
    }

    /// Variant sets never contain duplicates or empty strings.
    #[test]
    fn variants_are_clean(input in arb_phone_input()) {
        let variants = phone_variants(&input);
        prop_assert!(variants.iter().all(|v| !v.is_empty()));
        for (i, v) in variants.iter().enumerate() {
            prop_assert!(!variants[..i].contains(v), "duplicate variant {v}");
        }
    }

    /// All three canonical forms of a number generate the same set.
    #[test]
    fn canonical_forms_agree(d in arb_ten_digits()) {
        let from_bare: std::collections::HashSet<String> =
            phone_variants(&d).into_iter().collect();
        let from_plus: std::collections::HashSet<String> =
            phone_variants(&format!("+1{d}")).into_iter().collect();
        let from_one: std::collections::HashSet<String> =
            phone_variants(&format!("1{d}")).into_iter().collect();
        prop_assert_eq!(&from_bare, &from_plus);
        prop_assert_eq!(&from_bare, &from_one);
    }

    /// Non-empty input always yields at least the original form.
    #[test]
    fn original_form_survives(input in arb_phone_input()) {
        prop_assume!(!input.is_empty());
        let variants = phone_variants(&input);
        prop_assert!(!variants.is_empty());
    }

    // ============================================
    // SANITIZE PROPERTIES
    // ============================================

    /// Sanitized names never contain forbidden characters.
    #[test]
    fn sanitize_removes_forbidden(name in ".{0,40}") {
        let out = sanitize_name(&name);
        for c in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            prop_assert!(!out.contains(c), "forbidden {c:?} in {out:?}");
        }
    }

    /// No underscore runs, no leading/trailing underscores.
    #[test]
    fn sanitize_normalizes_underscores(name in ".{0,40}") {
        let out = sanitize_name(&name);
        prop_assert!(!out.contains("__"));
        prop_assert!(!out.starts_with('_'));
        prop_assert!(!out.ends_with('_'));
    }

    /// Sanitizing is idempotent.
    #[test]
    fn sanitize_is_idempotent(name in ".{0,40}") {
        let once = sanitize_name(&name);
        prop_assert_eq!(sanitize_name(&once), once);
    }

    /// Clean names pass through unchanged.
    #[test]
    fn sanitize_preserves_clean_names(name in "[A-Za-z][A-Za-z ,.]{0,30}[A-Za-z]") {
        prop_assert_eq!(sanitize_name(&name), name);
    }

    // ============================================
    // TOKENIZER / RESOLVER PROPERTIES
    // ============================================

    /// Every identifier from a single phone part is a variant of it.
    #[test]
    fn tokenizer_matches_variant_generator(d in arb_ten_digits()) {
        prop_assert_eq!(raw_identifiers(&d), phone_variants(&d));
    }

    /// Resolved names contain no duplicates and only known names.
    #[test]
    fn resolver_output_is_deduplicated(phones in proptest::collection::vec(arb_ten_digits(), 1..5)) {
        let records: Vec<ContactRecord> = phones
            .iter()
            .enumerate()
            .map(|(i, phone)| ContactRecord {
                given_name: format!("Contact{}", i % 2),
                phones: vec![phone.clone()],
                ..ContactRecord::default()
            })
            .collect();
        let index = ContactIndex::from_records(&records);

        let identifiers: Vec<String> = phones
            .iter()
            .flat_map(|p| phone_variants(p))
            .collect();
        let names = resolve_names(&identifiers, &index);

        for (i, name) in names.iter().enumerate() {
            prop_assert!(!names[..i].contains(name), "duplicate name {name}");
        }
        prop_assert!(names.len() <= 2);
    }
}
