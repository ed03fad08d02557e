//! Identifier-to-name resolution.
//!
//! Matches a file's raw identifiers against the [`ContactIndex`] and
//! produces the ordered, deduplicated list of display names that will
//! form the new filename. An empty result means "no rename".

use crate::contacts::ContactIndex;

/// Resolves raw identifiers to display names.
///
/// Identifiers are looked up in order; each hit appends its display name
/// unless that exact name is already present. First-seen order is
/// preserved, so the variant set of the first participant decides name
/// order in a group chat filename.
///
/// # Example
///
/// ```rust
/// use msgtidy::contacts::{ContactIndex, ContactRecord};
/// use msgtidy::resolver::resolve_names;
///
/// let record = ContactRecord {
///     given_name: "Jane".into(),
///     family_name: "Doe".into(),
///     phones: vec!["+14155551234".into()],
///     ..ContactRecord::default()
/// };
/// let index = ContactIndex::from_records(&[record]);
///
/// let ids = vec!["4155551234".to_string(), "+14155551234".to_string()];
/// assert_eq!(resolve_names(&ids, &index), vec!["Jane Doe"]);
/// ```
pub fn resolve_names(identifiers: &[String], index: &ContactIndex) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for identifier in identifiers {
        if let Some(name) = index.get(identifier) {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
    }

    names
}
