//! Contact records, the contact index, and the contact-store boundary.
//!
//! The [`ContactIndex`] maps every identifier form a contact can appear
//! under (phone variants, lowercased emails) to that contact's display
//! name. It is built once per run, before any file is processed, and is
//! read-only afterwards; callers pass it around by reference.
//!
//! The system contact database sits behind the [`ContactStore`] trait so
//! the pipeline can be exercised with an in-memory store in tests. The
//! production [`SystemContactStore`] shells out to `osascript` on macOS;
//! on other platforms it reports access as denied, which callers degrade
//! to an empty index (renaming disabled, run continues).

use std::collections::HashMap;
#[cfg(target_os = "macos")]
use std::process::Command;

use crate::error::Result;
#[cfg(target_os = "macos")]
use crate::error::TidyError;
use crate::phone::phone_variants;

/// Outcome of the one-time contact access request.
///
/// The request blocks until the user (or the OS) decides; there is no
/// timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// Contact records may be enumerated.
    Granted,
    /// Access was refused; the run continues without renaming.
    Denied,
}

/// One record from the contact store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub given_name: String,
    pub family_name: String,
    pub organization: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl ContactRecord {
    /// Returns the display name for this record, if it has one.
    ///
    /// Given and family name joined by a space, falling back to the
    /// organization name. Records with neither are unusable and skipped
    /// by the index builder.
    pub fn display_name(&self) -> Option<String> {
        let full = [self.given_name.trim(), self.family_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return Some(full);
        }
        let org = self.organization.trim();
        if org.is_empty() {
            None
        } else {
            Some(org.to_string())
        }
    }
}

/// Read-only mapping from identifier string to contact display name.
///
/// Built once by [`ContactIndex::from_records`] and never mutated
/// afterwards. Later registrations for an already-present key overwrite
/// the earlier mapping; there is no conflict detection.
#[derive(Debug, Clone, Default)]
pub struct ContactIndex {
    map: HashMap<String, String>,
}

impl ContactIndex {
    /// Creates an empty index. Lookups never hit; renaming is disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from contact records.
    ///
    /// Every phone variant and every lowercased email of each usable
    /// record becomes a key mapping to that record's display name.
    pub fn from_records(records: &[ContactRecord]) -> Self {
        let mut map = HashMap::new();

        for record in records {
            let Some(name) = record.display_name() else {
                continue;
            };
            for phone in &record.phones {
                for variant in phone_variants(phone) {
                    map.insert(variant, name.clone());
                }
            }
            for email in &record.emails {
                let email = email.trim().to_lowercase();
                if !email.is_empty() {
                    map.insert(email, name.clone());
                }
            }
        }

        Self { map }
    }

    /// Looks up the display name for an identifier.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.map.get(identifier).map(String::as_str)
    }

    /// Returns the number of registered identifier keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no identifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// The contact-store collaborator boundary.
///
/// Two operations: a blocking authorization request and a full record
/// enumeration. Nothing else about the store is observable.
pub trait ContactStore {
    /// Requests access to contact records, blocking until a decision is
    /// available.
    fn request_access(&self) -> Result<Authorization>;

    /// Enumerates every contact record the store exposes.
    fn records(&self) -> Result<Vec<ContactRecord>>;
}

/// In-memory contact store for tests and library embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticContactStore {
    records: Vec<ContactRecord>,
    denied: bool,
}

impl StaticContactStore {
    /// Creates a store that grants access to the given records.
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self {
            records,
            denied: false,
        }
    }

    /// Creates a store that denies the access request.
    pub fn denied() -> Self {
        Self {
            records: Vec::new(),
            denied: true,
        }
    }
}

impl ContactStore for StaticContactStore {
    fn request_access(&self) -> Result<Authorization> {
        Ok(if self.denied {
            Authorization::Denied
        } else {
            Authorization::Granted
        })
    }

    fn records(&self) -> Result<Vec<ContactRecord>> {
        Ok(self.records.clone())
    }
}

/// The system contact database.
///
/// On macOS both operations shell out to `osascript` running a short JXA
/// snippet against the Contacts application; the OS permission prompt
/// blocks the authorization probe until the user decides. On other
/// platforms access is always denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemContactStore;

impl SystemContactStore {
    pub fn new() -> Self {
        Self
    }
}

/// JXA probe whose evaluation forces the contacts permission prompt.
#[cfg(target_os = "macos")]
const ACCESS_PROBE: &str = r#"Application("Contacts").people.length"#;

/// JXA dump of all contact records as tab-separated lines:
/// given \t family \t organization \t phone;phone \t email;email
#[cfg(target_os = "macos")]
const RECORD_DUMP: &str = r#"
const people = Application("Contacts").people();
const lines = [];
for (const p of people) {
    const phones = p.phones().map(ph => ph.value()).join(";");
    const emails = p.emails().map(em => em.value()).join(";");
    lines.push([
        p.firstName() || "",
        p.lastName() || "",
        p.organization() || "",
        phones,
        emails,
    ].join("\t"));
}
lines.join("\n");
"#;

#[cfg(target_os = "macos")]
fn run_jxa(script: &str) -> Result<std::process::Output> {
    Command::new("osascript")
        .args(["-l", "JavaScript", "-e", script])
        .output()
        .map_err(|e| TidyError::contact_store(format!("failed to run osascript: {e}")))
}

#[cfg(target_os = "macos")]
impl ContactStore for SystemContactStore {
    fn request_access(&self) -> Result<Authorization> {
        let output = run_jxa(ACCESS_PROBE)?;
        Ok(if output.status.success() {
            Authorization::Granted
        } else {
            Authorization::Denied
        })
    }

    fn records(&self) -> Result<Vec<ContactRecord>> {
        let output = run_jxa(RECORD_DUMP)?;
        if !output.status.success() {
            return Err(TidyError::contact_store(format!(
                "contact enumeration failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(parse_record_dump(&text))
    }
}

#[cfg(not(target_os = "macos"))]
impl ContactStore for SystemContactStore {
    fn request_access(&self) -> Result<Authorization> {
        Ok(Authorization::Denied)
    }

    fn records(&self) -> Result<Vec<ContactRecord>> {
        Ok(Vec::new())
    }
}

/// Parses the tab-separated record dump produced by the JXA snippet.
///
/// Lines with the wrong field count are skipped rather than failing the
/// whole enumeration.
pub fn parse_record_dump(text: &str) -> Vec<ContactRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 5 {
            continue;
        }
        let split_list = |field: &str| -> Vec<String> {
            field
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };
        records.push(ContactRecord {
            given_name: fields[0].trim().to_string(),
            family_name: fields[1].trim().to_string(),
            organization: fields[2].trim().to_string(),
            phones: split_list(fields[3]),
            emails: split_list(fields[4]),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(given: &str, family: &str, org: &str) -> ContactRecord {
        ContactRecord {
            given_name: given.into(),
            family_name: family.into(),
            organization: org.into(),
            ..ContactRecord::default()
        }
    }

    #[test]
    fn test_display_name_full() {
        assert_eq!(
            record("Jane", "Doe", "").display_name(),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_display_name_single_half() {
        assert_eq!(record("Jane", "", "").display_name(), Some("Jane".to_string()));
        assert_eq!(record("", "Doe", "").display_name(), Some("Doe".to_string()));
    }

    #[test]
    fn test_display_name_organization_fallback() {
        assert_eq!(
            record("", "", "Acme Corp").display_name(),
            Some("Acme Corp".to_string())
        );
    }

    #[test]
    fn test_display_name_unusable() {
        assert_eq!(record("", "  ", "").display_name(), None);
    }

    #[test]
    fn test_index_registers_phone_variants() {
        let mut rec = record("Jane", "Doe", "");
        rec.phones.push("+14155551234".into());
        let index = ContactIndex::from_records(&[rec]);

        for key in ["+14155551234", "4155551234", "14155551234"] {
            assert_eq!(index.get(key), Some("Jane Doe"), "missing key {key}");
        }
    }

    #[test]
    fn test_index_lowercases_emails() {
        let mut rec = record("Jane", "Doe", "");
        rec.emails.push("Jane.Doe@Example.COM".into());
        let index = ContactIndex::from_records(&[rec]);

        assert_eq!(index.get("jane.doe@example.com"), Some("Jane Doe"));
        assert_eq!(index.get("Jane.Doe@Example.COM"), None);
    }

    #[test]
    fn test_index_skips_unusable_records() {
        let mut rec = record("", "", "");
        rec.phones.push("+14155551234".into());
        let index = ContactIndex::from_records(&[rec]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_last_write_wins() {
        let mut first = record("Jane", "Doe", "");
        first.phones.push("+14155551234".into());
        let mut second = record("John", "Smith", "");
        second.phones.push("+14155551234".into());

        let index = ContactIndex::from_records(&[first, second]);
        assert_eq!(index.get("+14155551234"), Some("John Smith"));
    }

    #[test]
    fn test_empty_index() {
        let index = ContactIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.get("+14155551234"), None);
    }

    #[test]
    fn test_static_store_grants() {
        let store = StaticContactStore::new(vec![record("Jane", "Doe", "")]);
        assert_eq!(store.request_access().unwrap(), Authorization::Granted);
        assert_eq!(store.records().unwrap().len(), 1);
    }

    #[test]
    fn test_static_store_denies() {
        let store = StaticContactStore::denied();
        assert_eq!(store.request_access().unwrap(), Authorization::Denied);
    }

    #[test]
    fn test_parse_record_dump() {
        let dump = "Jane\tDoe\t\t+14155551234;+14155556789\tjane@x.com\n\
                    \t\tAcme Corp\t\tinfo@acme.example\n\
                    malformed line without tabs";
        let records = parse_record_dump(dump);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].given_name, "Jane");
        assert_eq!(records[0].phones, vec!["+14155551234", "+14155556789"]);
        assert_eq!(records[0].emails, vec!["jane@x.com"]);

        assert_eq!(records[1].organization, "Acme Corp");
        assert!(records[1].phones.is_empty());
    }

    #[test]
    fn test_parse_record_dump_empty() {
        assert!(parse_record_dump("").is_empty());
    }
}
