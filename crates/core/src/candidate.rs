use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of profile fields collected during screening.
///
/// Declaration order is the canonical collection order: identity first,
/// contact details, then role and stack. `missing_fields` and the
/// info-gathering prompts iterate in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    FullName,
    Email,
    Phone,
    Experience,
    DesiredPosition,
    Location,
    TechStack,
}

impl CandidateField {
    pub const ALL: [CandidateField; 7] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::Experience,
        Self::DesiredPosition,
        Self::Location,
        Self::TechStack,
    ];

    /// Snake_case key used in extraction JSON payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Experience => "experience",
            Self::DesiredPosition => "desired_position",
            Self::Location => "location",
            Self::TechStack => "tech_stack",
        }
    }

    /// Human-readable label: underscore to space, Title Case.
    pub fn display_name(&self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// The partially-filled candidate profile assembled across turns.
///
/// Values are always non-empty strings. Merges are additive: a field, once
/// set, can change to another non-empty value (last-extracted-non-empty
/// wins) but is never cleared back to absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    fields: BTreeMap<CandidateField, String>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CandidateField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Stores a value for `field`. Empty or whitespace-only values are
    /// ignored so a previously-set field is never overwritten with nothing.
    pub fn set(&mut self, field: CandidateField, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.fields.insert(field, trimmed.to_string());
    }

    /// Fields still absent, in declared collection order.
    pub fn missing_fields(&self) -> Vec<CandidateField> {
        CandidateField::ALL
            .into_iter()
            .filter(|field| !self.fields.contains_key(field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders set fields as `"<Title Case Name>: <value>"` lines, one per
    /// field in declared order. Absent fields are omitted entirely.
    pub fn render_summary(&self) -> String {
        CandidateField::ALL
            .into_iter()
            .filter_map(|field| {
                self.get(field).map(|value| format!("{}: {value}", field.display_name()))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateField, CandidateRecord};

    #[test]
    fn display_names_are_title_cased() {
        assert_eq!(CandidateField::FullName.display_name(), "Full Name");
        assert_eq!(CandidateField::Email.display_name(), "Email");
        assert_eq!(CandidateField::DesiredPosition.display_name(), "Desired Position");
        assert_eq!(CandidateField::TechStack.display_name(), "Tech Stack");
    }

    #[test]
    fn keys_round_trip_through_from_key() {
        for field in CandidateField::ALL {
            assert_eq!(CandidateField::from_key(field.key()), Some(field));
        }
        assert_eq!(CandidateField::from_key("favourite_colour"), None);
    }

    #[test]
    fn missing_fields_follow_declared_order() {
        let mut record = CandidateRecord::new();
        record.set(CandidateField::Phone, "+47 555 0100");
        record.set(CandidateField::FullName, "Ana");

        assert_eq!(
            record.missing_fields(),
            vec![
                CandidateField::Email,
                CandidateField::Experience,
                CandidateField::DesiredPosition,
                CandidateField::Location,
                CandidateField::TechStack,
            ]
        );
    }

    #[test]
    fn empty_values_never_clear_a_set_field() {
        let mut record = CandidateRecord::new();
        record.set(CandidateField::Email, "ana@example.com");
        record.set(CandidateField::Email, "");
        record.set(CandidateField::Email, "   ");

        assert_eq!(record.get(CandidateField::Email), Some("ana@example.com"));
    }

    #[test]
    fn last_non_empty_value_wins() {
        let mut record = CandidateRecord::new();
        record.set(CandidateField::Location, "Oslo");
        record.set(CandidateField::Location, "Bergen");

        assert_eq!(record.get(CandidateField::Location), Some("Bergen"));
    }

    #[test]
    fn record_is_complete_once_every_field_is_set() {
        let mut record = CandidateRecord::new();
        for field in CandidateField::ALL {
            assert!(!record.is_complete());
            record.set(field, "value");
        }
        assert!(record.is_complete());
        assert_eq!(record.len(), CandidateField::ALL.len());
    }

    #[test]
    fn summary_lists_only_set_fields_in_order() {
        let mut record = CandidateRecord::new();
        record.set(CandidateField::TechStack, "Rust, Postgres");
        record.set(CandidateField::FullName, "Bo");

        assert_eq!(record.render_summary(), "Full Name: Bo\nTech Stack: Rust, Postgres");
    }

    #[test]
    fn summary_of_empty_record_is_empty() {
        assert_eq!(CandidateRecord::new().render_summary(), "");
        assert!(CandidateRecord::new().is_empty());
    }
}
