//! The persisted form of atom trees.
//!
//! With the `serde` feature, [`AtomRecord`] serializes to the JSON shape
//! `{"type": "...", ...}` where fields that do not apply to the atom kind are omitted.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::atom::{Atom, AtomKind};
use crate::context::{Context, MathStyle};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtomRecord {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: AtomKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub body: Option<Vec<AtomRecord>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mathstyle: Option<MathStyle>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub superscript: Option<Vec<AtomRecord>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub subscript: Option<Vec<AtomRecord>>,
    /// Only for `\mathchoice`. A well-formed record has exactly four entries.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub choices: Option<Vec<Vec<AtomRecord>>>,
}

impl AtomRecord {
    /// A record with only the type tag set.
    pub fn new(kind: AtomKind) -> Self {
        AtomRecord {
            kind,
            value: None,
            body: None,
            mathstyle: None,
            superscript: None,
            subscript: None,
            choices: None,
        }
    }
}

/// Records of a list of atoms, leaving out list-head placeholders.
pub fn to_records(atoms: &[Atom]) -> Vec<AtomRecord> {
    crate::atom::persisted(atoms)
}

/// Rebuild a list of atoms from its records.
pub fn parse_list(records: &[AtomRecord], context: &mut Context) -> Result<Vec<Atom>, RecordError> {
    records
        .iter()
        .map(|record| Atom::from_record(record, context))
        .collect()
}

/// A record that cannot be turned back into an atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A `\mathchoice` record without exactly four variants.
    ChoiceCount { found: usize },
    /// A field that the atom kind requires is absent.
    MissingField {
        kind: AtomKind,
        field: &'static str,
    },
    /// A record of one kind was handed to the decoder of another.
    UnexpectedKind { expected: AtomKind, found: AtomKind },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::ChoiceCount { found } => write!(
                f,
                "A \"choice\" record needs exactly 4 variants, but {found} were found."
            ),
            RecordError::MissingField { kind, field } => write!(
                f,
                "A \"{}\" record needs a \"{field}\" field.",
                kind.as_str()
            ),
            RecordError::UnexpectedKind { expected, found } => write!(
                f,
                "Expected a \"{}\" record, but found a \"{}\" record.",
                expected.as_str(),
                found.as_str()
            ),
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::SymbolAtom;

    #[test]
    fn missing_fields() {
        let mut context = Context::default();
        let problems = [
            (AtomKind::Mord, "value"),
            (AtomKind::Group, "body"),
            (AtomKind::Msubsup, "superscript"),
        ];
        for (kind, field) in problems {
            let err = parse_list(&[AtomRecord::new(kind)], &mut context).unwrap_err();
            assert_eq!(err, RecordError::MissingField { kind, field });
        }
    }

    #[test]
    fn first_records_are_restored_as_is() {
        let mut context = Context::default();
        let atoms = parse_list(&[AtomRecord::new(AtomKind::First)], &mut context).unwrap();
        assert!(atoms[0].is_first());
    }

    #[test]
    fn to_records_strips_first() {
        let mut context = Context::default();
        let atoms = vec![
            Atom::first(&mut context),
            Atom::Symbol(SymbolAtom::new(AtomKind::Mrel, "=".into(), &mut context)),
        ];
        let records = to_records(&atoms);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AtomKind::Mrel);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RecordError::ChoiceCount { found: 3 }.to_string(),
            "A \"choice\" record needs exactly 4 variants, but 3 were found."
        );
        assert_eq!(
            RecordError::MissingField {
                kind: AtomKind::Group,
                field: "body"
            }
            .to_string(),
            "A \"group\" record needs a \"body\" field."
        );
        assert_eq!(
            RecordError::UnexpectedKind {
                expected: AtomKind::Choice,
                found: AtomKind::Mord
            }
            .to_string(),
            "Expected a \"choice\" record, but found a \"mord\" record."
        );
    }
}
