// Static column contracts for the two CSV import types.
//
// Goal: keep every per-field rule (type, length, range, enum membership,
// cross-field requirement) in one table per schema instead of scattering
// checks through the validator.

use crate::domain::import::{ActionStatus, Department, Engine, GoalLevel, ImportKind, OwnerRole};

/// How one column's value is parsed and constrained.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free text with a maximum length, counted after sanitization.
    Text { max_len: usize },
    /// Exact membership in a fixed token set.
    Enumerated { allowed: &'static [&'static str] },
    /// Whole number within an inclusive range.
    Integer { min: i64, max: i64 },
    /// Floating point number.
    Number,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
}

/// Conditional requirement: the field is mandatory when another field of
/// the same row equals a given token.
#[derive(Debug, Clone, Copy)]
pub struct RequiredIf {
    pub field: &'static str,
    pub equals: &'static str,
}

/// One column's contract within a schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub required_if: Option<RequiredIf>,
}

/// Named set of field contracts governing one import type.
#[derive(Debug, Clone, Copy)]
pub struct ImportSchema {
    pub kind: ImportKind,
    pub fields: &'static [FieldSpec],
}

pub const ACTION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        required: true,
        kind: FieldKind::Text { max_len: 100 },
        required_if: None,
    },
    FieldSpec {
        name: "why",
        required: true,
        kind: FieldKind::Text { max_len: 200 },
        required_if: None,
    },
    FieldSpec {
        name: "owner_role",
        required: true,
        kind: FieldKind::Enumerated {
            allowed: OwnerRole::ALLOWED,
        },
        required_if: None,
    },
    FieldSpec {
        name: "engine",
        required: true,
        kind: FieldKind::Enumerated {
            allowed: Engine::ALLOWED,
        },
        required_if: None,
    },
    FieldSpec {
        name: "eta_days",
        required: true,
        kind: FieldKind::Integer { min: 1, max: 365 },
        required_if: None,
    },
    FieldSpec {
        name: "status",
        required: true,
        kind: FieldKind::Enumerated {
            allowed: ActionStatus::ALLOWED,
        },
        required_if: None,
    },
    FieldSpec {
        name: "due_date",
        required: false,
        kind: FieldKind::Date,
        required_if: None,
    },
];

pub const GOAL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "level",
        required: true,
        kind: FieldKind::Enumerated {
            allowed: GoalLevel::ALLOWED,
        },
        required_if: None,
    },
    FieldSpec {
        name: "title",
        required: true,
        kind: FieldKind::Text { max_len: 100 },
        required_if: None,
    },
    FieldSpec {
        name: "department",
        required: false,
        kind: FieldKind::Enumerated {
            allowed: Department::ALLOWED,
        },
        required_if: Some(RequiredIf {
            field: "level",
            equals: "department",
        }),
    },
    FieldSpec {
        name: "metric",
        required: false,
        kind: FieldKind::Text { max_len: 50 },
        required_if: None,
    },
    FieldSpec {
        name: "current",
        required: false,
        kind: FieldKind::Number,
        required_if: None,
    },
    FieldSpec {
        name: "target",
        required: false,
        kind: FieldKind::Number,
        required_if: None,
    },
    FieldSpec {
        name: "due_date",
        required: false,
        kind: FieldKind::Date,
        required_if: None,
    },
    FieldSpec {
        name: "alignment_statement",
        required: false,
        kind: FieldKind::Text { max_len: 200 },
        required_if: Some(RequiredIf {
            field: "level",
            equals: "department",
        }),
    },
];

pub const ACTIONS_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::Actions,
    fields: ACTION_FIELDS,
};

pub const GOALS_SCHEMA: ImportSchema = ImportSchema {
    kind: ImportKind::Goals,
    fields: GOAL_FIELDS,
};

pub fn schema_for(kind: ImportKind) -> &'static ImportSchema {
    match kind {
        ImportKind::Actions => &ACTIONS_SCHEMA,
        ImportKind::Goals => &GOALS_SCHEMA,
    }
}

// NOTE:
// - Headers are matched against a normalized form (lowercase,
//   space/dash -> underscore), so "Owner Role" and "owner_role" both bind.
pub fn normalize_header(s: &str) -> String {
    s.trim()
        .trim_matches('"')
        .to_ascii_lowercase()
        .replace(' ', "_")
        .replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lookup_by_kind() {
        assert_eq!(schema_for(ImportKind::Actions).fields.len(), 7);
        assert_eq!(schema_for(ImportKind::Goals).fields.len(), 8);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Owner Role "), "owner_role");
        assert_eq!(normalize_header("due-date"), "due_date");
        assert_eq!(normalize_header("\"title\""), "title");
    }

    #[test]
    fn test_conditional_fields_are_not_required_headers() {
        let conditional: Vec<_> = GOAL_FIELDS
            .iter()
            .filter(|f| f.required_if.is_some())
            .collect();
        assert_eq!(conditional.len(), 2);
        assert!(conditional.iter().all(|f| !f.required));
    }
}
