// ============================================================
// ROW VALIDATOR
// ============================================================
// Map one schema over one parsed row, producing either a typed
// domain record or the full list of field errors for that row

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::application::use_cases::import_schema::{
    normalize_header, FieldKind, FieldSpec, ImportSchema,
};
use crate::domain::csv::RawRow;
use crate::domain::error::{AppError, Result};
use crate::domain::import::{
    ActionRecord, ActionStatus, Department, Engine, GoalLevel, GoalRecord, ImportKind,
    ImportedRecord, OwnerRole, ValidationError,
};

/// Outcome of validating a single data row.
#[derive(Debug)]
pub enum RowOutcome {
    Valid(ImportedRecord),
    /// Every field error found in the row; validation does not stop at the
    /// first failure.
    Invalid(Vec<ValidationError>),
}

/// A coerced field value, keyed by spec name after a row passes validation.
#[derive(Debug, Clone)]
enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
}

/// Validates rows of one upload against one schema.
///
/// Header binding is by normalized name, not position, so column order in
/// the upload is free. Unknown extra columns are ignored.
pub struct RowValidator<'a> {
    schema: &'a ImportSchema,
    columns: HashMap<String, usize>,
}

impl<'a> RowValidator<'a> {
    pub fn new(schema: &'a ImportSchema, headers: &[String]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(position, header)| (normalize_header(header), position))
            .collect();

        Self { schema, columns }
    }

    /// Required columns absent from the header line, one error each at
    /// row 0. Any result here is fatal for the whole run: no data row can
    /// be validated without its required columns.
    pub fn missing_required_headers(&self) -> Vec<ValidationError> {
        self.schema
            .fields
            .iter()
            .filter(|spec| spec.required && !self.columns.contains_key(spec.name))
            .map(|spec| ValidationError::missing_header(spec.name))
            .collect()
    }

    /// Validate one data row against every field spec in schema order.
    pub fn validate_row(&self, row: &RawRow) -> Result<RowOutcome> {
        let mut errors = Vec::new();
        let mut values: HashMap<&'static str, FieldValue> = HashMap::new();

        for spec in self.schema.fields {
            let cell = self.cell_for(spec.name, row);

            if cell.is_empty() {
                if spec.required || self.conditionally_required(spec, row) {
                    errors.push(ValidationError::new(
                        row.index,
                        spec.name,
                        "Missing required field".to_string(),
                    ));
                }
                continue;
            }

            match parse_field(spec, cell, row.index) {
                Ok(value) => {
                    values.insert(spec.name, value);
                }
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Ok(RowOutcome::Invalid(errors));
        }

        let record = self.build_record(&values)?;
        Ok(RowOutcome::Valid(record))
    }

    fn cell_for<'r>(&self, name: &str, row: &'r RawRow) -> &'r str {
        self.columns
            .get(name)
            .and_then(|&position| row.cell(position))
            .unwrap_or("")
    }

    fn conditionally_required(&self, spec: &FieldSpec, row: &RawRow) -> bool {
        match &spec.required_if {
            Some(rule) => self.cell_for(rule.field, row) == rule.equals,
            None => false,
        }
    }

    fn build_record(&self, values: &HashMap<&'static str, FieldValue>) -> Result<ImportedRecord> {
        match self.schema.kind {
            ImportKind::Actions => {
                let record = ActionRecord {
                    title: take_text(values, "title")?,
                    why: take_text(values, "why")?,
                    owner_role: take_token(values, "owner_role", OwnerRole::parse)?,
                    engine: take_token(values, "engine", Engine::parse)?,
                    eta_days: take_integer(values, "eta_days")?,
                    status: take_token(values, "status", ActionStatus::parse)?,
                    due_date: opt_date(values, "due_date"),
                };
                Ok(ImportedRecord::Action(record))
            }
            ImportKind::Goals => {
                let record = GoalRecord {
                    level: take_token(values, "level", GoalLevel::parse)?,
                    title: take_text(values, "title")?,
                    department: opt_token(values, "department", Department::parse)?,
                    metric: opt_text(values, "metric"),
                    current: opt_number(values, "current"),
                    target: opt_number(values, "target"),
                    due_date: opt_date(values, "due_date"),
                    alignment_statement: opt_text(values, "alignment_statement"),
                };
                Ok(ImportedRecord::Goal(record))
            }
        }
    }
}

/// Coerce one non-empty cell by its spec kind.
fn parse_field(
    spec: &FieldSpec,
    cell: &str,
    row: usize,
) -> std::result::Result<FieldValue, ValidationError> {
    match spec.kind {
        FieldKind::Text { max_len } => {
            if cell.chars().count() > max_len {
                Err(ValidationError::with_value(
                    row,
                    spec.name,
                    format!("Must be at most {} characters", max_len),
                    cell,
                ))
            } else {
                Ok(FieldValue::Text(cell.to_string()))
            }
        }
        FieldKind::Enumerated { allowed } => {
            if allowed.contains(&cell) {
                Ok(FieldValue::Text(cell.to_string()))
            } else {
                Err(ValidationError::with_value(
                    row,
                    spec.name,
                    format!("Must be one of: {}", allowed.join(", ")),
                    cell,
                ))
            }
        }
        FieldKind::Integer { min, max } => match cell.parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => Ok(FieldValue::Integer(n)),
            _ => Err(ValidationError::with_value(
                row,
                spec.name,
                format!("Must be a whole number between {} and {}", min, max),
                cell,
            )),
        },
        FieldKind::Number => match cell.parse::<f64>() {
            Ok(n) => Ok(FieldValue::Number(n)),
            Err(_) => Err(ValidationError::with_value(
                row,
                spec.name,
                "Must be a number".to_string(),
                cell,
            )),
        },
        FieldKind::Date => match NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
            Ok(date) => Ok(FieldValue::Date(date)),
            Err(_) => Err(ValidationError::with_value(
                row,
                spec.name,
                "Must be a valid date in YYYY-MM-DD format".to_string(),
                cell,
            )),
        },
    }
}

// Typed accessors for the validated value map. A miss here means the
// schema table and the record builder disagree, which is a bug, not a
// user input problem.

fn take_text(values: &HashMap<&'static str, FieldValue>, name: &str) -> Result<String> {
    match values.get(name) {
        Some(FieldValue::Text(s)) => Ok(s.clone()),
        _ => Err(missing_validated(name)),
    }
}

fn opt_text(values: &HashMap<&'static str, FieldValue>, name: &str) -> Option<String> {
    match values.get(name) {
        Some(FieldValue::Text(s)) => Some(s.clone()),
        _ => None,
    }
}

fn take_integer(values: &HashMap<&'static str, FieldValue>, name: &str) -> Result<i64> {
    match values.get(name) {
        Some(FieldValue::Integer(n)) => Ok(*n),
        _ => Err(missing_validated(name)),
    }
}

fn opt_number(values: &HashMap<&'static str, FieldValue>, name: &str) -> Option<f64> {
    match values.get(name) {
        Some(FieldValue::Number(n)) => Some(*n),
        _ => None,
    }
}

fn opt_date(values: &HashMap<&'static str, FieldValue>, name: &str) -> Option<NaiveDate> {
    match values.get(name) {
        Some(FieldValue::Date(d)) => Some(*d),
        _ => None,
    }
}

fn take_token<T>(
    values: &HashMap<&'static str, FieldValue>,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T> {
    match values.get(name) {
        Some(FieldValue::Text(s)) => parse(s).ok_or_else(|| missing_validated(name)),
        _ => Err(missing_validated(name)),
    }
}

fn opt_token<T>(
    values: &HashMap<&'static str, FieldValue>,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match values.get(name) {
        Some(FieldValue::Text(s)) => parse(s)
            .map(Some)
            .ok_or_else(|| missing_validated(name)),
        _ => Ok(None),
    }
}

fn missing_validated(name: &str) -> AppError {
    AppError::Internal(format!("Validated field missing or mistyped: {}", name))
}
