// ============================================================
// TEMPLATE GENERATOR
// ============================================================
// Emit the canonical CSV template for a schema: exact header set
// and order, plus one example row that validates

use crate::application::use_cases::import_schema::schema_for;
use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportKind;

const ACTION_EXAMPLE_ROW: &[&str] = &[
    "Call 10 lapsed customers",
    "Win back dormant revenue",
    "Owner",
    "Marketing & Sales",
    "14",
    "todo",
    "2025-09-30",
];

const GOAL_EXAMPLE_ROW: &[&str] = &[
    "department",
    "Grow monthly recurring revenue",
    "Sales",
    "Monthly recurring revenue",
    "120000",
    "180000",
    "2025-12-31",
    "Feeds the company revenue target",
];

/// Generate the downloadable CSV template for one import kind.
///
/// A template filled in with rows shaped like the example is guaranteed to
/// parse and validate against the same schema.
pub fn generate_template(kind: ImportKind) -> Result<String> {
    let schema = schema_for(kind);
    let example = match kind {
        ImportKind::Actions => ACTION_EXAMPLE_ROW,
        ImportKind::Goals => GOAL_EXAMPLE_ROW,
    };

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(schema.fields.iter().map(|spec| spec.name))
        .map_err(|e| AppError::Internal(format!("Failed to write template header: {}", e)))?;
    writer
        .write_record(example)
        .map_err(|e| AppError::Internal(format!("Failed to write template example: {}", e)))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush template: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("Template is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::import_engine::{
        ImportEngine, ImportOptions, ImportOutcome,
    };
    use crate::domain::import::CancellationToken;

    #[test]
    fn test_action_template_headers_match_schema_order() {
        let template = generate_template(ImportKind::Actions).unwrap();
        let header_line = template.lines().next().unwrap();
        assert_eq!(
            header_line,
            "title,why,owner_role,engine,eta_days,status,due_date"
        );
    }

    #[test]
    fn test_goal_template_headers_match_schema_order() {
        let template = generate_template(ImportKind::Goals).unwrap();
        let header_line = template.lines().next().unwrap();
        assert_eq!(
            header_line,
            "level,title,department,metric,current,target,due_date,alignment_statement"
        );
    }

    #[tokio::test]
    async fn test_action_template_round_trips() {
        let mut content = generate_template(ImportKind::Actions).unwrap();
        content.push_str("Tighten invoice follow-up,Cut overdue receivables,Finance,Finance,30,doing,2025-10-31\n");

        let outcome = ImportEngine::new()
            .run(
                &content,
                ImportKind::Actions,
                &ImportOptions::default(),
                &CancellationToken::new(),
                |_| {},
            )
            .await
            .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(result.success);
                assert_eq!(result.valid_rows, 2);
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }

    #[tokio::test]
    async fn test_goal_template_round_trips() {
        let mut content = generate_template(ImportKind::Goals).unwrap();
        content.push_str("north_star,Become the market leader,,,,,,\n");

        let outcome = ImportEngine::new()
            .run(
                &content,
                ImportKind::Goals,
                &ImportOptions::default(),
                &CancellationToken::new(),
                |_| {},
            )
            .await
            .unwrap();

        match outcome {
            ImportOutcome::Completed(result) => {
                assert!(result.success);
                assert_eq!(result.valid_rows, 2);
            }
            ImportOutcome::Cancelled => panic!("run was unexpectedly cancelled"),
        }
    }
}
