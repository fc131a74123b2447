use std::collections::BTreeMap;

use serde::Deserialize;

use repoql_core::{Operation, RawCondition, Statement, StatementGenerator};

use crate::EntityDefinition;

/// One named statement-generation case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatementCase {
    pub entity: EntityDefinition,
    pub operation: String,
    pub r#where: Option<String>,
    pub top: Option<usize>,
    /// Exact expected statement text.
    pub expected: Option<String>,
    /// Substring expected in the failure message; the case passes only if
    /// generation fails accordingly.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseResult {
    Passed,
    Failed(String),
}

pub fn load_statement_cases_from_str(
    yaml: &str,
) -> Result<BTreeMap<String, StatementCase>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Runs one case end to end: resolve the entity definition, generate the
/// statement, and compare against the expectation.
pub fn run_statement_case(case: &StatementCase) -> CaseResult {
    match execute_case(case) {
        Ok(statement) => evaluate_success(case, &statement),
        Err(error) => evaluate_failure(case, &error.to_string()),
    }
}

fn execute_case(case: &StatementCase) -> repoql_core::Result<Statement> {
    let operation: Operation = case.operation.parse()?;
    let (provider, entity) = case.entity.clone().into_provider()?;
    let generator = StatementGenerator::new(&provider);
    let condition = case.r#where.as_deref().map(RawCondition::new);
    let condition_ref = condition
        .as_ref()
        .map(|condition| condition as &dyn repoql_core::ConditionGroup);

    if operation == Operation::Select {
        let sql = generator.select(&entity, condition_ref, None, case.top)?;
        let mode = generator.mode_cache().resolve(&provider, &entity);
        return Ok(Statement { sql, mode });
    }

    generator.generate(&entity, operation, condition_ref)
}

fn evaluate_success(case: &StatementCase, statement: &Statement) -> CaseResult {
    if let Some(expected_error) = &case.error {
        return CaseResult::Failed(format!(
            "expected failure containing `{expected_error}`, got statement `{}`",
            statement.sql
        ));
    }
    if let Some(expected) = &case.expected
        && expected != &statement.sql
    {
        return CaseResult::Failed(format!(
            "statement mismatch:\n  expected: {expected}\n  actual:   {}",
            statement.sql
        ));
    }
    CaseResult::Passed
}

fn evaluate_failure(case: &StatementCase, message: &str) -> CaseResult {
    match &case.error {
        Some(expected_error) if message.contains(expected_error.as_str()) => CaseResult::Passed,
        Some(expected_error) => CaseResult::Failed(format!(
            "failure `{message}` does not contain expected text `{expected_error}`"
        )),
        None => CaseResult::Failed(format!("unexpected failure: {message}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseResult, load_statement_cases_from_str, run_statement_case};

    #[test]
    fn cases_parse_into_a_named_map() {
        let yaml = "\
insert_person:
  operation: insert
  entity:
    name: Person
    table: Person
    properties:
      - name: Id
";
        let cases = load_statement_cases_from_str(yaml)
            .unwrap_or_else(|error| panic!("cases must parse: {error}"));
        assert_eq!(cases.len(), 1);
        assert!(cases.contains_key("insert_person"));
    }

    #[test]
    fn a_case_with_wrong_expected_text_fails_with_a_diff_message() {
        let yaml = "\
bad_expectation:
  operation: delete
  expected: \"DELETE FROM [Nope] ;\"
  entity:
    name: Person
    table: Person
";
        let cases = load_statement_cases_from_str(yaml)
            .unwrap_or_else(|error| panic!("cases must parse: {error}"));
        let result = run_statement_case(&cases["bad_expectation"]);
        match result {
            CaseResult::Failed(reason) => assert!(reason.contains("statement mismatch")),
            CaseResult::Passed => panic!("case with wrong expectation must fail"),
        }
    }
}
