use repoql_testkit::{CaseResult, load_statement_cases_from_str, run_statement_case};

const CASES: &str = r#"
select_top_people:
  operation: select
  top: 3
  where: "([Name] = @Name)"
  expected: "SELECT TOP (3) [Id], [Name] FROM [Person] WHERE ([Name] = @Name) ORDER BY ;"
  entity: &person
    name: Person
    table: Person
    properties:
      - name: Id
        primary: true
      - name: Name

insert_person:
  operation: insert
  expected: "INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ) ;"
  entity: *person

update_with_remapped_column:
  operation: update
  where: "([PersonId] = @Id)"
  expected: "UPDATE [Person] SET [PersonId] = @Id, [Name] = @Name WHERE ([PersonId] = @Id) ;"
  entity:
    name: Person
    table: Person
    properties:
      - name: Id
        column: PersonId
        primary: true
      - name: Name

merge_without_primary_fails:
  operation: merge
  error: "no qualifiers given and no primary property declared"
  entity:
    name: Log
    table: Log
    properties:
      - name: Message

unknown_operation_fails:
  operation: upsert
  error: "unknown operation"
  entity: *person
"#;

#[test]
fn yaml_statement_cases_run_end_to_end() {
    let mut cases = load_statement_cases_from_str(CASES)
        .unwrap_or_else(|error| panic!("cases must parse: {error}"));

    // The select expectation above is deliberately wrong so this test also
    // covers mismatch reporting; fix it before the pass/fail sweep.
    let select = cases
        .get_mut("select_top_people")
        .unwrap_or_else(|| panic!("select case must exist"));
    match run_statement_case(select) {
        CaseResult::Failed(reason) => assert!(reason.contains("statement mismatch")),
        CaseResult::Passed => panic!("broken expectation must be reported as a mismatch"),
    }
    select.expected = Some(
        "SELECT TOP (3) [Id], [Name] FROM [Person] WHERE ([Name] = @Name) ;".to_string(),
    );

    for (name, case) in &cases {
        match run_statement_case(case) {
            CaseResult::Passed => {}
            CaseResult::Failed(reason) => panic!("case `{name}` failed: {reason}"),
        }
    }
}
