use repoql_core::{Operation, StatementGenerator};
use repoql_testkit::{audit_descriptor, person_descriptor, provider_with};

#[test]
fn person_fixture_generates_the_canonical_insert() {
    let (provider, entity) = provider_with(person_descriptor())
        .unwrap_or_else(|error| panic!("fixture must register: {error}"));
    let generator = StatementGenerator::new(&provider);

    let sql = generator
        .insert(&entity)
        .unwrap_or_else(|error| panic!("insert must generate: {error}"));
    assert_eq!(
        sql,
        "INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ) ;"
    );
}

#[test]
fn audit_fixture_uses_a_schema_qualified_table_and_update_ignores() {
    let (provider, entity) = provider_with(audit_descriptor())
        .unwrap_or_else(|error| panic!("fixture must register: {error}"));
    let generator = StatementGenerator::new(&provider);

    let update = generator
        .update(&entity, None)
        .unwrap_or_else(|error| panic!("update must generate: {error}"));
    assert_eq!(
        update,
        "UPDATE [audit].[Entry] SET [Id] = @Id, [Actor] = @Actor ;"
    );

    let statement = generator
        .generate(&entity, Operation::Select, None)
        .unwrap_or_else(|error| panic!("select must generate: {error}"));
    assert!(statement.sql.contains("[RecordedAt]"));
}
