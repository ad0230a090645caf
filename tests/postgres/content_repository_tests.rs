//! SQL behaviour tests for [`PostgresContentRepository`].
//!
//! Covers the `ON CONFLICT DO NOTHING` issue insert, unique-violation
//! mapping for comments, `RETURNING`-based update detection and the column
//! defaults and checks declared by the migration.

use crate::postgres::helpers::{comment_record, issue_record, prepare_database, runtime};
use diesel::RunQueryDsl;
use issue_ingest::ingestion::{
    adapters::postgres::PostgresContentRepository,
    domain::{CommentNodeId, CommentRecord, IssueNodeId, Markdown, Visibility},
    ports::{ContentRepository, ContentRepositoryError},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn second_issue_insert_keeps_first_row(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "issue_conflict").expect("database setup");
    let first = issue_record("I_1", "first", Visibility::Public).expect("issue");
    let second = issue_record("I_1", "second", Visibility::Private).expect("issue");

    rt.block_on(db.repo.create_issue(&first))
        .expect("first insert");
    rt.block_on(db.repo.create_issue(&second))
        .expect("conflicting insert should be a no-op");

    let stored = rt
        .block_on(db.repo.find_issue(&IssueNodeId::new("I_1").expect("id")))
        .expect("lookup")
        .expect("issue exists");
    assert_eq!(stored, first);
}

#[rstest]
fn duplicate_comment_maps_to_domain_error(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "comment_dup").expect("database setup");
    let comment = comment_record("IC_1", "I_1", "Same here", Visibility::Public).expect("comment");

    rt.block_on(db.repo.create_comment(&comment))
        .expect("first insert");
    let result = rt.block_on(db.repo.create_comment(&comment));

    assert!(
        matches!(result, Err(ContentRepositoryError::DuplicateComment(ref id)) if id == comment.id()),
        "unique violation should map to DuplicateComment, got {result:?}"
    );
}

#[rstest]
fn update_of_unknown_comment_reports_not_found(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "comment_missing").expect("database setup");
    let id = CommentNodeId::new("IC_missing").expect("id");
    let markdown = Markdown::new("edited").expect("markdown");

    let result = rt.block_on(db.repo.update_comment(&markdown, &id, Visibility::Public));

    assert!(matches!(
        result,
        Err(ContentRepositoryError::CommentNotFound(ref missing)) if *missing == id
    ));
}

#[rstest]
#[case(Visibility::Private, Visibility::Public)]
#[case(Visibility::Public, Visibility::Private)]
#[case(Visibility::Private, Visibility::Private)]
fn update_replaces_markdown_and_keeps_stored_privacy(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
    #[case] created: Visibility,
    #[case] reported: Visibility,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "comment_update").expect("database setup");
    let comment = comment_record("IC_1", "I_1", "first draft", created).expect("comment");
    rt.block_on(db.repo.create_comment(&comment))
        .expect("insert");

    let edited = Markdown::new("second draft").expect("markdown");
    rt.block_on(db.repo.update_comment(&edited, comment.id(), reported))
        .expect("update");

    let stored = find_comment(&rt, &db.repo, comment.id());
    assert_eq!(stored.markdown(), &edited);
    assert_eq!(stored.visibility(), created);
    assert_eq!(stored.issue_id(), comment.issue_id());
    assert_eq!(stored.author_id(), comment.author_id());
    assert_eq!(stored.payload(), comment.payload());
}

#[rstest]
fn lookups_of_unknown_ids_return_none(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "lookup_missing").expect("database setup");

    let issue = rt
        .block_on(db.repo.find_issue(&IssueNodeId::new("I_none").expect("id")))
        .expect("issue lookup");
    let comment = rt
        .block_on(db.repo.find_comment(&CommentNodeId::new("IC_none").expect("id")))
        .expect("comment lookup");

    assert!(issue.is_none());
    assert!(comment.is_none());
}

#[rstest]
fn omitted_author_defaults_to_unknown(
    runtime: io::Result<Runtime>,
    shared_test_cluster: &'static TestCluster,
) {
    let rt = runtime.expect("runtime creation");
    let db = prepare_database(shared_test_cluster, "author_default").expect("database setup");
    let mut conn = db.connect().expect("connection");
    diesel::sql_query(
        "INSERT INTO issues (id, is_private, markdown, payload) \
         VALUES ('I_anon', false, 'Crash', '{}')",
    )
    .execute(&mut conn)
    .expect("raw insert");

    let stored = rt
        .block_on(db.repo.find_issue(&IssueNodeId::new("I_anon").expect("id")))
        .expect("lookup")
        .expect("issue exists");

    assert_eq!(stored.author_id().value(), -1);
}

#[rstest]
#[case(
    "issues",
    "INSERT INTO issues (id, is_private, markdown, payload) \
     VALUES ('I_blank', false, '  ', '{}')"
)]
#[case(
    "comments",
    "INSERT INTO comments (id, issue_id, is_private, markdown, payload) \
     VALUES ('IC_blank', 'I_1', false, '', '{}')"
)]
fn schema_rejects_blank_markdown(
    shared_test_cluster: &'static TestCluster,
    #[case] table: &str,
    #[case] statement: &str,
) {
    let db = prepare_database(shared_test_cluster, "blank_markdown").expect("database setup");
    let mut conn = db.connect().expect("connection");

    let result = diesel::sql_query(statement).execute(&mut conn);

    assert!(result.is_err(), "{table} accepted blank markdown");
}

fn find_comment(
    rt: &Runtime,
    repo: &PostgresContentRepository,
    id: &CommentNodeId,
) -> CommentRecord {
    rt.block_on(repo.find_comment(id))
        .expect("lookup")
        .expect("comment exists")
}
