//! Then steps for content ingestion BDD scenarios.

use super::world::{COMMENT_NODE_ID, ISSUE_NODE_ID, IngestionWorld, run_async};
use issue_ingest::ingestion::{
    domain::{CommentNodeId, IssueNodeId, REDACTED_PLACEHOLDER},
    ports::ContentRepository,
    services::IngestOutcome,
};
use rstest_bdd_macros::then;

fn stored_issue_markdown(world: &IngestionWorld) -> Result<String, eyre::Report> {
    let id = IssueNodeId::new(ISSUE_NODE_ID)?;
    let issue = run_async(world.repository.find_issue(&id))?
        .ok_or_else(|| eyre::eyre!("expected issue {ISSUE_NODE_ID} to be stored"))?;
    Ok(issue.markdown().as_str().to_owned())
}

#[then(r#"the stored issue is the title "{title}" followed by the redaction placeholder"#)]
fn issue_is_redacted(world: &IngestionWorld, title: String) -> Result<(), eyre::Report> {
    let markdown = stored_issue_markdown(world)?;
    let expected = format!("{title}\n\n{REDACTED_PLACEHOLDER}");
    eyre::ensure!(
        markdown == expected,
        "expected {expected:?}, found {markdown:?}"
    );
    Ok(())
}

#[then(r#"the issue is stored with markdown "{markdown}""#)]
fn issue_is_stored(world: &IngestionWorld, markdown: String) -> Result<(), eyre::Report> {
    let stored = stored_issue_markdown(world)?;
    eyre::ensure!(
        stored == markdown,
        "expected {markdown:?}, found {stored:?}"
    );
    Ok(())
}

#[then(r#"the comment is stored under the issue with markdown "{markdown}""#)]
fn comment_is_stored(world: &IngestionWorld, markdown: String) -> Result<(), eyre::Report> {
    let id = CommentNodeId::new(COMMENT_NODE_ID)?;
    let comment = run_async(world.repository.find_comment(&id))?
        .ok_or_else(|| eyre::eyre!("expected comment {COMMENT_NODE_ID} to be stored"))?;
    eyre::ensure!(
        comment.issue_id().as_str() == ISSUE_NODE_ID,
        "comment stored under unexpected issue {}",
        comment.issue_id()
    );
    eyre::ensure!(
        comment.markdown().as_str() == markdown,
        "expected {markdown:?}, found {:?}",
        comment.markdown().as_str()
    );
    Ok(())
}

#[then("the event is dropped")]
fn event_is_dropped(world: &IngestionWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch outcome in scenario world"))?;
    match outcome {
        Ok(IngestOutcome::Dropped(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a dropped event, got {other:?}")),
    }
}

#[then("nothing is stored")]
fn nothing_is_stored(world: &IngestionWorld) -> Result<(), eyre::Report> {
    let issues = world.repository.issue_count()?;
    let comments = world.repository.comment_count()?;
    eyre::ensure!(
        issues == 0 && comments == 0,
        "expected an empty store, found {issues} issues and {comments} comments"
    );
    Ok(())
}
