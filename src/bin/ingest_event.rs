//! Ingests one plugin invocation into the `PostgreSQL` content store.
//!
//! Usage:
//!
//! ```text
//! ingest_event <inputs-path>
//! ```
//!
//! The JSON document at `inputs-path` must serialize a [`PluginInputs`]
//! envelope. A representative document is:
//!
//! ```json
//! {
//!   "stateId": "run-1",
//!   "eventName": "issue_comment.created",
//!   "eventPayload": { "comment": { "node_id": "IC_1", "body": "Same here" },
//!                     "issue": { "node_id": "I_1", "title": "Crash", "body": "Boom" },
//!                     "repository": { "private": false } },
//!   "settings": { "redactPrivateRepoComments": true },
//!   "authToken": "ghs_example",
//!   "ref": "main"
//! }
//! ```
//!
//! The database is taken from `DATABASE_URL`; log filtering from `RUST_LOG`
//! (default `info`). The process exits non-zero when a handler propagates a
//! store failure.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use issue_ingest::ingestion::adapters::postgres::PostgresContentRepository;
use issue_ingest::plugin::{DispatchError, EventDispatcher, PluginInputs};
use std::env;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running an ingestion.
#[derive(Debug, Error)]
enum IngestCliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read plugin inputs: {0}")]
    InputsRead(#[source] io::Error),
    #[error("failed to parse plugin inputs: {0}")]
    InputsParse(#[source] serde_json::Error),
    #[error("{} is not set", DATABASE_URL_ENV)]
    MissingDatabaseUrl,
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let inputs_path = parse_args(env::args().map(Utf8PathBuf::from))?;
    run(&inputs_path).map_err(|err| {
        tracing::error!(error = %err, "ingestion failed");
        err.into()
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

fn parse_args(
    mut args: impl Iterator<Item = Utf8PathBuf>,
) -> Result<Utf8PathBuf, IngestCliError> {
    let _program = args.next();
    let inputs_path = args
        .next()
        .ok_or_else(|| IngestCliError::InvalidArgs("missing inputs path argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(IngestCliError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok(inputs_path)
}

fn run(inputs_path: &Utf8Path) -> Result<(), IngestCliError> {
    let inputs = load_inputs(inputs_path)?;
    let database_url =
        env::var(DATABASE_URL_ENV).map_err(|_| IngestCliError::MissingDatabaseUrl)?;
    let pool = Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(IngestCliError::Pool)?;
    let dispatcher = EventDispatcher::new(Arc::new(PostgresContentRepository::new(pool)));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(IngestCliError::RuntimeInit)?;
    let outcome = runtime.block_on(dispatcher.dispatch(inputs))?;
    tracing::info!(?outcome, "ingestion finished");
    Ok(())
}

fn load_inputs(path: &Utf8Path) -> Result<PluginInputs, IngestCliError> {
    let bytes = read_inputs_file(path).map_err(IngestCliError::InputsRead)?;
    serde_json::from_slice(&bytes).map_err(IngestCliError::InputsParse)
}

/// Reads the file through an ambient handle on its parent directory.
fn read_inputs_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}
