use thiserror::Error;

/// Error taxonomy for a pipeline run.
///
/// Each variant maps to one failure class the caller is expected to handle:
/// a bad extract aborts before any store interaction, an unreachable store
/// aborts before any mutation, and a rejected store operation is logged and
/// re-raised without rollback of records already written.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The extract file could not be read or parsed as tabular data.
    #[error("cannot read extract '{path}': {source}")]
    ExtractRead {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The document store could not be reached.
    #[error("document store unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    /// The store rejected an insert, schema, or index operation.
    #[error("document store operation failed: {0}")]
    Operation(#[source] sqlx::Error),
}
