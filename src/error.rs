use std::path::PathBuf;

/// Fatal errors: the pipeline stops and the process exits with failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read input file: {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert markdown: {0}")]
    Markdown(String),
}

/// Errors from the PDF stage.
///
/// These never abort the pipeline; they end up in
/// [`crate::pipeline::PdfOutcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{name} executable not found. Please install {name}.")]
    BinaryNotFound { name: &'static str },

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with exit code {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} exited successfully but wrote no PDF at {path}")]
    MissingOutput { program: String, path: PathBuf },

    #[error("Failed to prepare {path} for rendering: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
