use std::fs;
use std::path::PathBuf;

use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::convert::markdown_to_html;
use crate::error::Error;
use crate::template::write_html;

/// What happened in the PDF stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfOutcome {
    Created(PathBuf),
    /// Rendering failed; the message names the cause.
    Failed(String),
    /// `html_only` was set.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub html: PathBuf,
    pub pdf: PdfOutcome,
}

/// Read the markdown, write the styled html, then try to render the PDF.
///
/// Failing to read the input or write the html is an error. A PDF failure
/// is not: it is returned as [`PdfOutcome::Failed`] and the html is kept.
pub async fn run(config: &Config) -> Result<Report, Error> {
    let html = build_html(config)?;
    let pdf = render_pdf(config).await;

    Ok(Report { html, pdf })
}

/// Convert the markdown input and write the composed page to
/// `config.html_output`. Returns the path written.
pub fn build_html(config: &Config) -> Result<PathBuf, Error> {
    info!("reading {}", config.input.display());
    let md = fs::read_to_string(&config.input).map_err(|source| Error::ReadInput {
        path: config.input.clone(),
        source,
    })?;

    let body = markdown_to_html(&md)?;
    let html = config.template.compose(&body);

    write_html(&config.html_output, &html)?;
    info!(
        "wrote {} ({} bytes)",
        config.html_output.display(),
        html.len()
    );

    Ok(config.html_output.clone())
}

/// Render `config.html_output` to `config.pdf_output`.
///
/// Expects [`build_html`] to have run. Never fails: errors are reported in
/// the returned outcome.
pub async fn render_pdf(config: &Config) -> PdfOutcome {
    if config.html_only {
        return PdfOutcome::Skipped;
    }

    info!(
        "rendering {} with {}",
        config.pdf_output.display(),
        config.engine
    );
    match config
        .engine
        .render(
            config.renderer.as_deref(),
            &config.html_output,
            &config.pdf_output,
            &config.pdf_options,
        )
        .await
    {
        Ok(()) => PdfOutcome::Created(config.pdf_output.clone()),
        Err(e) => {
            warn!("PDF rendering failed: {}", e);
            PdfOutcome::Failed(e.to_string())
        }
    }
}
