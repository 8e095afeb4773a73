pub mod with_chrome;
pub mod with_wkhtmltopdf;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tracing::debug;

use crate::error::RenderError;
use crate::render::with_chrome::WithChrome;
use crate::render::with_wkhtmltopdf::WithWkhtmltopdf;

/// External program that turns the html page into a PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    #[default]
    Wkhtmltopdf,
    Chrome,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Wkhtmltopdf => write!(f, "wkhtmltopdf"),
            Engine::Chrome => write!(f, "chrome"),
        }
    }
}

impl Engine {
    /// Render the html file at `html` into a PDF at `pdf`.
    ///
    /// # Arguments
    ///
    /// * `binary` - explicit renderer executable; searched on `PATH` if `None`
    /// * `html` - the html file to render, relative assets resolve against its dir
    /// * `pdf` - output path, overwritten if it exists
    /// * `options` - page layout
    pub async fn render(
        &self,
        binary: Option<&Path>,
        html: &Path,
        pdf: &Path,
        options: &PdfOptions,
    ) -> Result<(), RenderError> {
        remove_stale_output(pdf)?;

        match self {
            Engine::Wkhtmltopdf => WithWkhtmltopdf::render_pdf(binary, html, pdf, options).await,
            Engine::Chrome => WithChrome::render_pdf(binary, html, pdf, options).await,
        }
    }
}

/// Page layout handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOptions {
    pub page_size: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub encoding: String,
    /// Generate a PDF outline (bookmarks) from the headings.
    pub outline: bool,
    /// Allow the page to load `file://` resources such as local images.
    pub enable_local_file_access: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            margin_top: "20mm".to_string(),
            margin_right: "20mm".to_string(),
            margin_bottom: "20mm".to_string(),
            margin_left: "20mm".to_string(),
            encoding: "UTF-8".to_string(),
            outline: false,
            enable_local_file_access: true,
        }
    }
}

impl PdfOptions {
    /// CSS `@page` rule for renderers that take page layout from the document.
    pub fn page_css(&self) -> String {
        format!(
            "@page {{ size: {}; margin: {} {} {} {}; }}",
            self.page_size, self.margin_top, self.margin_right, self.margin_bottom, self.margin_left
        )
    }
}

/// Find the first of `names` that resolves on `PATH`.
pub(crate) fn find_executable(names: &[&str]) -> Option<PathBuf> {
    for name in names {
        if let Ok(output) = Command::new("which").arg(name).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    debug!("found {} at {}", name, path);
                    return Some(PathBuf::from(path));
                }
            }
        }
    }
    None
}

/// Delete a PDF left by an earlier run, so that [`check_output`] only sees
/// what this run's renderer wrote.
pub(crate) fn remove_stale_output(pdf: &Path) -> Result<(), RenderError> {
    match fs::remove_file(pdf) {
        Ok(()) => {
            debug!("removed stale {}", pdf.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RenderError::Stage {
            path: pdf.to_path_buf(),
            source,
        }),
    }
}

/// Turn a finished renderer process into a result: the process must exit 0
/// and the PDF must exist afterwards.
pub(crate) fn check_output(program: &Path, output: Output, pdf: &Path) -> Result<(), RenderError> {
    if !output.status.success() {
        return Err(RenderError::Failed {
            program: program.display().to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    if !pdf.exists() {
        return Err(RenderError::MissingOutput {
            program: program.display().to_string(),
            path: pdf.to_path_buf(),
        });
    }

    Ok(())
}
