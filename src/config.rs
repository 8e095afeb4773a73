use std::path::PathBuf;

use crate::render::Engine;
use crate::render::PdfOptions;
use crate::template::Template;

pub const DEFAULT_INPUT: &str = "OptimaChain_Whitepaper.md";
pub const DEFAULT_HTML: &str = "OptimaChain_Whitepaper.html";
pub const DEFAULT_PDF: &str = "OptimaChain_Whitepaper.pdf";

/// Everything a single run needs.
///
/// `Config::default()` is the fixed whitepaper build: the three default file
/// names relative to the working directory, wkhtmltopdf, A4 with 20mm margins.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub html_output: PathBuf,
    pub pdf_output: PathBuf,

    pub engine: Engine,

    /// Explicit path to the renderer executable of `engine`.
    /// Looked up on `PATH` if `None`.
    pub renderer: Option<PathBuf>,

    pub pdf_options: PdfOptions,
    pub template: Template,

    /// Stop after writing the HTML.
    pub html_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            html_output: PathBuf::from(DEFAULT_HTML),
            pdf_output: PathBuf::from(DEFAULT_PDF),
            engine: Engine::default(),
            renderer: None,
            pdf_options: PdfOptions::default(),
            template: Template::default(),
            html_only: false,
        }
    }
}

impl Config {
    /// Default config with all three files placed under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            input: dir.join(DEFAULT_INPUT),
            html_output: dir.join(DEFAULT_HTML),
            pdf_output: dir.join(DEFAULT_PDF),
            ..Self::default()
        }
    }
}
