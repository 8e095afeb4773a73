//! Render a Markdown document into a styled HTML page and, when an external
//! renderer is installed, into a PDF.
//!
//! ```text
//! *.md ──convert──▶ fragment ──template──▶ *.html ──render──▶ *.pdf
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod template;

pub use config::Config;
pub use error::Error;
pub use error::RenderError;
pub use pipeline::build_html;
pub use pipeline::render_pdf;
pub use pipeline::run;
pub use pipeline::PdfOutcome;
pub use pipeline::Report;
pub use render::Engine;
pub use render::PdfOptions;
pub use template::Template;
