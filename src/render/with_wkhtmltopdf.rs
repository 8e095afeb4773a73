use std::path::Path;
use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::error::RenderError;
use crate::render::check_output;
use crate::render::find_executable;
use crate::render::PdfOptions;

pub struct WithWkhtmltopdf;

impl WithWkhtmltopdf {
    pub const NAME: &'static str = "wkhtmltopdf";

    /// Render an html file to PDF with wkhtmltopdf.
    ///
    /// # Arguments
    ///
    /// * `binary` - path to wkhtmltopdf; looked up on `PATH` if `None`
    /// * `html` - the html file to render
    /// * `pdf` - where to write the PDF
    /// * `options` - page size, margins etc.
    pub async fn render_pdf(
        binary: Option<&Path>,
        html: &Path,
        pdf: &Path,
        options: &PdfOptions,
    ) -> Result<(), RenderError> {
        let program = match binary {
            Some(p) => p.to_path_buf(),
            None => Self::find_executable()?,
        };

        let mut cmd = Self::build_cmd(&program, html, pdf, options);
        debug!("run: {:?}", cmd.as_std());

        let output = cmd.output().await.map_err(|source| RenderError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

        check_output(&program, output, pdf)
    }

    fn find_executable() -> Result<PathBuf, RenderError> {
        find_executable(&[Self::NAME]).ok_or(RenderError::BinaryNotFound { name: Self::NAME })
    }

    /// Command line options for `options`, in the order wkhtmltopdf documents them.
    pub fn build_args(options: &PdfOptions) -> Vec<String> {
        let mut args = vec!["--quiet".to_string()];

        let valued = [
            ("--page-size", &options.page_size),
            ("--margin-top", &options.margin_top),
            ("--margin-right", &options.margin_right),
            ("--margin-bottom", &options.margin_bottom),
            ("--margin-left", &options.margin_left),
            ("--encoding", &options.encoding),
        ];
        for (flag, value) in valued {
            args.push(flag.to_string());
            args.push(value.clone());
        }

        if options.outline {
            args.push("--outline".to_string());
        } else {
            args.push("--no-outline".to_string());
        }

        if options.enable_local_file_access {
            args.push("--enable-local-file-access".to_string());
        } else {
            args.push("--disable-local-file-access".to_string());
        }

        args
    }

    fn build_cmd(program: &Path, html: &Path, pdf: &Path, options: &PdfOptions) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(Self::build_args(options)).arg(html).arg(pdf);
        cmd
    }
}
