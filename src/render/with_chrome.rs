use std::fs;
use std::path::Path;
use std::path::PathBuf;

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use crate::error::RenderError;
use crate::render::check_output;
use crate::render::find_executable;
use crate::render::PdfOptions;

/// Bytes escaped in a `file://` url path. `/` is kept as the separator.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub struct WithChrome;

impl WithChrome {
    pub const NAME: &'static str = "Chrome/Chromium";

    /// Print an html file to PDF with a headless chrome browser.
    ///
    /// Chrome takes page size and margins from the document, so the page is
    /// copied into a temp dir with an `@page` rule and a `<base>` pointing
    /// back at the original directory, so that relative assets still resolve.
    ///
    /// # Arguments
    ///
    /// * `binary` - path to chrome; common install locations are tried if `None`
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
            None => Self::find_chrome_executable()?,
        };

        let temp_dir = TempDir::new().map_err(|source| RenderError::Stage {
            path: std::env::temp_dir(),
            source,
        })?;
        let cwd = temp_dir.path();

        let html = absolute(html)?;
        let pdf = absolute(pdf)?;

        let input = fs::read_to_string(&html).map_err(|source| RenderError::Stage {
            path: html.clone(),
            source,
        })?;

        let page_file_path = Self::create_page_file(cwd, &input, html.parent(), options)?;

        let mut cmd = Self::build_chrome_print_cmd(&program, &page_file_path, &pdf, options, cwd);
        debug!("run: {:?}; cwd: {}", cmd.as_std(), cwd.display());

        let output = cmd.output().await.map_err(|source| RenderError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

        check_output(&program, output, &pdf)
    }

    /// Add print context to the page: encoding, url base and the `@page` rule.
    fn setup_html_page_context(input: &str, asset_base: Option<&Path>, options: &PdfOptions) -> String {
        let mut context = format!(
            r#"<meta http-equiv="Content-Type" content="text/html; charset={}"/>"#,
            options.encoding
        );

        if let Some(base_path) = asset_base {
            context.push_str(&format!(r#"<base href="{}">"#, Self::file_url(base_path)));
        }

        context.push_str(&format!("<style>{}</style>", options.page_css()));

        // Keep the doctype first, otherwise chrome falls back to quirks mode.
        match input.find("<head>") {
            Some(pos) => {
                let at = pos + "<head>".len();
                format!("{}{}{}", &input[..at], context, &input[at..])
            }
            None => format!("{}{}", context, input),
        }
    }

    /// `file://` url of a directory, with a trailing slash so relative urls
    /// resolve inside it.
    fn file_url(dir: &Path) -> String {
        let path = dir.to_string_lossy();
        let path = path.trim_end_matches('/');
        format!("file://{}/", utf8_percent_encode(path, PATH_SEGMENT))
    }

    /// Find Chrome executable by checking common paths
    fn find_chrome_executable() -> Result<PathBuf, RenderError> {
        let mac_chrome = "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome";
        if Path::new(mac_chrome).exists() {
            return Ok(PathBuf::from(mac_chrome));
        }

        find_executable(&[
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
            "chrome",
        ])
        .ok_or(RenderError::BinaryNotFound { name: Self::NAME })
    }

    /// Write the page chrome will print into `base_dir`.
    fn create_page_file(
        base_dir: &Path,
        content: &str,
        asset_base: Option<&Path>,
        options: &PdfOptions,
    ) -> Result<PathBuf, RenderError> {
        let content = Self::setup_html_page_context(content, asset_base, options);
        let page_file_path = base_dir.join("input.html");

        fs::write(&page_file_path, content.as_bytes()).map_err(|source| RenderError::Stage {
            path: page_file_path.clone(),
            source,
        })?;

        Ok(page_file_path)
    }

    /// Build a chrome command that prints `page_file_path` to `pdf`.
    fn build_chrome_print_cmd(
        program: &Path,
        page_file_path: &Path,
        pdf: &Path,
        options: &PdfOptions,
        cwd: &Path,
    ) -> Command {
        let mut cmd = Command::new(program);

        cmd.args([
            "--headless",
            "--disable-gpu",
            "--no-sandbox",
            "--no-pdf-header-footer",
        ]);
        cmd.arg(format!("--print-to-pdf={}", pdf.display()));

        if options.outline {
            cmd.arg("--generate-pdf-document-outline");
        }
        if options.enable_local_file_access {
            cmd.arg("--allow-file-access-from-files");
        }

        cmd.arg(page_file_path).current_dir(cwd);

        cmd
    }
}

fn absolute(path: &Path) -> Result<PathBuf, RenderError> {
    std::path::absolute(path).map_err(|source| RenderError::Stage {
        path: path.to_path_buf(),
        source,
    })
}
