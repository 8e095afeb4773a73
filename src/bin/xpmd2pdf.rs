use std::io;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xp_md2pdf::config::DEFAULT_HTML;
use xp_md2pdf::config::DEFAULT_INPUT;
use xp_md2pdf::config::DEFAULT_PDF;
use xp_md2pdf::Config;
use xp_md2pdf::Engine;
use xp_md2pdf::PdfOutcome;

/// Without arguments, builds `OptimaChain_Whitepaper.html` and
/// `OptimaChain_Whitepaper.pdf` from `OptimaChain_Whitepaper.md` in the
/// current directory.
#[derive(Parser)]
#[command(name = "xpmd2pdf")]
#[command(about = "A markdown to styled HTML/PDF converter")]
#[command(version = "0.1.0")]
struct Cli {
    /// Markdown input file
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// HTML output file, overwritten if it exists
    #[arg(long, default_value = DEFAULT_HTML)]
    html: PathBuf,

    /// PDF output file, overwritten if it exists
    #[arg(long, default_value = DEFAULT_PDF)]
    pdf: PathBuf,

    /// External program used to render the PDF
    #[arg(short, long, value_enum, default_value_t = Engine::Wkhtmltopdf)]
    engine: Engine,

    /// Path to the renderer executable (searched on PATH if not specified)
    #[arg(long)]
    renderer: Option<PathBuf>,

    /// Only write the HTML
    #[arg(long)]
    html_only: bool,

    /// Exit with failure if the PDF can not be created
    #[arg(long)]
    strict: bool,

    /// Log every step to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            input: self.input.clone(),
            html_output: self.html.clone(),
            pdf_output: self.pdf.clone(),
            engine: self.engine,
            renderer: self.renderer.clone(),
            html_only: self.html_only,
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.to_config();

    let html = xp_md2pdf::build_html(&config)
        .with_context(|| format!("Failed to build document from: {}", config.input.display()))?;

    println!("HTML version created: {}", html.display());

    match xp_md2pdf::render_pdf(&config).await {
        PdfOutcome::Created(pdf) => {
            println!("PDF version created: {}", pdf.display());
        }
        PdfOutcome::Failed(reason) => {
            println!("Could not create PDF: {}", reason);
            println!("Please install {} or use the HTML version.", install_hint(config.engine));

            if cli.strict {
                anyhow::bail!("PDF generation failed: {}", config.pdf_output.display());
            }
        }
        PdfOutcome::Skipped => {}
    }

    Ok(())
}

fn install_hint(engine: Engine) -> &'static str {
    match engine {
        Engine::Wkhtmltopdf => "wkhtmltopdf",
        Engine::Chrome => "Chrome or Chromium",
    }
}
