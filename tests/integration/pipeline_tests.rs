use std::fs;
use std::path::Path;
use std::path::PathBuf;

use xp_md2pdf::Config;
use xp_md2pdf::Engine;
use xp_md2pdf::PdfOutcome;

/// Config for a scratch dir with `md` as the input document, rendering with
/// `renderer`.
fn setup(dir: &Path, md: &str, renderer: PathBuf) -> Config {
    let config = Config {
        renderer: Some(renderer),
        ..Config::in_dir(dir)
    };
    fs::write(&config.input, md).unwrap();
    config
}

/// Write an executable shell script standing in for a renderer.
#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A stand-in for wkhtmltopdf: records its arguments next to the output and
/// writes a stub PDF to the last argument.
#[cfg(unix)]
fn fake_renderer(dir: &Path) -> PathBuf {
    script(dir, "fake-wkhtmltopdf", r#"for last; do :; done
echo "$@" > "$(dirname "$last")/args.txt"
echo '%PDF-1.4' > "$last"
"#)
}

/// A stand-in for chrome: keeps a copy of the page it was asked to print and
/// writes a stub PDF to the `--print-to-pdf=` target.
#[cfg(unix)]
fn fake_chrome(dir: &Path) -> PathBuf {
    script(dir, "fake-chrome", r#"for arg; do
  case "$arg" in
    --print-to-pdf=*) out="${arg#--print-to-pdf=}" ;;
  esac
  last="$arg"
done
cp "$last" "$(dirname "$out")/staged.html"
echo "$@" > "$(dirname "$out")/args.txt"
echo '%PDF-1.4' > "$out"
"#)
}

#[tokio::test]
async fn test_heading_cover_and_footer() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "# Title\n\nBody text.", dir.path().join("missing"));

    xp_md2pdf::run(&config).await.unwrap();

    let html = fs::read_to_string(&config.html_output).unwrap();
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<p>Body text.</p>"));
    assert!(html.contains("革新的なスケーリング技術"));
    assert!(html.contains("© 2023 OptimaChain. All rights reserved."));
}

#[tokio::test]
async fn test_tables_and_fenced_code() {
    let dir = tempfile::tempdir().unwrap();
    let md = "\
## Consensus

| Phase | Time |
|-------|------|
| propose | 1s |

```json
{\"shards\": 64}
```
";
    let config = setup(dir.path(), md, dir.path().join("missing"));

    xp_md2pdf::run(&config).await.unwrap();

    let html = fs::read_to_string(&config.html_output).unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>propose</td>"));
    assert!(html.contains(r#"<pre><code class="language-json">"#));
}

#[tokio::test]
async fn test_renderer_unavailable_keeps_html() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "# Title\n", dir.path().join("no-such-wkhtmltopdf"));

    let report = xp_md2pdf::run(&config).await.unwrap();

    assert_eq!(report.html, config.html_output);
    assert!(config.html_output.exists());
    assert!(!config.pdf_output.exists());
    match report.pdf {
        PdfOutcome::Failed(reason) => assert!(reason.contains("no-such-wkhtmltopdf"), "got: {reason}"),
        other => panic!("expected failure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_input_keeps_scaffold() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "", dir.path().join("missing"));

    xp_md2pdf::run(&config).await.unwrap();

    let html = fs::read_to_string(&config.html_output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<div class="cover">"#));
    assert!(html.contains(r#"<div class="footnote">"#));
    assert!(html.trim_end().ends_with("</html>"));
}

#[tokio::test]
async fn test_rerun_overwrites_deterministically() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), "# Title\n\n- a\n- b\n", dir.path().join("missing"));
    fs::write(&config.html_output, "stale content from an earlier run").unwrap();

    xp_md2pdf::run(&config).await.unwrap();
    let first = fs::read(&config.html_output).unwrap();

    xp_md2pdf::run(&config).await.unwrap();
    let second = fs::read(&config.html_output).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8(first).unwrap().contains("stale"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_pdf_created_with_page_layout() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = fake_renderer(dir.path());
    let config = setup(dir.path(), "# Title\n", renderer);
    fs::write(&config.pdf_output, "old pdf").unwrap();

    let report = xp_md2pdf::run(&config).await.unwrap();

    assert_eq!(report.pdf, PdfOutcome::Created(config.pdf_output.clone()));
    assert_eq!(fs::read_to_string(&config.pdf_output).unwrap(), "%PDF-1.4\n");

    let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
    assert!(args.contains("--page-size A4"), "got: {args}");
    assert!(args.contains("--margin-top 20mm --margin-right 20mm --margin-bottom 20mm --margin-left 20mm"));
    assert!(args.contains("--encoding UTF-8"));
    assert!(args.contains("--no-outline"));
    assert!(args.contains("--enable-local-file-access"));
    assert!(args.contains("OptimaChain_Whitepaper.html"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_silent_renderer_does_not_reuse_old_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = script(dir.path(), "silent-renderer", "exit 0\n");
    let config = setup(dir.path(), "# Title\n", renderer);
    fs::write(&config.pdf_output, "pdf from an earlier run").unwrap();

    let report = xp_md2pdf::run(&config).await.unwrap();

    match report.pdf {
        PdfOutcome::Failed(reason) => assert!(reason.contains("wrote no PDF"), "got: {reason}"),
        other => panic!("expected failure, got: {other:?}"),
    }
    assert!(!config.pdf_output.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_chrome_prints_staged_page() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = fake_chrome(dir.path());
    let config = Config {
        engine: Engine::Chrome,
        ..setup(dir.path(), "# Title\n", renderer)
    };

    let report = xp_md2pdf::run(&config).await.unwrap();

    assert_eq!(report.pdf, PdfOutcome::Created(config.pdf_output.clone()));
    assert_eq!(fs::read_to_string(&config.pdf_output).unwrap(), "%PDF-1.4\n");

    let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
    assert!(args.contains("--headless"), "got: {args}");
    assert!(
        args.contains(&format!("--print-to-pdf={}", config.pdf_output.display())),
        "got: {args}"
    );

    let staged = fs::read_to_string(dir.path().join("staged.html")).unwrap();
    assert!(staged.starts_with("<!DOCTYPE html>"));
    assert!(staged.contains("<style>@page { size: A4; margin: 20mm 20mm 20mm 20mm; }</style>"));
    assert!(staged.contains(&format!(r#"<base href="file://{}/">"#, dir.path().display())));
    assert!(staged.contains("<h1>Title</h1>"));
}
