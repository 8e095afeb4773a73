use std::fs;
use std::path::Path;

use crate::error::Error;

/// Inline stylesheet of the whitepaper page.
pub const STYLE: &str = include_str!("whitepaper.css");

/// The page scaffold wrapped around the converted markdown: a cover block on
/// top, the body in the middle and a copyright footer at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Used as both `<title>` and the cover heading.
    pub title: String,
    pub tagline: String,
    pub version: String,
    pub copyright: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            title: "OptimaChain ホワイトペーパー".to_string(),
            tagline: "革新的なスケーリング技術と高度なセキュリティを統合した次世代型分散型ブロックチェーンプラットフォーム"
                .to_string(),
            version: "バージョン 1.0.0".to_string(),
            copyright: "© 2023 OptimaChain. All rights reserved.".to_string(),
        }
    }
}

impl Template {
    /// Build the complete html document around `body_html`.
    ///
    /// `body_html` is inserted as is; the template texts are trusted and are
    /// not escaped either.
    pub fn compose(&self, body_html: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{style}    </style>
</head>
<body>
    <div class="cover">
        <h1>{title}</h1>
        <p><strong>{tagline}</strong></p>
        <p class="version">{version}</p>
    </div>

    {body_html}

    <div class="footnote">
        <p>{copyright}</p>
    </div>
</body>
</html>
"#,
            title = self.title,
            style = STYLE,
            tagline = self.tagline,
            version = self.version,
            body_html = body_html,
            copyright = self.copyright,
        )
    }
}

/// Write the composed document, replacing whatever is at `path`.
pub fn write_html(path: &Path, html: &str) -> Result<(), Error> {
    fs::write(path, html.as_bytes()).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
