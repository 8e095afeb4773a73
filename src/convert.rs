use markdown::Options;

use crate::error::Error;

/// Options used for every conversion: GFM (tables, fenced code,
/// strikethrough, autolinks, task lists) with raw HTML passed through.
pub fn options() -> Options {
    let mut options = Options::gfm();
    options.compile.allow_dangerous_html = true;
    options
}

/// Convert markdown source into an HTML fragment, without any page scaffold.
pub fn markdown_to_html(md: &str) -> Result<String, Error> {
    markdown::to_html_with_options(md, &options()).map_err(|e| Error::Markdown(e.to_string()))
}
