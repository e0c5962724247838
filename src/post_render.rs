use markdown::Options;
use serde::Serialize;

use crate::content::{FrontMatter, PostData};
use crate::error::{BlogError, Result};

/// A post ready for its page: the front-matter and the body as HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPost {
    pub front_matter: FrontMatter,
    pub html: String,
}

/// Renders a markdown body to HTML with GitHub flavoured markdown enabled. Raw HTML in the
/// body, comments included, is escaped rather than passed through.
pub fn render_markdown(md_text: &str) -> Result<String> {
    markdown::to_html_with_options(md_text, &Options::gfm()).map_err(|e| BlogError::Render(e.reason))
}

pub fn render_post_html(post: &PostData) -> Result<RenderedPost> {
    Ok(RenderedPost {
        front_matter: post.front_matter.clone(),
        html: render_markdown(&post.body)?,
    })
}
