use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::content::PostData;
use crate::error::{BlogError, Result};
use crate::post_list::PostList;

/// Summary of a post as shown in lists and grids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_path: String,
    pub date: NaiveDate,
    pub author: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub preview: String,
}

/// First line of `body` that starts with a word character. Blank lines, headings and other
/// markup-led lines are skipped.
pub fn extract_preview(body: &str) -> Option<&str> {
    lazy_static! {
        static ref PREVIEW_REGEX: Regex = Regex::new(r"(?m)^\w[^\r\n]*").unwrap();
    }

    PREVIEW_REGEX.find(body).map(|m| m.as_str())
}

impl CardProps {
    /// `id` is the repository id of the post, which is what post urls are built from.
    pub fn from_post(id: &str, post: &PostData) -> Result<CardProps> {
        let preview = extract_preview(&post.body).ok_or_else(|| BlogError::EmptyPostBody(id.to_string()))?;
        let fm = &post.front_matter;

        Ok(CardProps {
            id: id.to_string(),
            title: fm.title.clone(),
            description: fm.description.clone(),
            thumbnail_path: fm.thumbnail_path.clone(),
            date: fm.date,
            author: fm.author.clone(),
            read_time: fm.read_time.clone(),
            tags: fm.tags.clone(),
            preview: preview.to_string(),
        })
    }
}

pub fn project_to_card(post_list: &PostList, id: &str) -> Result<CardProps> {
    let post = post_list.get_post(id)?;
    CardProps::from_post(id, &post)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::test_data::{post_source, write_post, POST_DATA};

    use super::*;

    #[test]
    fn test_extract_preview() {
        assert_eq!(extract_preview("\n\n  \nHello world.\nSecond line."), Some("Hello world."));
        assert_eq!(extract_preview("# Title\n\n![img](a.png)\n\nFirst paragraph.\r\nNext"), Some("First paragraph."));
        assert_eq!(extract_preview("*emphasis*\n\n> quote\n\nPlain text.\n"), Some("Plain text."));
        assert_eq!(extract_preview("# Heading\n\n* item\n"), None);
        assert_eq!(extract_preview(""), None);
    }

    #[test]
    fn test_project_to_card() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "first-post", POST_DATA);

        let post_list = PostList::new(dir.path().to_path_buf());
        let card = project_to_card(&post_list, "first-post").unwrap();
        assert_eq!(card.id, "first-post");
        assert_eq!(card.title, "Designing a blog pipeline");
        assert_eq!(card.date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(card.preview, "Every page on this site starts as a markdown file.");
        assert_eq!(card.tags, ["rust", "architecture"]);
    }

    #[test]
    fn test_indented_opening_paragraph() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "indented", &post_source("indented", "01-01-2024", &[], "\n   An indented opening paragraph.\n"));

        let post_list = PostList::new(dir.path().to_path_buf());
        let card = project_to_card(&post_list, "indented").unwrap();
        assert_eq!(card.preview, "An indented opening paragraph.");
    }

    #[test]
    fn test_preview_of_normalized_markup() {
        let dir = TempDir::new().unwrap();
        let body = "\n__Bold__ opener.\n\n  _Emphasis_ then text.\n\nSecond paragraph.\n";
        write_post(dir.path(), "markup", &post_source("markup", "01-01-2024", &[], body));

        // Bold and emphasis are written back with `*`, so the first plain paragraph is the preview
        let post_list = PostList::new(dir.path().to_path_buf());
        let card = project_to_card(&post_list, "markup").unwrap();
        assert_eq!(card.preview, "Second paragraph.");
    }

    #[test]
    fn test_empty_post_body() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "empty", &post_source("empty", "01-01-2024", &[], "\n# Only a heading\n\n"));

        let post_list = PostList::new(dir.path().to_path_buf());
        let res = project_to_card(&post_list, "empty");
        assert!(matches!(res, Err(BlogError::EmptyPostBody(ref id)) if id == "empty"));
    }

    #[test]
    fn test_card_json() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "first-post", POST_DATA);

        let post_list = PostList::new(dir.path().to_path_buf());
        let card = project_to_card(&post_list, "first-post").unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["thumbnailPath"], "/images/pipeline.png");
        assert_eq!(json["date"], "2024-03-12");
        assert_eq!(json["readTime"], "5 min");
    }
}
