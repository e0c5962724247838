use chrono::NaiveDate;
use serde::Serialize;

pub mod front_matter;
pub mod markdown_writer;

/// Metadata block at the head of every post file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_path: String,
    pub date: NaiveDate,
    pub author: String,
    pub read_time: String,
    pub meta: String,
    pub tags: Vec<String>,
}

/// A fully processed post: typed front-matter plus the markdown body with the
/// front-matter block removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub front_matter: FrontMatter,
    pub body: String,
}
