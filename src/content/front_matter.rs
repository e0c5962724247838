use lazy_static::lazy_static;
use markdown::mdast::Node;
use markdown::{Constructs, ParseOptions};
use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::content::markdown_writer::to_markdown;
use crate::content::FrontMatter;
use crate::error::{BlogError, Result};
use crate::text_utils::str_to_date;

/// Output of [`process`]: the decoded but still untyped front-matter, and the
/// document written back out as markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    pub front_matter: Mapping,
    pub body: String,
}

/// Parses `raw` as markdown with front-matter enabled and decodes the YAML block.
///
/// `body` is the parsed document serialized again, so it is normalized markdown and
/// still starts with the front-matter block. Callers finish the job with
/// [`strip_front_matter`].
pub fn process(id: &str, raw: &str) -> Result<ProcessedDocument> {
    let options = ParseOptions {
        constructs: Constructs {
            frontmatter: true,
            ..Constructs::gfm()
        },
        ..ParseOptions::gfm()
    };

    let tree = markdown::to_mdast(raw, &options).map_err(|e| BlogError::front_matter(id, e.reason))?;
    let yaml = match tree {
        Node::Root(ref root) => root.children.iter().find_map(|node| match node {
            Node::Yaml(yaml) => Some(yaml.value.as_str()),
            _ => None,
        }),
        _ => None,
    };

    let Some(yaml) = yaml else {
        return Err(BlogError::front_matter(id, "missing `---` front-matter block"));
    };

    let front_matter = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml).map_err(|e| BlogError::front_matter(id, e))? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => return Err(BlogError::front_matter(id, "front-matter must be a key/value mapping")),
        }
    };

    Ok(ProcessedDocument {
        front_matter,
        body: to_markdown(&tree),
    })
}

/// Removes a leading `---` ... `---` block (and the newline after it) from `body`.
pub fn strip_front_matter(body: &str) -> String {
    lazy_static! {
        static ref FRONT_MATTER_REGEX: Regex = Regex::new(
            r"\A---[ \t]*\r?\n(?s:.*?\r?\n)?---[ \t]*(?:\r?\n|\z)"
        ).unwrap();
    }

    FRONT_MATTER_REGEX.replace(body, "").into_owned()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrontMatter {
    #[serde(default)]
    id: Option<String>,
    title: String,
    description: String,
    thumbnail_path: String,
    #[serde(default)]
    date: Option<String>,
    author: String,
    #[serde(default)]
    read_time: String,
    #[serde(default)]
    meta: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl FrontMatter {
    /// Validates the untyped mapping against the front-matter schema.
    ///
    /// Missing or mistyped fields fail with `FrontMatterParseError`, a missing or
    /// malformed `date` with `InvalidDateInput`. `id` falls back to `post_id`.
    pub fn from_mapping(post_id: &str, map: Mapping, date_format: Option<&str>) -> Result<FrontMatter> {
        let raw: RawFrontMatter =
            serde_yaml::from_value(Value::Mapping(map)).map_err(|e| BlogError::front_matter(post_id, e))?;

        let date = match raw.date {
            Some(ref date) => str_to_date(date, date_format)?,
            None => return Err(BlogError::invalid_date("", format!("post {} has no date", post_id))),
        };

        Ok(FrontMatter {
            id: raw.id.unwrap_or_else(|| post_id.to_string()),
            title: raw.title,
            description: raw.description,
            thumbnail_path: raw.thumbnail_path,
            date,
            author: raw.author,
            read_time: raw.read_time,
            meta: raw.meta,
            tags: raw.tags,
        })
    }
}
