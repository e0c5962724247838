use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use spdlog::debug;

use crate::content::front_matter::{process, strip_front_matter};
use crate::content::{FrontMatter, PostData};
use crate::error::{BlogError, Result};
use crate::text_utils::DEFAULT_DATE_FORMAT;

const MARKDOWN_EXTENSION: &str = "md";

/// Post repository over a flat directory of `<id>.md` files.
pub struct PostList {
    pub root_dir: PathBuf,
    pub date_format: String,
}

impl PostList {
    pub fn new(root_dir: PathBuf) -> Self {
        PostList {
            root_dir,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    /// Lists the ids of every markdown file in the posts directory, in directory order.
    pub fn list_post_ids(&self) -> Result<Vec<String>> {
        let unavailable = |source| BlogError::ContentDirectoryUnavailable {
            path: self.root_dir.clone(),
            source,
        };

        let mut ids = vec![];
        for entry in fs::read_dir(&self.root_dir).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;
            if !entry.file_type().map_err(unavailable)?.is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(id.to_string());
            }
        }

        debug!("Found {} posts in {}", ids.len(), self.root_dir.display());
        Ok(ids)
    }

    pub fn post_path(&self, id: &str) -> Result<PathBuf> {
        // Ids come from urls, never let them leave the posts directory
        let mut components = Path::new(id).components();
        let single_name = matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none();
        if !single_name || id.contains(['/', '\\']) {
            return Err(BlogError::PostNotFound(id.to_string()));
        }
        Ok(self.root_dir.join(format!("{}.{}", id, MARKDOWN_EXTENSION)))
    }

    pub fn modified(&self, id: &str) -> Result<SystemTime> {
        let path = self.post_path(id)?;
        let metadata = fs::metadata(&path).map_err(|e| Self::read_error(id, e))?;
        Ok(metadata.modified()?)
    }

    /// Reads and processes one post.
    pub fn get_post(&self, id: &str) -> Result<PostData> {
        let path = self.post_path(id)?;
        let raw = fs::read_to_string(&path).map_err(|e| Self::read_error(id, e))?;
        debug!("Parsing post {} from {}", id, path.display());

        let doc = process(id, &raw)?;
        let front_matter = FrontMatter::from_mapping(id, doc.front_matter, Some(&self.date_format))?;
        let body = strip_front_matter(&doc.body);

        Ok(PostData { front_matter, body })
    }

    fn read_error(id: &str, err: std::io::Error) -> BlogError {
        match err.kind() {
            ErrorKind::NotFound => BlogError::PostNotFound(id.to_string()),
            _ => BlogError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::test_data::{post_source, write_corpus, write_post, POST_DATA, POST_DATA_BODY};

    use super::*;

    #[test]
    fn test_list_post_ids() {
        let dir = TempDir::new().unwrap();
        write_corpus(dir.path(), 3);
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let post_list = PostList::new(dir.path().to_path_buf());
        let mut ids = post_list.list_post_ids().unwrap();
        ids.sort();
        assert_eq!(ids, ["post-01", "post-02", "post-03"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let post_list = PostList::new(dir.path().join("posts"));
        let res = post_list.list_post_ids();
        assert!(matches!(res, Err(BlogError::ContentDirectoryUnavailable { .. })));
    }

    #[test]
    fn test_get_post() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "first-post", POST_DATA);

        let post_list = PostList::new(dir.path().to_path_buf());
        let post = post_list.get_post("first-post").unwrap();
        assert_eq!(post.front_matter.title, "Designing a blog pipeline");
        assert_eq!(post.front_matter.tags, ["rust", "architecture"]);
        assert_eq!(post.body, POST_DATA_BODY);
    }

    #[test]
    fn test_post_not_found() {
        let dir = TempDir::new().unwrap();
        let post_list = PostList::new(dir.path().to_path_buf());

        let res = post_list.get_post("does-not-exist");
        assert!(matches!(res, Err(BlogError::PostNotFound(ref id)) if id == "does-not-exist"));

        for id in ["../etc/passwd", "..", ".", "", "/etc/passwd", "drafts/post", "drafts\\post"] {
            let res = post_list.get_post(id);
            assert!(matches!(res, Err(BlogError::PostNotFound(_))), "{}", id);
        }
    }

    #[test]
    fn test_dots_inside_id() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "rust-1..0-notes", &post_source("notes", "01-01-2024", &[], "Release notes.\n"));

        let post_list = PostList::new(dir.path().to_path_buf());
        assert_eq!(post_list.list_post_ids().unwrap(), ["rust-1..0-notes"]);
        let post = post_list.get_post("rust-1..0-notes").unwrap();
        assert_eq!(post.front_matter.id, "rust-1..0-notes");
    }

    #[test]
    fn test_custom_date_format() {
        let dir = TempDir::new().unwrap();
        let source = POST_DATA.replace("date: 12-03-2024", "date: 2024/03/12");
        write_post(dir.path(), "first-post", &source);

        let post_list = PostList::new(dir.path().to_path_buf()).with_date_format("YYYY/MM/DD");
        let post = post_list.get_post("first-post").unwrap();
        assert_eq!(post.front_matter.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
    }
}
