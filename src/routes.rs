use lazy_static::lazy_static;
use url::Url;

use crate::error::Result;
use crate::post_processor::PostProcessor;

/// Percent-encodes `segment` so it stays a single path segment of a url.
fn encode_segment(segment: &str) -> String {
    lazy_static! {
        static ref ROUTE_BASE: Url = Url::parse("http://localhost/").unwrap();
    }

    let mut url = ROUTE_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Every path the site is generated for: home, about, list pages, tag pages and posts.
pub fn static_routes(processor: &PostProcessor) -> Result<Vec<String>> {
    let mut routes = vec!["/".to_string(), "/about".to_string()];

    for page in 1..=processor.total_page_count()? {
        routes.push(format!("/page/{}", page));
    }

    for tag in processor.all_tags()? {
        routes.push(format!("/tag/{}", encode_segment(&tag)));
    }

    // Posts are listed by recency rather than directory order
    for card in processor.all_cards()? {
        routes.push(format!("/post/{}", encode_segment(&card.id)));
    }

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::paginator::PageSettings;
    use crate::post_list::PostList;
    use crate::test_data::{post_source, write_corpus, write_post};

    use super::*;

    #[test]
    fn test_static_routes() {
        let dir = TempDir::new().unwrap();
        write_corpus(dir.path(), 10);
        let processor = PostProcessor::new(PostList::new(dir.path().to_path_buf()), PageSettings::default());

        let routes = static_routes(&processor).unwrap();
        assert_eq!(&routes[..4], ["/", "/about", "/page/1", "/page/2"]);
        assert_eq!(&routes[4..7], ["/tag/all", "/tag/even", "/tag/odd"]);
        assert_eq!(routes[7], "/post/post-10");
        assert_eq!(routes.len(), 17);
    }

    #[test]
    fn test_encoded_routes() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "my notes", &post_source("notes", "01-01-2024", &["c#", "web dev", "rust"], "Notes.\n"));
        let processor = PostProcessor::new(PostList::new(dir.path().to_path_buf()), PageSettings::default());

        let routes = static_routes(&processor).unwrap();
        assert_eq!(routes, ["/", "/about", "/tag/c%23", "/tag/web%20dev", "/tag/rust", "/post/my%20notes"]);
    }
}
