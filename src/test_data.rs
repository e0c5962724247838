#![cfg(test)]

use std::fs;
use std::path::Path;

pub const POST_DATA: &str = "---
id: first-post
title: Designing a blog pipeline
description: How the posts on this blog become pages
thumbnailPath: /images/pipeline.png
date: 12-03-2024
author: Pete
readTime: 5 min
meta: blog, pipeline, markdown
tags:
  - rust
  - architecture
---
# Designing a blog pipeline

Every page on this site starts as a markdown file.
The front-matter on top tells the pipeline what the post is about.

## Parsing

The rest is *just* markdown.
";

/// `POST_DATA` after parsing, serializing and stripping the front-matter block.
pub const POST_DATA_BODY: &str = "
# Designing a blog pipeline

Every page on this site starts as a markdown file.
The front-matter on top tells the pipeline what the post is about.

## Parsing

The rest is *just* markdown.
";

/// Builds a minimal valid post file.
pub fn post_source(title: &str, date: &str, tags: &[&str], body: &str) -> String {
    let mut buf = String::new();
    buf.push_str("---\n");
    buf.push_str(&format!("title: {}\n", title));
    buf.push_str(&format!("description: About {}\n", title));
    buf.push_str(&format!("thumbnailPath: /images/{}.png\n", title));
    buf.push_str(&format!("date: {}\n", date));
    buf.push_str("author: Pete\n");
    buf.push_str("readTime: 3 min\n");
    buf.push_str("meta: test\n");
    if tags.is_empty() {
        buf.push_str("tags: []\n");
    } else {
        buf.push_str("tags:\n");
        for tag in tags {
            buf.push_str(&format!("  - {}\n", tag));
        }
    }
    buf.push_str("---\n");
    buf.push_str(body);
    buf
}

pub fn write_post(dir: &Path, id: &str, source: &str) {
    fs::write(dir.join(format!("{}.md", id)), source).unwrap();
}

/// Writes `count` posts named `post-01`, `post-02`, ... where a higher number is a more recent
/// post. Every post is tagged `all`, even posts `even`, odd posts `odd`.
pub fn write_corpus(dir: &Path, count: u32) {
    for i in 1..=count {
        let id = format!("post-{:02}", i);
        let date = format!("{:02}-01-2024", i);
        let parity = if i % 2 == 0 { "even" } else { "odd" };
        let body = format!("\n# Post {}\n\nThis is post number {}.\n", i, i);
        write_post(dir, &id, &post_source(&id, &date, &["all", parity], &body));
    }
}
