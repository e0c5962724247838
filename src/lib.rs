//! Content pipeline for a statically generated blog.
//!
//! Posts are markdown files with a YAML front-matter block. [`post_list`] finds and
//! parses them, [`card`] turns each one into a list card, and [`post_processor`]
//! sorts, paginates and groups the cards by tag for the site generator.

pub mod card;
pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod paginator;
pub mod post_cache;
pub mod post_list;
pub mod post_processor;
pub mod post_render;
pub mod routes;
pub mod text_utils;
pub mod view;
mod test_data;
