use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spdlog::{info, warn};

use folio::logger::configure_logger;
use folio::post_render::render_post_html;
use folio::routes::static_routes;
use folio::view::sitemap_renderer::SiteMap;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about = "Reads the blog posts and prints what the site is built from", long_about = None)]
struct Args {
    /// Config path. Defaults to folio.toml next to the binary, in the current dir or in the user config dir
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ids of every post, in directory order
    Posts,
    /// Front-matter and body of one post
    Post { id: String },
    /// One post with its body rendered to HTML
    Render { id: String },
    /// Every card, most recent first
    Cards,
    /// Cards reserved for the recent posts section
    Recent,
    /// Cards of one list page
    Page { number: u32 },
    /// Number of list pages
    Pages,
    /// Every tag, in the order first seen
    Tags,
    /// Cards carrying a tag
    Tag { tag: String },
    /// Every route the site is generated for
    Routes,
    /// Writes sitemap.xml and robots.txt into the output directory
    Sitemap {
        /// Overrides paths.out_dir
        #[arg(short, long)]
        out_dir: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path.map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Reading posts from {}", config.paths.posts_dir.display());
    let processor = config.post_processor();

    match args.command {
        Command::Posts => print_json(&processor.post_list().list_post_ids()?),
        Command::Post { id } => print_json(&processor.post_list().get_post(&id)?),
        Command::Render { id } => {
            let post = processor.post_list().get_post(&id)?;
            print_json(&render_post_html(&post)?)
        }
        Command::Cards => print_json(&processor.all_cards()?),
        Command::Recent => print_json(&processor.recent_cards()?),
        Command::Page { number } => print_json(&processor.cards_for_page(number)?),
        Command::Pages => print_json(&processor.total_page_count()?),
        Command::Tags => print_json(&processor.all_tags()?),
        Command::Tag { tag } => print_json(&processor.cards_for_tag(&tag)?),
        Command::Routes => print_json(&static_routes(&processor)?),
        Command::Sitemap { out_dir } => {
            let site = config.site.as_ref().ok_or_else(|| anyhow!("[site] url is required to build the sitemap"))?;
            let out_dir = out_dir.map(PathBuf::from).unwrap_or_else(|| config.paths.out_dir.clone());

            let routes = static_routes(&processor)?;
            SiteMap { site_url: &site.url }.write_files(&routes, &out_dir)?;
            info!("Wrote sitemap with {} routes to {}", routes.len(), out_dir.display());
            Ok(())
        }
    }
}
