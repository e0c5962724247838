use std::fs;
use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://eams.dev/post/first-post</loc>
    <changefreq>monthly</changefreq>
  </url>
</urlset>
*/

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const SITEMAP_FILE: &str = "sitemap.xml";
const ROBOTS_FILE: &str = "robots.txt";
const CHANGE_FREQ: &str = "monthly";

pub struct SiteMap<'a> {
    pub site_url: &'a str,
}

impl<'a> SiteMap<'a> {
    pub fn render(&self, routes: &[String]) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8"?>
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        // <urlset xmlns="...">
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for route in routes {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            push_text(&mut writer, "loc", &full_link(self.site_url, route))?;
            push_text(&mut writer, "changefreq", CHANGE_FREQ)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        // </urlset>
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }

    pub fn render_robots(&self) -> String {
        let site_url = self.site_url.trim_end_matches('/');
        format!(
            "# *\nUser-agent: *\nAllow: /\n\n# Host\nHost: {}\n\n# Sitemaps\nSitemap: {}\n",
            site_url,
            full_link(site_url, SITEMAP_FILE)
        )
    }

    /// Writes `sitemap.xml` and `robots.txt` into `out_dir`, creating it if needed.
    pub fn write_files(&self, routes: &[String], out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join(SITEMAP_FILE), self.render(routes)?)?;
        fs::write(out_dir.join(ROBOTS_FILE), self.render_robots())?;
        Ok(())
    }
}

fn full_link(base_url: &str, route: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), route.trim_start_matches('/'))
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
