pub mod sitemap_renderer;
