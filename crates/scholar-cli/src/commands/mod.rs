pub mod deploy;
pub mod generate_pages;
pub mod update_sitemap;
pub mod validate;
