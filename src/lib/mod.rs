pub mod config;
pub mod excerpt;
pub mod header;
pub mod meta_tags;
pub mod pipeline;
pub mod reading_time;
pub mod seo;
pub mod types;
pub mod utils;
