//! Extraction of teaser and detail records from rendered page source.

pub mod html;


pub use html::{parse_detail_page, parse_search_page};
