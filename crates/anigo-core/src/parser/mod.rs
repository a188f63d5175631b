//! HTML parsers for AniGo
//!
//! Contains modules for parsing different page types.

pub mod catalog;
pub mod detail;
pub mod episodes;
pub mod servers;
pub mod sources;

pub use catalog::parse_catalog_page;
pub use detail::{parse_show_detail, parse_status};
pub use episodes::parse_episode_list;
pub use servers::parse_server_list;
pub use sources::{compose_quality, parse_stream_sources};
