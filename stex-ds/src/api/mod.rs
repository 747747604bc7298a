//! HTTP API handlers for stex-ds

pub mod banks;
pub mod buildinfo;
pub mod extract;
pub mod health;

pub use banks::list_extractors;
pub use buildinfo::get_build_info;
pub use extract::extract_statement;
pub use health::health_routes;
