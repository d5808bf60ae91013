//! CLI command implementations.

pub mod build;
pub mod dev;
pub mod init;
pub mod search;
pub mod tags;
pub mod verify;

pub use build::build_site;
pub use dev::dev_server;
pub use init::init_project;
pub use search::{search_site, SearchOptions};
pub use tags::list_tags;
pub use verify::verify_site;
