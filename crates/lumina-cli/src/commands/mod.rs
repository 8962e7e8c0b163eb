pub mod config;
pub mod index;
pub mod search;
pub mod status;

pub use config::run_config;
pub use index::run_index;
pub use search::run_search;
pub use status::show_status;
