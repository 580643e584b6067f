// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Data storage
pub mod storage {
    pub mod atomic;
    pub mod index;
}

// Pairing convention, disk scan and image conversion
pub mod indexing {
    pub mod convert;
    pub mod discovery;
    pub mod pairing;
}

// Search
pub mod search {
    pub mod query;
}

// Collaborator interface used by front ends
pub mod catalog;

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod viewer;
}

// Re-export commonly used types
pub use catalog::{Catalog, PairView, SavedPair};
pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use indexing::discovery::discover_pairs;
pub use indexing::pairing::{find_counterpart, is_pair, pair_identifier};
pub use search::query::search_records;
pub use storage::atomic::{atomic_write, atomic_write_bytes};
pub use storage::index::{IndexState, IndexStore, Record};
pub use ui::cli::Cli;
pub use ui::viewer::open_in_viewer;
