//! Confmac - macro-expanding configuration file engine.
//!
//! This library provides the core functionality for confmac, including:
//! - Hierarchical config-file reading with INCLUDE resolution
//! - Eager `$name` / `${name}` macro expansion with first-write-wins
//!   variable semantics
//! - SDEFINE shell-computed variables through an injectable command runner
//! - Per-variable documentation capture from preceding comment blocks
//! - Serialization to a round-trip format and shell-eval dump dialects
//!
//! # Example
//!
//! ```no_run
//! use confmac::{Config, DumpFormat};
//!
//! let config = Config::load(&["site.conf", "defaults.conf"]).unwrap();
//!
//! if let Some(jobs) = config.get("njobs") {
//!     println!("running {jobs} jobs");
//! }
//!
//! let mut stdout = std::io::stdout();
//! config.dump(&mut stdout, DumpFormat::Sh, "cfg_").unwrap();
//! ```

pub mod config;
pub mod dump;
pub mod error;
pub mod expand;
pub mod shell;
pub mod store;

mod reader;

pub use config::Config;
pub use dump::DumpFormat;
pub use error::{ConfmacError, Result};
