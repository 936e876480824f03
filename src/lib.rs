//! Vitae - LaTeX resume compiler with watch mode and job-posting scraping
//!
//! Vitae keeps resume templates as plain `.tex` files, compiles them to PDF
//! with an external LaTeX engine, recompiles automatically while you edit,
//! and fetches job-posting pages through the Firecrawl scrape API so their
//! content can be pasted next to the resume being tailored.

pub mod compiler;
pub mod config;
pub mod error;
pub mod scrape;
pub mod templates;
pub mod watcher;

// Re-exports for convenience
pub use compiler::{compile, CompileOptions, CompileOutcome};
pub use config::{Config, ConfigWarning};
pub use error::{VitaeError, VitaeResult};
pub use scrape::{extract_content, FirecrawlClient, ScrapeError};
pub use templates::{list_templates, resolve_template};
pub use watcher::{watch, WatchEvent, WatchOptions};
