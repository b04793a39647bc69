//! # cynews
//!
//! A cybersecurity news reader core. Given a country, language, page and
//! optional search filters, it queries a NewsAPI-compatible search service
//! and returns one page of relevant articles, falling back to a deterministic
//! offline article set whenever live data is unavailable.
//!
//! ## Architecture
//!
//! 1. **Session** ([`session`]): owns filter state and tags each request with a sequence token
//! 2. **Resolution** ([`resolver`]): tries the headline tier, then full-text search
//! 3. **Fallback** ([`fallback`]): synthesizes 100 articles when no tier succeeds
//! 4. **Output** ([`outputs`]): renders the session's page as Markdown or JSON

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod models;
pub mod outputs;
pub mod pagination;
pub mod resolver;
pub mod session;
pub mod utils;

pub use error::{ConfigError, RetrievalError};
pub use fallback::generate_fallback;
pub use models::{Article, PageResult, QueryParameters};
pub use resolver::Resolver;
pub use session::Session;
