//! Creohub DB - Database abstractions
//!
//! SQLx-based database layer for Creohub services.
//!
//! # Example
//!
//! ```rust,ignore
//! use creohub_db::{create_pool, run_migrations, Repositories};
//!
//! let pool = create_pool("postgres://localhost/creohub").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_email("creator@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
