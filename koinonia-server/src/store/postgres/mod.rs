//! Postgres repository implementations.
//!
//! Runtime-checked queries (`sqlx::query_as` + `FromRow`) so the crate
//! builds without a live database.

mod catalog;
mod engagement;
mod giving;
mod media;
mod progress;
mod users;

pub use catalog::PostgresCatalogRepository;
pub use engagement::PostgresEngagementRepository;
pub use giving::PostgresGivingRepository;
pub use media::PostgresMediaRepository;
pub use progress::PostgresProgressRepository;
pub use users::PostgresUserRepository;
