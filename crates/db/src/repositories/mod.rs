//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! take `&mut SqliteConnection` as the first argument. Callers pass either a
//! pooled connection or an open transaction (`&mut *tx`), so one HTTP request
//! maps to one transaction.

pub mod folder_repo;
pub mod genre_repo;
pub mod style_repo;
pub mod tag_stat_repo;
pub mod transfer_repo;

pub use folder_repo::FolderRepo;
pub use genre_repo::GenreRepo;
pub use style_repo::StyleRepo;
pub use tag_stat_repo::TagStatRepo;
pub use transfer_repo::TransferRepo;
