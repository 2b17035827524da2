//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod participant_repo;

pub use event_repo::EventRepo;
pub use participant_repo::ParticipantRepo;
