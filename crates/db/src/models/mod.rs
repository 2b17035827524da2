//! Database entity models.

pub mod event;
pub mod participant;
