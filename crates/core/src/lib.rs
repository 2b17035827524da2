//! Domain logic for the gift-exchange service.
//!
//! Everything in this crate is persistence-agnostic: the draw orchestrator
//! talks to storage through the [`draw::DrawStore`] trait, and the
//! derangement generator is a pure function. The `db` crate provides the
//! Postgres implementation; the `api` crate wires both to HTTP.

pub mod derangement;
pub mod draw;
pub mod error;
pub mod naming;
pub mod types;
