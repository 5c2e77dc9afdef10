//! Board game review API
//!
//! This crate provides the REST API behind the review site:
//! - Faceted search over games, ranked by their published reviews
//! - Per-game statistics of the mechanics, categories and player counts reviewers picked
//! - Health checks for the process and its database

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
