//! # Tier List
//!
//! Leaderboard service for a Minecraft PvP tier list.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tiers, gamemodes, players, applications)
//! - **ranking**: Overall ranking and per-gamemode tier buckets
//! - **source**: Where the player snapshot comes from (data API, local, mock)
//! - **storage**: Local JSONL files
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod ranking;
pub mod source;
pub mod storage;

pub use models::*;
