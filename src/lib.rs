// SPDX-License-Identifier: MIT

//! Client core for browsing a GOG library and inspecting/editing
//! achievement unlock state.
//!
//! Talks to the Galaxy auth, catalog and gameplay endpoints; caches access
//! tokens, per-product credentials and game metadata in JSON documents next
//! to the executable so repeated runs stay cheap.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

pub use app::{AchievementView, App, GameSummary, Session};
pub use error::{AppError, Result};
