// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod achievement;
pub mod auth;
pub mod catalog;
pub mod product;

pub use achievement::{Achievement, AchievementsResponse, OwnedGamesResponse};
pub use auth::AuthResponse;
pub use catalog::{BuildRef, GameDetail};
pub use product::{Build, ProductCredential, ProductDocument};
