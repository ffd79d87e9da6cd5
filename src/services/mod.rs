// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod catalog;
pub mod gateway;
pub mod resolver;
pub mod token;

pub use catalog::{CatalogCache, DebounceBuffer};
pub use gateway::AchievementGateway;
pub use resolver::ProductResolver;
pub use token::{TokenManager, GALAXY_CLIENT_ID, GALAXY_CLIENT_SECRET};

use crate::error::AppError;

/// Drain a non-2xx response into an [`AppError::Upstream`].
pub(crate) async fn upstream_error(response: reqwest::Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Upstream { status, body }
}
