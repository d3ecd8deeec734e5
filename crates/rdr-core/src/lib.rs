//! # rdr-core
//!
//! Core library for Redash API interaction.
//!
//! This crate provides the API client used by `rdr-cli`: data sources, queries,
//! query results, visualizations and dashboards, all driven through three HTTP
//! primitives with a static API key.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rdr_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> rdr_core::Result<()> {
//!     let client = RedashClient::new("api-key".to_string(), None)?;
//!
//!     let dashboard = client.create_dashboard("Sales").await?;
//!     let mut chart = VisualizationParams::new(12, "line", "Revenue by day");
//!     chart.x_axis = Some("day".to_string());
//!     chart.y_axis = Some(vec![YAxisColumn::new("revenue")]);
//!     let visualization = client.create_visualization(&chart).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, operations, request/response models
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Visualization payloads, widget layout, services
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration file, API key lookup
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, error helpers, job polling
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError, ResourceNotFound, ValidationError};

    pub use crate::api::client::RedashClient;
    pub use crate::api::models::{
        AddWidgetParams, CreateQueryParams, QueryResultsParams, VisualizationParams,
        WidgetPosition, YAxisColumn,
    };

    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::{get_api_key, has_api_key};
    pub use crate::utils::poll::PollConfig;
}

/// API layer - Redash HTTP client and data models.
///
/// - [`api::client`]: `get`/`post`/`delete` primitives with API key authentication
/// - [`api::models`]: request bodies, operation parameters and responses
pub mod api;

/// Business logic layer.
///
/// - [`core::visualization`]: visualization options builder
/// - [`core::layout`]: widget auto-layout
pub mod core;

/// Storage layer - configuration and credentials.
pub mod storage;

/// Utilities layer - validation, error conversion, polling.
pub mod utils;

/// Error handling - hierarchical error system.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
