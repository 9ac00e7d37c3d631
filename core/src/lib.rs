//! Client core for the spy cat agency API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the page state
//! (list, form, inline edit, error banners) in a controller that hosts drive
//! and render.
//!
//! # Design
//! - `SpyCatClient` is stateless and holds only `base_url`, which the host
//!   injects at construction.
//! - Each CRUD operation is split into `build_*` and `parse_*`, and each
//!   controller operation into `begin_*` and `complete`, so the I/O boundary
//!   is explicit.
//! - Backend error payloads are flattened into one display string by
//!   `normalize::api_error_message`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod draft;
pub mod error;
pub mod http;
pub mod normalize;
pub mod types;
pub mod view;

pub use client::SpyCatClient;
pub use controller::{InlineEdit, Operation, Outcome, PendingRequest, SpyCatController};
pub use draft::{CatDraft, DraftError, DraftField};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use normalize::{api_error_message, prettify};
pub use types::{CreateSpyCat, SpyCat, UpdateSpyCat};
pub use view::render;
