//! Stateless HTTP request builder and response parser for the spy cat API.
//!
//! # Design
//! `SpyCatClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateSpyCat, SpyCat, UpdateSpyCat};

const CATS_PATH: &str = "/api/cats";

/// Synchronous, stateless client for the spy cat API.
#[derive(Debug, Clone)]
pub struct SpyCatClient {
    base_url: String,
}

impl SpyCatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{CATS_PATH}", self.base_url)
    }

    fn item_url(&self, id: u32) -> String {
        format!("{}{CATS_PATH}/{id}", self.base_url)
    }

    pub fn build_list_cats(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_cat(&self, id: u32) -> HttpRequest {
        bodyless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_cat(&self, input: &CreateSpyCat) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_cat(&self, id: u32, input: &UpdateSpyCat) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Patch, self.item_url(id), input)
    }

    pub fn build_delete_cat(&self, id: u32) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_cats(&self, response: HttpResponse) -> Result<Vec<SpyCat>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_cat(&self, response: HttpResponse) -> Result<SpyCat, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_cat(&self, response: HttpResponse) -> Result<SpyCat, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_cat(&self, response: HttpResponse) -> Result<SpyCat, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_cat(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Any 2xx passes; everything else becomes `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
