use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Breeds the backend accepts, compared case-insensitively.
pub const KNOWN_BREEDS: &[&str] = &[
    "Abyssinian",
    "Bengal",
    "Birman",
    "British Shorthair",
    "Maine Coon",
    "Persian",
    "Ragdoll",
    "Scottish Fold",
    "Siamese",
    "Sphynx",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpyCat {
    pub id: u32,
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

#[derive(Deserialize)]
pub struct CreateSpyCat {
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

#[derive(Deserialize)]
pub struct UpdateSpyCat {
    pub salary: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Store {
    cats: BTreeMap<u32, SpyCat>,
    active_missions: BTreeSet<u32>,
    last_id: u32,
}

impl Store {
    pub fn insert(&mut self, input: CreateSpyCat) -> SpyCat {
        self.last_id += 1;
        let cat = SpyCat {
            id: self.last_id,
            name: input.name.trim().to_string(),
            years_of_experience: input.years_of_experience,
            breed: input.breed.trim().to_string(),
            salary: input.salary,
        };
        self.cats.insert(cat.id, cat.clone());
        cat
    }

    /// Cats on an active mission refuse deletion.
    pub fn assign_mission(&mut self, id: u32) {
        self.active_missions.insert(id);
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/cats", get(list_cats).post(create_cat))
        .route(
            "/api/cats/{id}",
            get(get_cat).patch(update_cat).delete(delete_cat),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

/// Error body shaped the way the real backend reports failures.
#[derive(Debug)]
pub enum Rejection {
    NotFound,
    Conflict(&'static str),
    Invalid(Vec<Value>),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Rejection::NotFound => (StatusCode::NOT_FOUND, json!("Spy cat not found")),
            Rejection::Conflict(reason) => (StatusCode::CONFLICT, json!(reason)),
            Rejection::Invalid(entries) => (StatusCode::UNPROCESSABLE_ENTITY, Value::Array(entries)),
        };
        tracing::debug!(status = status.as_u16(), %detail, "request rejected");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

fn invalid_field(field: &str, kind: &str, msg: String) -> Value {
    json!({ "loc": ["body", field], "msg": msg, "type": kind })
}

fn check_salary(salary: f64, errors: &mut Vec<Value>) {
    if salary <= 0.0 {
        errors.push(invalid_field(
            "salary",
            "greater_than",
            "Input should be greater than 0".to_string(),
        ));
    }
}

fn validate_create(input: &CreateSpyCat) -> Result<(), Rejection> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(invalid_field(
            "name",
            "string_too_short",
            "String should have at least 1 character".to_string(),
        ));
    }
    let breed = input.breed.trim();
    if !KNOWN_BREEDS.iter().any(|b| b.eq_ignore_ascii_case(breed)) {
        errors.push(invalid_field(
            "breed",
            "value_error",
            format!("Value error, invalid breed: '{breed}'"),
        ));
    }
    check_salary(input.salary, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Rejection::Invalid(errors))
    }
}

async fn list_cats(State(db): State<Db>) -> Json<Vec<SpyCat>> {
    let store = db.read().await;
    Json(store.cats.values().cloned().collect())
}

async fn create_cat(
    State(db): State<Db>,
    Json(input): Json<CreateSpyCat>,
) -> Result<(StatusCode, Json<SpyCat>), Rejection> {
    validate_create(&input)?;
    let cat = db.write().await.insert(input);
    tracing::info!(id = cat.id, name = %cat.name, "spy cat created");
    Ok((StatusCode::CREATED, Json(cat)))
}

async fn get_cat(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<SpyCat>, Rejection> {
    let store = db.read().await;
    store.cats.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn update_cat(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(input): Json<UpdateSpyCat>,
) -> Result<Json<SpyCat>, Rejection> {
    let mut errors = Vec::new();
    if let Some(salary) = input.salary {
        check_salary(salary, &mut errors);
    }
    if !errors.is_empty() {
        return Err(Rejection::Invalid(errors));
    }

    let mut store = db.write().await;
    let cat = store.cats.get_mut(&id).ok_or(Rejection::NotFound)?;
    if let Some(salary) = input.salary {
        cat.salary = salary;
    }
    tracing::info!(id, salary = cat.salary, "spy cat updated");
    Ok(Json(cat.clone()))
}

async fn delete_cat(State(db): State<Db>, Path(id): Path<u32>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    if !store.cats.contains_key(&id) {
        return Err(Rejection::NotFound);
    }
    if store.active_missions.contains(&id) {
        return Err(Rejection::Conflict("Spy cat has an active mission"));
    }
    store.cats.remove(&id);
    tracing::info!(id, "spy cat deleted");
    Ok(StatusCode::NO_CONTENT)
}
