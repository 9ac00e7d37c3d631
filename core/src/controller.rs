//! View state for the spy cat page and the operations that change it.
//!
//! # Design
//! The controller follows the same split as [`SpyCatClient`]: every network
//! intent has a `begin_*` step that updates local state and returns a
//! [`PendingRequest`], and a [`SpyCatController::complete`] step that applies
//! the outcome. Hosts with an event loop keep requests in flight and complete
//! them in whatever order they resolve; nothing here serializes overlapping
//! requests, so the last completion applied wins for the state it touches.
//! Hosts that execute synchronously can use [`SpyCatController::dispatch`]
//! or the one-shot helpers (`load`, `submit`, `confirm_edit`, `delete`).
//!
//! Failures never escape: each one becomes either the top-level banner
//! (`error`) or the form-scoped message (`form_error`).

use crate::client::SpyCatClient;
use crate::draft::{parse_amount, CatDraft, DraftError, DraftField};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::normalize::api_error_message;
use crate::types::{SpyCat, UpdateSpyCat};

pub const LOAD_FAILED: &str = "Failed to load spy cats. Please try again.";
pub const CREATE_FAILED: &str = "Failed to add spy cat. Please check the breed name.";
pub const UPDATE_FAILED: &str = "Failed to update salary.";
pub const DELETE_FAILED: &str = "Failed to delete spy cat. They might have an active mission.";
pub const DELETE_PROMPT: &str = "Are you sure you want to remove this spy cat?";

/// Which operation an in-flight request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    UpdateSalary { id: u32 },
    Delete { id: u32 },
}

/// A request the host must execute, tagged with the operation to complete.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub operation: Operation,
    pub request: HttpRequest,
}

/// What came back for a `PendingRequest`.
pub type Outcome = Result<HttpResponse, TransportError>;

/// The single row being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub id: u32,
    pub salary: String,
}

#[derive(Debug, Clone)]
pub struct SpyCatController {
    client: SpyCatClient,
    cats: Vec<SpyCat>,
    loading: bool,
    error: Option<String>,
    form: CatDraft,
    form_error: Option<String>,
    submitting: bool,
    editing: Option<InlineEdit>,
}

impl SpyCatController {
    /// A fresh controller starts in the loading state with an empty list.
    pub fn new(client: SpyCatClient) -> Self {
        Self {
            client,
            cats: Vec::new(),
            loading: true,
            error: None,
            form: CatDraft::default(),
            form_error: None,
            submitting: false,
            editing: None,
        }
    }

    pub fn cats(&self) -> &[SpyCat] {
        &self.cats
    }

    pub fn cat(&self, id: u32) -> Option<&SpyCat> {
        self.cats.iter().find(|c| c.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &CatDraft {
        &self.form
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the add control is enabled. Only one create runs at a time.
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn editing(&self) -> Option<&InlineEdit> {
        self.editing.as_ref()
    }

    pub fn set_form_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    pub fn begin_load(&mut self) -> PendingRequest {
        self.error = None;
        PendingRequest {
            operation: Operation::Load,
            request: self.client.build_list_cats(),
        }
    }

    fn complete_load(&mut self, outcome: Outcome) {
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_list_cats(response));
        match result {
            Ok(cats) => {
                tracing::debug!(count = cats.len(), "loaded spy cats");
                self.cats = cats;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load spy cats");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// Validate the form and, if it holds up, start the create request.
    ///
    /// An invalid draft sets the form error and returns `None`, as does a
    /// call made while an earlier create is still in flight.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if !self.can_submit() {
            return None;
        }
        self.form_error = None;
        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                self.reject_draft(e);
                return None;
            }
        };
        match self.client.build_create_cat(&payload) {
            Ok(request) => {
                self.submitting = true;
                Some(PendingRequest {
                    operation: Operation::Create,
                    request,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to build create request");
                self.form_error = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }

    fn reject_draft(&mut self, e: DraftError) {
        tracing::debug!(reason = %e, "draft rejected");
        self.form_error = Some(e.to_string());
    }

    fn complete_create(&mut self, outcome: Outcome) {
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_create_cat(response));
        match result {
            Ok(cat) => {
                tracing::debug!(id = cat.id, "spy cat created");
                self.cats.push(cat);
                self.form.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create spy cat");
                self.form_error = Some(display_message(&e, CREATE_FAILED));
            }
        }
        self.submitting = false;
    }

    // -----------------------------------------------------------------------
    // Inline salary edit
    // -----------------------------------------------------------------------

    /// Put `id` in edit mode with its current salary as the draft.
    pub fn begin_edit(&mut self, id: u32) {
        if let Some(cat) = self.cat(id) {
            self.editing = Some(InlineEdit {
                id,
                salary: cat.salary.to_string(),
            });
        }
    }

    pub fn set_edit_salary(&mut self, salary: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.salary = salary.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Whether the confirm control is enabled for the current edit.
    pub fn can_confirm_edit(&self) -> bool {
        let Some(edit) = self.editing.as_ref() else {
            return false;
        };
        match parse_amount(&edit.salary) {
            Some(salary) if salary > 0.0 => !self.is_unchanged(edit.id, salary),
            _ => false,
        }
    }

    fn is_unchanged(&self, id: u32, salary: f64) -> bool {
        self.cat(id).is_some_and(|cat| cat.salary == salary)
    }

    /// Start the salary update for the row being edited.
    ///
    /// A draft that is not a positive number sets the banner error; an
    /// unchanged draft is ignored. Neither issues a request.
    pub fn begin_confirm_edit(&mut self) -> Option<PendingRequest> {
        self.error = None;
        let edit = self.editing.as_ref()?;
        let id = edit.id;

        let salary = match parse_amount(&edit.salary) {
            Some(salary) if salary > 0.0 => salary,
            _ => {
                self.error = Some(DraftError::NonPositiveSalary.to_string());
                return None;
            }
        };
        if self.is_unchanged(id, salary) {
            return None;
        }

        match self.client.build_update_cat(id, &UpdateSpyCat::salary(salary)) {
            Ok(request) => Some(PendingRequest {
                operation: Operation::UpdateSalary { id },
                request,
            }),
            Err(e) => {
                tracing::error!(id, error = %e, "failed to build update request");
                self.error = Some(UPDATE_FAILED.to_string());
                None
            }
        }
    }

    fn complete_update(&mut self, id: u32, outcome: Outcome) {
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_update_cat(response));
        match result {
            Ok(updated) => {
                tracing::debug!(id, salary = updated.salary, "salary updated");
                if let Some(slot) = self.cats.iter_mut().find(|c| c.id == id) {
                    *slot = updated;
                }
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                }
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to update salary");
                self.error = Some(display_message(&e, UPDATE_FAILED));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Ask `confirm` and, on yes, start deleting `id`.
    pub fn begin_delete<F>(&mut self, id: u32, confirm: F) -> Option<PendingRequest>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return None;
        }
        Some(PendingRequest {
            operation: Operation::Delete { id },
            request: self.client.build_delete_cat(id),
        })
    }

    fn complete_delete(&mut self, id: u32, outcome: Outcome) {
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_delete_cat(response));
        match result {
            Ok(()) => {
                tracing::debug!(id, "spy cat removed");
                self.cats.retain(|c| c.id != id);
            }
            Err(e) => {
                tracing::error!(id, error = %e, "failed to delete spy cat");
                self.error = Some(DELETE_FAILED.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Completion and synchronous helpers
    // -----------------------------------------------------------------------

    /// Apply the outcome of a request started by one of the `begin_*` steps.
    pub fn complete(&mut self, operation: Operation, outcome: Outcome) {
        match operation {
            Operation::Load => self.complete_load(outcome),
            Operation::Create => self.complete_create(outcome),
            Operation::UpdateSalary { id } => self.complete_update(id, outcome),
            Operation::Delete { id } => self.complete_delete(id, outcome),
        }
    }

    /// Execute `pending` on `transport` and apply the outcome.
    pub fn dispatch<T: Transport + ?Sized>(&mut self, pending: PendingRequest, transport: &T) {
        tracing::debug!(
            method = pending.request.method.as_str(),
            path = %pending.request.path,
            "dispatching request"
        );
        let outcome = transport.execute(&pending.request);
        self.complete(pending.operation, outcome);
    }

    pub fn load<T: Transport + ?Sized>(&mut self, transport: &T) {
        let pending = self.begin_load();
        self.dispatch(pending, transport);
    }

    pub fn submit<T: Transport + ?Sized>(&mut self, transport: &T) {
        if let Some(pending) = self.begin_submit() {
            self.dispatch(pending, transport);
        }
    }

    pub fn confirm_edit<T: Transport + ?Sized>(&mut self, transport: &T) {
        if let Some(pending) = self.begin_confirm_edit() {
            self.dispatch(pending, transport);
        }
    }

    pub fn delete<T, F>(&mut self, id: u32, confirm: F, transport: &T)
    where
        T: Transport + ?Sized,
        F: FnOnce(&str) -> bool,
    {
        if let Some(pending) = self.begin_delete(id, confirm) {
            self.dispatch(pending, transport);
        }
    }
}

/// The normalized backend message for `e`, or `fallback` when there is none.
fn display_message(e: &ApiError, fallback: &str) -> String {
    e.payload()
        .map(|payload| api_error_message(Some(&payload)))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;

    const BASE_URL: &str = "http://cats.test";

    /// Replays canned outcomes and records every request it was asked to run.
    struct ScriptedTransport {
        outcomes: RefCell<Vec<Outcome>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into_iter().rev().collect()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }

        fn last(&self) -> HttpRequest {
            self.seen.borrow().last().cloned().expect("no request issued")
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Outcome {
            self.seen.borrow_mut().push(request.clone());
            self.outcomes.borrow_mut().pop().expect("unexpected request")
        }
    }

    fn ok(status: u16, body: &str) -> Outcome {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn cat_json(id: u32, name: &str, salary: f64) -> String {
        serde_json::json!({
            "id": id,
            "name": name,
            "years_of_experience": 3,
            "breed": "Bengal",
            "salary": salary,
        })
        .to_string()
    }

    fn controller() -> SpyCatController {
        SpyCatController::new(SpyCatClient::new(BASE_URL))
    }

    /// A controller already loaded with cats 7 (salary 1000) and 8 (salary 2000).
    fn loaded() -> SpyCatController {
        let mut c = controller();
        let body = format!("[{},{}]", cat_json(7, "Tom", 1000.0), cat_json(8, "Kit", 2000.0));
        c.load(&ScriptedTransport::new(vec![ok(200, &body)]));
        c
    }

    fn fill_form(c: &mut SpyCatController, name: &str, years: &str, breed: &str, salary: &str) {
        c.set_form_field(DraftField::Name, name);
        c.set_form_field(DraftField::YearsOfExperience, years);
        c.set_form_field(DraftField::Breed, breed);
        c.set_form_field(DraftField::Salary, salary);
    }

    // --- load ---

    #[test]
    fn starts_loading_and_empty() {
        let c = controller();
        assert!(c.is_loading());
        assert!(c.cats().is_empty());
        assert!(c.error().is_none());
    }

    #[test]
    fn load_success_replaces_list() {
        let c = loaded();
        assert!(!c.is_loading());
        assert_eq!(c.cats().len(), 2);
        assert!(c.error().is_none());
    }

    #[test]
    fn load_http_failure_sets_generic_error() {
        let mut c = controller();
        c.load(&ScriptedTransport::new(vec![ok(500, "boom")]));
        assert!(!c.is_loading());
        assert_eq!(c.error(), Some(LOAD_FAILED));
        assert!(c.cats().is_empty());
    }

    #[test]
    fn load_transport_failure_sets_generic_error() {
        let mut c = controller();
        c.load(&ScriptedTransport::new(vec![Err(TransportError("refused".into()))]));
        assert!(!c.is_loading());
        assert_eq!(c.error(), Some(LOAD_FAILED));
    }

    #[test]
    fn reload_clears_previous_error() {
        let mut c = controller();
        c.load(&ScriptedTransport::new(vec![ok(503, "")]));
        assert!(c.error().is_some());
        c.load(&ScriptedTransport::new(vec![ok(200, "[]")]));
        assert!(c.error().is_none());
    }

    // --- submit ---

    #[test]
    fn valid_draft_issues_exactly_one_create_with_parsed_fields() {
        let mut c = loaded();
        fill_form(&mut c, " Agent Whiskers ", "5", "Persian ", "50000");
        let transport = ScriptedTransport::new(vec![ok(201, &cat_json(9, "Agent Whiskers", 50000.0))]);
        c.submit(&transport);

        assert_eq!(transport.calls(), 1);
        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, format!("{BASE_URL}/api/cats"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Agent Whiskers",
                "years_of_experience": 5,
                "breed": "Persian",
                "salary": 50000.0,
            })
        );

        assert_eq!(c.cats().len(), 3);
        assert_eq!(c.cats()[2].id, 9);
        assert_eq!(c.form(), &CatDraft::default());
        assert!(c.form_error().is_none());
        assert!(!c.is_submitting());
    }

    #[test]
    fn invalid_drafts_never_reach_the_network() {
        let cases = [
            ("", "1", "Bengal", "10"),
            ("Tom", "x", "Bengal", "10"),
            ("Tom", "1", "", "10"),
            ("Tom", "1", "Bengal", "abc"),
            ("Tom", "1", "Bengal", "0"),
            ("Tom", "-2", "Bengal", "10"),
        ];
        for (name, years, breed, salary) in cases {
            let mut c = loaded();
            fill_form(&mut c, name, years, breed, salary);
            let transport = ScriptedTransport::new(Vec::new());
            c.submit(&transport);
            assert_eq!(transport.calls(), 0, "{name:?} {years:?} {breed:?} {salary:?}");
            assert!(c.form_error().is_some_and(|e| !e.is_empty()));
            assert!(!c.is_submitting());
        }
    }

    #[test]
    fn submitting_flag_is_held_while_in_flight() {
        let mut c = loaded();
        fill_form(&mut c, "Tom", "1", "Bengal", "10");
        let pending = c.begin_submit().expect("valid draft");
        assert!(c.is_submitting());
        c.complete(pending.operation, ok(201, &cat_json(9, "Tom", 10.0)));
        assert!(!c.is_submitting());
    }

    #[test]
    fn second_submit_waits_for_the_first() {
        let mut c = loaded();
        fill_form(&mut c, "Tom", "1", "Bengal", "10");
        let first = c.begin_submit().expect("valid draft");
        assert!(!c.can_submit());
        assert!(c.begin_submit().is_none(), "no second create while one is in flight");
        assert!(c.is_submitting());
        assert!(c.form_error().is_none());

        c.complete(first.operation, ok(201, &cat_json(9, "Tom", 10.0)));
        assert!(c.can_submit());
        assert_eq!(c.cats().len(), 3);

        fill_form(&mut c, "Kit", "2", "Persian", "20");
        assert!(c.begin_submit().is_some());
    }

    #[test]
    fn create_rejection_shows_normalized_backend_message() {
        let mut c = loaded();
        fill_form(&mut c, "Tom", "1", "Sphinx", "10");
        let body = r#"{"detail":[{"loc":["body","breed"],"msg":"invalid breed: 'Sphinx'"}]}"#;
        c.submit(&ScriptedTransport::new(vec![ok(422, body)]));

        assert_eq!(
            c.form_error(),
            Some("Invalid breed: Sphinx. Please use a valid breed name.")
        );
        assert_eq!(c.form().breed, "Sphinx", "draft is kept on failure");
        assert_eq!(c.cats().len(), 2);
        assert!(c.error().is_none(), "banner is untouched by form failures");
    }

    #[test]
    fn create_failure_without_payload_uses_fallback() {
        let mut c = loaded();
        fill_form(&mut c, "Tom", "1", "Bengal", "10");
        c.submit(&ScriptedTransport::new(vec![Err(TransportError("refused".into()))]));
        assert_eq!(c.form_error(), Some(CREATE_FAILED));

        c.submit(&ScriptedTransport::new(vec![ok(500, "")]));
        assert_eq!(c.form_error(), Some(CREATE_FAILED));
    }

    // --- edit ---

    #[test]
    fn begin_edit_seeds_draft_with_current_salary() {
        let mut c = loaded();
        c.begin_edit(7);
        assert_eq!(
            c.editing(),
            Some(&InlineEdit {
                id: 7,
                salary: "1000".to_string()
            })
        );
    }

    #[test]
    fn begin_edit_ignores_unknown_id() {
        let mut c = loaded();
        c.begin_edit(99);
        assert!(c.editing().is_none());
    }

    #[test]
    fn confirm_is_disabled_for_unusable_drafts() {
        let mut c = loaded();
        c.begin_edit(7);
        for draft in ["", "abc", "0", "-5", "1000", "1000.0"] {
            c.set_edit_salary(draft);
            assert!(!c.can_confirm_edit(), "{draft:?}");
        }
        c.set_edit_salary("1200");
        assert!(c.can_confirm_edit());
    }

    #[test]
    fn unchanged_salary_issues_no_call() {
        let mut c = loaded();
        c.begin_edit(7);
        let transport = ScriptedTransport::new(Vec::new());
        c.confirm_edit(&transport);
        assert_eq!(transport.calls(), 0);
        assert!(c.error().is_none());
        assert!(c.editing().is_some());
    }

    #[test]
    fn non_positive_salary_sets_banner_without_call() {
        let mut c = loaded();
        c.begin_edit(7);
        c.set_edit_salary("-1");
        let transport = ScriptedTransport::new(Vec::new());
        c.confirm_edit(&transport);
        assert_eq!(transport.calls(), 0);
        assert_eq!(c.error(), Some("Salary must be greater than 0"));
    }

    #[test]
    fn confirmed_edit_patches_only_salary_and_applies_server_copy() {
        let mut c = loaded();
        c.begin_edit(7);
        c.set_edit_salary("1500.25");
        // The server's copy wins, even where it differs from what was sent.
        let transport = ScriptedTransport::new(vec![ok(200, &cat_json(7, "Tom Renamed", 1500.0))]);
        c.confirm_edit(&transport);

        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, format!("{BASE_URL}/api/cats/7"));
        assert_eq!(req.body.as_deref(), Some(r#"{"salary":1500.25}"#));

        let cat = c.cat(7).unwrap();
        assert_eq!(cat.name, "Tom Renamed");
        assert_eq!(cat.salary, 1500.0);
        assert!(c.editing().is_none());
        assert_eq!(c.cats().len(), 2);
    }

    #[test]
    fn failed_edit_keeps_edit_mode_and_sets_banner() {
        let mut c = loaded();
        c.begin_edit(8);
        c.set_edit_salary("3000");
        let body = r#"{"detail":[{"loc":["body","salary"],"msg":"Input should be less than 2500"}]}"#;
        c.confirm_edit(&ScriptedTransport::new(vec![ok(422, body)]));
        assert_eq!(c.error(), Some("Salary: Input should be less than 2500"));
        assert!(c.editing().is_some());
        assert_eq!(c.cat(8).unwrap().salary, 2000.0);
    }

    #[test]
    fn failed_edit_without_payload_uses_fallback() {
        let mut c = loaded();
        c.begin_edit(8);
        c.set_edit_salary("3000");
        c.confirm_edit(&ScriptedTransport::new(vec![Err(TransportError("reset".into()))]));
        assert_eq!(c.error(), Some(UPDATE_FAILED));
    }

    #[test]
    fn cancel_edit_discards_draft() {
        let mut c = loaded();
        c.begin_edit(7);
        c.set_edit_salary("5");
        c.cancel_edit();
        assert!(c.editing().is_none());
        assert!(!c.can_confirm_edit());
        assert!(c.begin_confirm_edit().is_none());
    }

    // --- delete ---

    #[test]
    fn confirmed_delete_removes_exactly_that_cat() {
        let mut c = loaded();
        let transport = ScriptedTransport::new(vec![ok(204, "")]);
        let mut asked = None;
        c.delete(
            7,
            |prompt| {
                asked = Some(prompt.to_string());
                true
            },
            &transport,
        );
        assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
        assert_eq!(transport.last().method, HttpMethod::Delete);
        assert_eq!(transport.last().path, format!("{BASE_URL}/api/cats/7"));
        assert_eq!(c.cats().len(), 1);
        assert!(c.cat(7).is_none());
        assert!(c.cat(8).is_some());
    }

    #[test]
    fn declined_delete_issues_no_call() {
        let mut c = loaded();
        let transport = ScriptedTransport::new(Vec::new());
        c.delete(7, |_| false, &transport);
        assert_eq!(transport.calls(), 0);
        assert_eq!(c.cats().len(), 2);
    }

    #[test]
    fn failed_delete_keeps_list_and_sets_banner() {
        let mut c = loaded();
        let before = c.cats().to_vec();
        c.delete(
            7,
            |_| true,
            &ScriptedTransport::new(vec![ok(409, r#"{"detail":"Spy cat has an active mission"}"#)]),
        );
        assert_eq!(c.cats(), before.as_slice());
        assert_eq!(c.error(), Some(DELETE_FAILED));
    }

    // --- overlapping requests ---

    #[test]
    fn completions_apply_in_arrival_order() {
        let mut c = loaded();
        let delete = c.begin_delete(7, |_| true).unwrap();
        let reload = c.begin_load();

        // The delete lands first, then a stale list that still has cat 7.
        c.complete(delete.operation, ok(204, ""));
        assert!(c.cat(7).is_none());
        let stale = format!("[{},{}]", cat_json(7, "Tom", 1000.0), cat_json(8, "Kit", 2000.0));
        c.complete(reload.operation, ok(200, &stale));
        assert!(c.cat(7).is_some());
    }
}
