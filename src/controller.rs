//! HTTP glue for a single protected form.
//!
//! [`FormController::render_form`] issues and binds a token;
//! [`FormController::submit`] resolves it again, runs the
//! [`SubmissionValidator`] and hands accepted records to the [`Sink`].

use crate::config::{FormGuardConfig, TokenStoreMode};
use crate::error::{ConfigError, SubmissionError};
use crate::record::{AGE_FIELD, NAME_FIELD};
use crate::sink::Sink;
use crate::validator::SubmissionValidator;
use crate::LOG_TARGET;
use formguard_core::{Error, HttpRequest, HttpResponse, parse_form_map};
use formguard_csrf::{
    CsrfGuard, CsrfToken, MemoryTokenStore, SignedTokenStore, TokenIssuer, TokenStore,
};
use formguard_log::{debug, error, warn};
use formguard_xss::XssGuard;
use serde_json::json;
use std::sync::Arc;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub struct FormController<T: TokenStore, S: Sink> {
    guard: CsrfGuard,
    issuer: TokenIssuer,
    store: T,
    sink: S,
    validator: SubmissionValidator,
    headers: XssGuard,
}

impl<S: Sink> FormController<Arc<dyn TokenStore>, S> {
    /// Controller with the token store selected by `config.token_store`.
    pub fn from_config(config: &FormGuardConfig, sink: S) -> Result<Self, ConfigError> {
        let store: Arc<dyn TokenStore> = match config.token_store {
            TokenStoreMode::Memory => {
                Arc::new(MemoryTokenStore::with_capacity(config.memory_capacity))
            }
            TokenStoreMode::Signed => {
                let secret = config.secret_bytes()?.ok_or_else(|| {
                    ConfigError::Secret("the signed token store requires a secret".to_string())
                })?;
                Arc::new(SignedTokenStore::new(secret)?)
            }
        };
        Self::new(config, store, sink)
    }
}

impl<T: TokenStore, S: Sink> FormController<T, S> {
    pub fn new(config: &FormGuardConfig, store: T, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let validator = SubmissionValidator::new()
            .with_token_field(config.csrf_field.clone())
            .with_sanitizer(config.sanitizer());

        Ok(Self {
            guard: CsrfGuard::new(config.csrf_config()),
            issuer: TokenIssuer::new(),
            store,
            sink,
            validator,
            headers: XssGuard::default(),
        })
    }

    pub fn with_xss_guard(mut self, guard: XssGuard) -> Self {
        self.headers = guard;
        self
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Issue a token for a new form render.
    ///
    /// The form handle goes out as a cookie; the token itself is returned in
    /// the body for the page to embed in its hidden field.
    pub async fn render_form(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let token = self.issuer.issue();
        let handle = self
            .store
            .bind(&token)
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        debug!(target: LOG_TARGET, "Issued form token for {}", request.path);

        let body = json!({
            "field": self.validator.token_field(),
            "token": token.as_str(),
            "fields": [NAME_FIELD, AGE_FIELD],
        });
        let response = HttpResponse::ok()
            .with_json(&body)?
            .with_header("Cache-Control", "no-store");
        let response = self.guard.add_handle_cookie(response, &handle);

        Ok(self.headers.add_protection_headers(response))
    }

    /// Handle a form POST.
    ///
    /// `201` with the stored record on success, `403` for a token failure,
    /// `422` with per-field messages for a schema failure, `400`/`405`/`415`
    /// for unusable requests and `500` when the sink fails.
    pub async fn submit(&self, request: &HttpRequest) -> HttpResponse {
        let response = match self.process(request).await {
            Ok(response) => response,
            Err(response) => response,
        };
        self.headers.add_protection_headers(response)
    }

    async fn process(&self, request: &HttpRequest) -> Result<HttpResponse, HttpResponse> {
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(HttpResponse::from_error(&Error::MethodNotAllowed(
                request.method.clone(),
            )));
        }

        if let Some(content_type) = request.content_type() {
            if content_type != FORM_CONTENT_TYPE {
                return Err(HttpResponse::from_error(&Error::UnsupportedMediaType(
                    content_type,
                )));
            }
        }

        let mut raw = parse_form_map(&request.body).map_err(|e| {
            warn!(target: LOG_TARGET, "Unreadable form body: {}", e);
            HttpResponse::from_error(&e)
        })?;

        // A token sent in the header stands in for the form field.
        if let Some(token) = self.guard.submitted_token(request, &raw) {
            let token = token.to_string();
            raw.insert(self.validator.token_field().to_string(), token);
        }

        let Some(expected) = self.expected_token(request).await else {
            warn!(target: LOG_TARGET, "Rejected submission: no issued token for this form");
            return Err(SubmissionError::TokenMismatch.into_response());
        };

        let record = self
            .validator
            .validate(&raw, expected.as_str())
            .map_err(SubmissionError::into_response)?;

        let body = serde_json::to_vec(&record)
            .map_err(|e| HttpResponse::from_error(&Error::from(e)))?;

        self.sink.store(record).await.map_err(|e| {
            error!(target: LOG_TARGET, "Sink failed: {}", e);
            SubmissionError::from(e).into_response()
        })?;

        Ok(HttpResponse::created()
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    async fn expected_token(&self, request: &HttpRequest) -> Option<CsrfToken> {
        let handle = self.guard.form_handle(request)?;
        match self.store.redeem(handle).await {
            Ok(token) => token,
            Err(e) => {
                debug!(target: LOG_TARGET, "Form handle rejected: {}", e);
                None
            }
        }
    }
}
