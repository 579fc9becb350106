use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, instrument};

use super::{
    filter_set::{lookup_expressions, FilterRegistry, FilterSet},
    model::ModelInfo,
};
use crate::config::FilteringConfig;

/// Rejection for a query parameter outside the view's filter catalog.
///
/// Surfaced directly as a 404 response with a `{"detail": ...}` body;
/// this is an expected client error, not an exception path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct InvalidLookup {
    pub detail: String,
}

impl IntoResponse for InvalidLookup {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Per-route validation catalog for [`invalid_lookup_middleware`].
///
/// Exactly one source is consulted per request, in declaration
/// precedence: the filter set, then the filterset-field list, then the
/// filter-field list, then the model's own field names.
///
/// # Example
/// ```rust,ignore
/// let guard = LookupGuard::for_model(ModelInfo::of::<project::Entity>())
///     .with_filterset_fields(["name", "status"])
///     .with_skip_params(&app.config.filtering);
/// let router = Router::new()
///     .route("/projects", get(list_projects))
///     .layer(axum::middleware::from_fn_with_state(
///         Arc::new(guard),
///         invalid_lookup_middleware,
///     ));
/// ```
#[derive(Debug, Clone)]
pub struct LookupGuard {
    filter_set: Option<(FilterSet, FilterRegistry)>,
    filterset_fields: Vec<String>,
    filter_fields: Vec<String>,
    model: ModelInfo,
    skip_params: Vec<String>,
}

impl LookupGuard {
    /// A guard validating against the model's own field names, with the
    /// default skip-list.
    #[must_use]
    pub fn for_model(model: ModelInfo) -> Self {
        Self {
            filter_set: None,
            filterset_fields: Vec::new(),
            filter_fields: Vec::new(),
            model,
            skip_params: FilteringConfig::default().skip_params,
        }
    }

    /// Validate against a filter set's flattened lookup expressions.
    /// Takes precedence over every other source.
    #[must_use]
    pub fn with_filter_set(mut self, filter_set: FilterSet, registry: FilterRegistry) -> Self {
        self.filter_set = Some((filter_set, registry));
        self
    }

    /// Validate against a flat filterset-field list when no filter set
    /// is declared.
    #[must_use]
    pub fn with_filterset_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterset_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Validate against a flat filter-field list when neither a filter
    /// set nor filterset fields are declared.
    #[must_use]
    pub fn with_filter_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the default skip-list with the configured one.
    #[must_use]
    pub fn with_skip_params(mut self, filtering: &FilteringConfig) -> Self {
        self.skip_params = filtering.skip_params.clone();
        self
    }

    /// Check every query key against the first populated source.
    ///
    /// A single trailing `!` (negated-filter marker) is stripped from
    /// each key before matching, and skip-listed keys are never
    /// validated. Returns the first rejection, or `Ok` when every key
    /// is recognized.
    pub fn validate(&self, params: &[(String, String)]) -> Result<(), InvalidLookup> {
        for (key, _) in params {
            let field = key.strip_suffix('!').unwrap_or(key);
            if self.skip_params.iter().any(|skip| skip == field) {
                continue;
            }
            self.validate_field(field)?;
        }
        Ok(())
    }

    fn validate_field(&self, field: &str) -> Result<(), InvalidLookup> {
        // Sources are mutually exclusive: an empty declaration falls
        // through to the next one rather than rejecting everything.
        if let Some((filter_set, registry)) =
            self.filter_set.as_ref().filter(|(set, _)| !set.is_empty())
        {
            let valid_fields = lookup_expressions(filter_set, registry);
            if !valid_fields.iter().any(|valid| valid == field) {
                return Err(InvalidLookup {
                    detail: format!("{field} is not a valid filter field"),
                });
            }
        } else if !self.filterset_fields.is_empty() {
            if !self.filterset_fields.iter().any(|valid| valid == field) {
                return Err(InvalidLookup {
                    detail: format!(
                        "{field} is not a valid field. Filterable fields are: {}",
                        self.filterset_fields.join(", ")
                    ),
                });
            }
        } else if !self.filter_fields.is_empty() {
            if !self.filter_fields.iter().any(|valid| valid == field) {
                return Err(InvalidLookup {
                    detail: format!(
                        "{field} is not a valid field. Filterable fields are: {}",
                        self.filter_fields.join(", ")
                    ),
                });
            }
        } else {
            // Only the base of the lookup is checked against the model,
            // so relation traversal suffixes stay expressible.
            let base = field.split("__").next().unwrap_or(field);
            if !self.model.contains(base) {
                return Err(InvalidLookup {
                    detail: format!("{field} is not a valid field in {}", self.model.name()),
                });
            }
        }
        Ok(())
    }
}

/// Middleware that rejects requests carrying unrecognized filter
/// parameters.
///
/// Performs no mutation: a clean query string is forwarded untouched,
/// an invalid one short-circuits with the guard's 404 rejection.
#[instrument(skip(state, req, next), fields(path))]
pub async fn invalid_lookup_middleware(
    State(state): State<Arc<LookupGuard>>,
    req: Request,
    next: Next,
) -> Response {
    tracing::Span::current().record("path", req.uri().path());

    let query = req.uri().query().unwrap_or("");
    let params: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(params) => params,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    if let Err(rejection) = state.validate(&params) {
        debug!(detail = %rejection.detail, "Rejected unknown filter parameter");
        return rejection.into_response();
    }

    next.run(req).await
}
