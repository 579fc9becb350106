use std::collections::HashMap;

use tracing::warn;

/// A single entry in a [`FilterSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Filters on the declared field itself.
    Scalar,
    /// Delegates to another filter set, registered by name in a
    /// [`FilterRegistry`].
    Related { filter_set: String },
}

/// Ordered, immutable declaration of the filters a view accepts.
///
/// Related entries refer to their target set by registry name, so
/// self-referential and mutually recursive declarations need no
/// reference cycles.
///
/// # Example
/// ```rust,ignore
/// let registry = FilterRegistry::new()
///     .register("owners", FilterSet::new().field("name").field("email"));
/// let filters = FilterSet::new()
///     .field("status")
///     .related("owner", "owners");
/// assert_eq!(
///     lookup_expressions(&filters, &registry),
///     ["status", "owner__name", "owner__email"],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<(String, Filter)>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a scalar filter on `name`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.filters.push((name.into(), Filter::Scalar));
        self
    }

    /// Declare a related filter on `name`, delegating to the registered
    /// set `filter_set`.
    #[must_use]
    pub fn related(mut self, name: impl Into<String>, filter_set: impl Into<String>) -> Self {
        self.filters.push((
            name.into(),
            Filter::Related {
                filter_set: filter_set.into(),
            },
        ));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.filters.iter().map(|(name, filter)| (name.as_str(), filter))
    }
}

/// Name-keyed collection of filter sets, consulted when flattening
/// related filters.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    sets: HashMap<String, FilterSet>,
}

impl FilterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, name: impl Into<String>, filter_set: FilterSet) -> Self {
        self.sets.insert(name.into(), filter_set);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterSet> {
        self.sets.get(name)
    }
}

/// Flatten a filter set into the lookup expressions it accepts.
///
/// Related entries recurse into their target set; each expression they
/// produce is prefixed with the chain of related field names joined by
/// `__`. Expressions are deduplicated in encounter order. An entry
/// whose field name is already on the current traversal path is
/// skipped, which terminates self-referential declarations and longer
/// reference cycles alike.
#[must_use]
pub fn lookup_expressions(filter_set: &FilterSet, registry: &FilterRegistry) -> Vec<String> {
    let mut expressions = Vec::new();
    let mut path = Vec::new();
    collect_expressions(filter_set, registry, &mut path, &mut expressions);
    expressions
}

fn collect_expressions(
    filter_set: &FilterSet,
    registry: &FilterRegistry,
    path: &mut Vec<String>,
    expressions: &mut Vec<String>,
) {
    for (name, filter) in filter_set.entries() {
        if path.iter().any(|visited| visited == name) {
            continue;
        }
        match filter {
            Filter::Related { filter_set: target } => match registry.get(target) {
                Some(target_set) => {
                    path.push(name.to_string());
                    collect_expressions(target_set, registry, path, expressions);
                    path.pop();
                }
                None => {
                    warn!(
                        field = name,
                        filter_set = %target,
                        "Related filter names an unregistered filter set"
                    );
                }
            },
            Filter::Scalar => {
                let expression = if path.is_empty() {
                    name.to_string()
                } else {
                    format!("{}__{}", path.join("__"), name)
                };
                if !expressions.contains(&expression) {
                    expressions.push(expression);
                }
            }
        }
    }
}
