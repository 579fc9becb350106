use std::str::FromStr as _;

use sea_orm::{ColumnTrait, EntityName, EntityTrait, IdenStatic, Iterable, QueryFilter, Select};

/// Model metadata consulted when a view declares no filters of its own:
/// the model's name (for error messages) and the names it can be
/// filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    name: String,
    field_names: Vec<String>,
}

impl ModelInfo {
    /// Build from a sea-orm entity: the table name plus every column
    /// name. Traversable relation names are appended separately with
    /// [`with_relations`](Self::with_relations), since sea-orm relation
    /// definitions carry no stable public name.
    #[must_use]
    pub fn of<E: EntityTrait>() -> Self {
        Self {
            name: E::default().table_name().to_string(),
            field_names: E::Column::iter().map(|c| c.as_str().to_string()).collect(),
        }
    }

    pub fn new<I, S>(name: impl Into<String>, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            field_names: field_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Append relation names that may appear as the base of a traversal
    /// lookup (e.g. many-to-many relations).
    #[must_use]
    pub fn with_relations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.field_names.iter().any(|name| name == field)
    }

    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }
}

/// Narrow a select by the query-string pairs that name real columns.
///
/// Keys that are not columns of `E` are ignored, never an error;
/// rejecting unknown parameters is the lookup guard's job. The literal
/// value `"None"` filters for NULL. Keys carrying a `__` traversal
/// suffix are left to the host's own filter layer, which knows the
/// relations.
pub fn filter_by_query_params<E: EntityTrait>(
    mut select: Select<E>,
    params: &[(String, String)],
) -> Select<E> {
    for (key, value) in params {
        if key.contains("__") {
            continue;
        }
        let Ok(column) = E::Column::from_str(key) else {
            continue;
        };
        select = if value == "None" {
            select.filter(column.is_null())
        } else {
            select.filter(column.eq(value.clone()))
        };
    }
    select
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    mod project {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "project")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub name: String,
            pub owner: String,
            pub status: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    #[test]
    fn test_model_info_lists_entity_columns() {
        let info = ModelInfo::of::<project::Entity>();
        assert_eq!(info.name(), "project");
        for field in ["id", "name", "owner", "status"] {
            assert!(info.contains(field), "missing column {field}");
        }
        assert!(!info.contains("bogus"));
    }

    #[test]
    fn test_with_relations_extends_the_catalog() {
        let info = ModelInfo::of::<project::Entity>().with_relations(["tags"]);
        assert!(info.contains("tags"));
    }

    #[test]
    fn test_filter_by_query_params_applies_known_columns() {
        let params = vec![
            ("status".to_string(), "active".to_string()),
            ("bogus".to_string(), "x".to_string()),
        ];
        let sql = filter_by_query_params(project::Entity::find(), &params)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""status" = 'active'"#), "unexpected SQL: {sql}");
        assert!(!sql.contains("bogus"), "unexpected SQL: {sql}");
    }

    #[test]
    fn test_filter_by_query_params_maps_none_to_null() {
        let params = vec![("owner".to_string(), "None".to_string())];
        let sql = filter_by_query_params(project::Entity::find(), &params)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""owner" IS NULL"#), "unexpected SQL: {sql}");
    }

    #[test]
    fn test_filter_by_query_params_skips_traversal_lookups() {
        let params = vec![("owner__name".to_string(), "alice".to_string())];
        let sql = filter_by_query_params(project::Entity::find(), &params)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "unexpected SQL: {sql}");
    }
}
