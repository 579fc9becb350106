use serde::Serialize;
use serde_json::{json, Value};

use crate::{config::PagesConfig, groups::GroupMembership};

pub const LIST_TEMPLATE: &str = "generic/generic_list.html";
pub const INDEX_TEMPLATE: &str = "generic/generic_index.html";
pub const DETAIL_TEMPLATE: &str = "generic/generic_detail.html";

/// Declarative configuration shared by the generic pages.
///
/// # Example
/// ```rust,ignore
/// let page = ListPage::new(
///     PageConfig::new(&app.config.pages)
///         .title("Projects")
///         .sub_title("my cool projects")
///         .table("table/table_projects.htm")
///         .modals("project_modals.htm"),
/// );
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub base_template: String,
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub table: Option<String>,
    pub modals: Option<String>,
}

impl PageConfig {
    #[must_use]
    pub fn new(pages: &PagesConfig) -> Self {
        Self {
            base_template: pages.base_template.clone(),
            title: None,
            sub_title: None,
            table: None,
            modals: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn sub_title(mut self, sub_title: impl Into<String>) -> Self {
        self.sub_title = Some(sub_title.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn modals(mut self, modals: impl Into<String>) -> Self {
        self.modals = Some(modals.into());
        self
    }
}

/// Static descriptor for an optional form block (create or filter).
/// The rendered form value itself is per-request and passed at context
/// time.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub action_url: String,
    pub title: String,
    pub modal_name: String,
    pub link_title: String,
}

fn form_block(descriptor: &FormDescriptor, action: &str, form: Value) -> Value {
    json!({
        "form": form,
        "action": action,
        "action_url": descriptor.action_url,
        "title": descriptor.title,
        "modal_name": descriptor.modal_name,
        "link_title": descriptor.link_title,
    })
}

/// An unset subtitle can be supplied per request through the
/// `page_description` query parameter.
fn page_description(query_params: &[(String, String)]) -> Option<String> {
    query_params
        .iter()
        .find(|(key, _)| key == "page_description")
        .map(|(_, value)| value.clone())
}

fn list_context<Q: Serialize>(
    config: &PageConfig,
    queryset: &Q,
    query_params: &[(String, String)],
) -> Value {
    let sub_title = config
        .sub_title
        .clone()
        .or_else(|| page_description(query_params));
    json!({
        "base_template": config.base_template,
        "queryset": queryset,
        "title": config.title,
        "sub_title": sub_title,
        "table": config.table,
        "modals": config.modals,
    })
}

/// List page: a queryset rendered through a table partial.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub config: PageConfig,
}

impl ListPage {
    #[must_use]
    pub const fn new(config: PageConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn context<Q: Serialize>(&self, queryset: &Q, query_params: &[(String, String)]) -> Value {
        list_context(&self.config, queryset, query_params)
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        LIST_TEMPLATE
    }
}

/// List page with an optional create-form block.
#[derive(Debug, Clone)]
pub struct CreateListPage {
    pub config: PageConfig,
    pub create_form: Option<FormDescriptor>,
}

impl CreateListPage {
    #[must_use]
    pub const fn new(config: PageConfig, create_form: Option<FormDescriptor>) -> Self {
        Self {
            config,
            create_form,
        }
    }

    #[must_use]
    pub fn context<Q: Serialize>(
        &self,
        queryset: &Q,
        query_params: &[(String, String)],
        form: Value,
    ) -> Value {
        let mut context = list_context(&self.config, queryset, query_params);
        if let Some(descriptor) = &self.create_form {
            context["create_form"] = form_block(descriptor, "Add", form);
        }
        context
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        LIST_TEMPLATE
    }
}

/// List page with an optional filter-form block.
#[derive(Debug, Clone)]
pub struct FilterListPage {
    pub config: PageConfig,
    pub filter_form: Option<FormDescriptor>,
}

impl FilterListPage {
    #[must_use]
    pub const fn new(config: PageConfig, filter_form: Option<FormDescriptor>) -> Self {
        Self {
            config,
            filter_form,
        }
    }

    #[must_use]
    pub fn context<Q: Serialize>(
        &self,
        queryset: &Q,
        query_params: &[(String, String)],
        form: Value,
    ) -> Value {
        let mut context = list_context(&self.config, queryset, query_params);
        if let Some(descriptor) = &self.filter_form {
            context["filter_form"] = form_block(descriptor, "Filter", form);
        }
        context
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        LIST_TEMPLATE
    }
}

/// List page with both optional form blocks.
#[derive(Debug, Clone)]
pub struct CreateFilterListPage {
    pub config: PageConfig,
    pub create_form: Option<FormDescriptor>,
    pub filter_form: Option<FormDescriptor>,
}

impl CreateFilterListPage {
    #[must_use]
    pub const fn new(
        config: PageConfig,
        create_form: Option<FormDescriptor>,
        filter_form: Option<FormDescriptor>,
    ) -> Self {
        Self {
            config,
            create_form,
            filter_form,
        }
    }

    #[must_use]
    pub fn context<Q: Serialize>(
        &self,
        queryset: &Q,
        query_params: &[(String, String)],
        create_form: Value,
        filter_form: Value,
    ) -> Value {
        let mut context = list_context(&self.config, queryset, query_params);
        if let Some(descriptor) = &self.create_form {
            context["create_form"] = form_block(descriptor, "Add", create_form);
        }
        if let Some(descriptor) = &self.filter_form {
            context["filter_form"] = form_block(descriptor, "Filter", filter_form);
        }
        context
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        LIST_TEMPLATE
    }
}

/// One itemized link on an index page.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub title: String,
    pub link: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl Card {
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            icon: None,
            description: None,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Cards visible only to members of one group.
#[derive(Debug, Clone, Serialize)]
pub struct ProtectedCards {
    pub group: String,
    pub cards: Vec<Card>,
}

/// Index page: itemized link cards, optionally with a protected subset.
///
/// The protected cards land in the context only when the requesting
/// membership contains the named group; the membership semantics are
/// [`GroupMembership`]'s, not re-implemented here.
#[derive(Debug, Clone)]
pub struct IndexPage {
    pub config: PageConfig,
    pub cards: Vec<Card>,
    pub protected: Option<ProtectedCards>,
}

impl IndexPage {
    #[must_use]
    pub const fn new(config: PageConfig, cards: Vec<Card>) -> Self {
        Self {
            config,
            cards,
            protected: None,
        }
    }

    #[must_use]
    pub fn with_protected(mut self, group: impl Into<String>, cards: Vec<Card>) -> Self {
        self.protected = Some(ProtectedCards {
            group: group.into(),
            cards,
        });
        self
    }

    #[must_use]
    pub fn context(&self, membership: &GroupMembership) -> Value {
        let mut context = json!({
            "base_template": self.config.base_template,
            "title": self.config.title,
            "sub_title": self.config.sub_title,
            "cards": self.cards,
        });
        if let Some(protected) = &self.protected {
            if membership.contains(&protected.group) {
                context["protected_group"] = json!(protected.group);
                context["protected_cards"] = json!(protected.cards);
            }
        }
        context
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        INDEX_TEMPLATE
    }
}

/// Detail page for a single model instance; no queryset, no filtering.
#[derive(Debug, Clone)]
pub struct SingletonPage {
    pub config: PageConfig,
}

impl SingletonPage {
    #[must_use]
    pub const fn new(config: PageConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn context<M: Serialize>(&self, object: &M) -> Value {
        json!({
            "base_template": self.config.base_template,
            "object": object,
            "title": self.config.title,
            "sub_title": self.config.sub_title,
            "modals": self.config.modals,
        })
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        DETAIL_TEMPLATE
    }
}
