//! Generic page-view builders.
//!
//! A page view is declarative configuration plus a `context` method
//! that assembles the template-context document for a request; actual
//! rendering goes through the host-supplied [`TemplateRenderer`].

pub mod renderer;
pub mod views;

pub use renderer::{respond, RenderError, TemplateRenderer};
pub use views::{
    Card, CreateFilterListPage, CreateListPage, FilterListPage, FormDescriptor, IndexPage,
    ListPage, PageConfig, ProtectedCards, SingletonPage,
};
