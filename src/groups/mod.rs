//! Group-based request gates.
//!
//! A gate makes a single admit/deny decision for a request from the
//! HTTP method and the requesting identity's group memberships. Gates
//! are immutable per-route configuration, applied through
//! [`middleware::group_gate_middleware`]; they never consult anything
//! beyond what the host's auth layer put on the request.

pub mod middleware;

pub use middleware::{group_gate_middleware, GateState};

use std::collections::{BTreeSet, HashMap};

use axum::http::Method;

/// Read-only snapshot of the requesting identity's group names.
///
/// The host's authentication layer builds one per request and inserts
/// it into request extensions. A request with no snapshot is treated as
/// belonging to no groups.
///
/// # Example
/// ```rust,ignore
/// let membership = GroupMembership::new(["site_operators", "site_admins"]);
/// router.layer(Extension(membership));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembership {
    groups: BTreeSet<String>,
}

impl GroupMembership {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }
}

/// Per-route mapping from HTTP method to the group names required for
/// that method.
///
/// # Example
/// ```rust,ignore
/// let permissions = PermissionDict::new()
///     .require(Method::POST, ["site_operators", "site_admins"])
///     .require(Method::GET, ["site_operators"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionDict {
    methods: HashMap<Method, Vec<String>>,
}

impl PermissionDict {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the groups required for a method. An empty list is a
    /// valid declaration and is distinct from not declaring the method
    /// at all; see the gate types for how each treats it.
    #[must_use]
    pub fn require<I, S>(mut self, method: Method, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods
            .insert(method, groups.into_iter().map(Into::into).collect());
        self
    }

    /// Required groups for a method, or `None` if the method was never
    /// declared.
    #[must_use]
    pub fn required_for(&self, method: &Method) -> Option<&[String]> {
        self.methods.get(method).map(Vec::as_slice)
    }
}

/// A request gate: one admit/deny decision per request.
///
/// Implementations carry their own configuration and must not hold
/// mutable state; the same gate instance is consulted concurrently for
/// every request on its route.
pub trait GroupGate: Send + Sync {
    fn admits(&self, method: &Method, membership: &GroupMembership) -> bool;
}

/// Admits when the requester is in every group required for the method.
///
/// An undeclared method is denied, so an empty [`PermissionDict`] fails
/// closed. A method declared with an empty group list admits anyone:
/// the empty set is a subset of any membership. That asymmetry with
/// [`AnyGroupForMethod`] is deliberate and pinned by tests.
#[derive(Debug, Clone)]
pub struct AllGroupsForMethod {
    permissions: PermissionDict,
}

impl AllGroupsForMethod {
    #[must_use]
    pub const fn new(permissions: PermissionDict) -> Self {
        Self { permissions }
    }
}

impl GroupGate for AllGroupsForMethod {
    fn admits(&self, method: &Method, membership: &GroupMembership) -> bool {
        match self.permissions.required_for(method) {
            Some(required) => required.iter().all(|group| membership.contains(group)),
            None => false,
        }
    }
}

/// Admits when the requester is in at least one group required for the
/// method.
///
/// An undeclared method is denied, and so is a method declared with an
/// empty group list: no group matches trivially.
#[derive(Debug, Clone)]
pub struct AnyGroupForMethod {
    permissions: PermissionDict,
}

impl AnyGroupForMethod {
    #[must_use]
    pub const fn new(permissions: PermissionDict) -> Self {
        Self { permissions }
    }
}

impl GroupGate for AnyGroupForMethod {
    fn admits(&self, method: &Method, membership: &GroupMembership) -> bool {
        match self.permissions.required_for(method) {
            Some(required) => required.iter().any(|group| membership.contains(group)),
            None => false,
        }
    }
}

/// Admits members of every listed group, irrespective of method.
#[derive(Debug, Clone)]
pub struct MemberOfAllGroups {
    groups: Vec<String>,
}

impl MemberOfAllGroups {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }
}

impl GroupGate for MemberOfAllGroups {
    fn admits(&self, _method: &Method, membership: &GroupMembership) -> bool {
        self.groups.iter().all(|group| membership.contains(group))
    }
}

/// Admits members of any listed group, irrespective of method.
#[derive(Debug, Clone)]
pub struct MemberOfAnyGroup {
    groups: Vec<String>,
}

impl MemberOfAnyGroup {
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }
}

impl GroupGate for MemberOfAnyGroup {
    fn admits(&self, _method: &Method, membership: &GroupMembership) -> bool {
        self.groups.iter().any(|group| membership.contains(group))
    }
}

/// Kept for backward compatibility with earlier releases.
#[deprecated(note = "renamed to `AllGroupsForMethod`")]
pub type InAllGroups = AllGroupsForMethod;

/// Kept for backward compatibility with earlier releases.
#[deprecated(note = "renamed to `AnyGroupForMethod`")]
pub type InAnyGroup = AnyGroupForMethod;
