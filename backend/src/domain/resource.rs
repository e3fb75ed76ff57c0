//! Resource markers selecting which table and vocabulary a record belongs to.
//!
//! Products and users share one shape. The marker types carry the only
//! differences: the singular name used in messages, the plural path segment,
//! and the name of the nullable detail field.

use std::fmt::Debug;
use std::hash::Hash;

/// Compile-time description of a stored resource.
pub trait Resource: Debug + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static {
    /// Singular name, used in log fields and messages (`product`).
    const NAME: &'static str;
    /// Plural name, used as the HTTP path segment (`products`).
    const PLURAL: &'static str;
    /// Wire name of the nullable detail field (`description`).
    const DETAIL_FIELD: &'static str;
}

/// Catalogue products; the detail field is `description`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Products;

impl Resource for Products {
    const NAME: &'static str = "product";
    const PLURAL: &'static str = "products";
    const DETAIL_FIELD: &'static str = "description";
}

/// Registered users; the detail field is `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Users;

impl Resource for Users {
    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";
    const DETAIL_FIELD: &'static str = "address";
}
