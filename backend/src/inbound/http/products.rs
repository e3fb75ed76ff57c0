//! Product payloads.
//!
//! ```text
//! POST /api/v1/products {"name":"Widget","description":"Blue widget"}
//! PUT  /api/v1/products/{id} {"name":"Widget","description":null,"isArchived":false}
//! ```

use serde::Deserialize;

use crate::domain::Products;
use crate::inbound::http::resources::HttpResource;
use crate::inbound::http::validation::RecordInput;

/// Body of `POST /api/v1/products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /api/v1/products/{id}`.
///
/// `isArchived` is accepted but ignored; products are archived only through
/// `DELETE`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_archived: Option<bool>,
}

impl From<CreateProductBody> for RecordInput {
    fn from(body: CreateProductBody) -> Self {
        Self {
            name: body.name,
            detail: body.description,
        }
    }
}

impl From<UpdateProductBody> for RecordInput {
    fn from(body: UpdateProductBody) -> Self {
        Self {
            name: body.name,
            detail: body.description,
        }
    }
}

impl HttpResource for Products {
    type CreateBody = CreateProductBody;
    type UpdateBody = UpdateProductBody;
}
