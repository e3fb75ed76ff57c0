//! User payloads.
//!
//! ```text
//! POST /api/v1/users {"name":"Ada Lovelace","address":"12 St James's Square"}
//! PUT  /api/v1/users/{id} {"name":"Ada King","address":null}
//! ```

use serde::Deserialize;

use crate::domain::Users;
use crate::inbound::http::resources::HttpResource;
use crate::inbound::http::validation::RecordInput;

/// Body of `POST /api/v1/users`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Body of `PUT /api/v1/users/{id}`. `isArchived` is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_archived: Option<bool>,
}

impl From<CreateUserBody> for RecordInput {
    fn from(body: CreateUserBody) -> Self {
        Self {
            name: body.name,
            detail: body.address,
        }
    }
}

impl From<UpdateUserBody> for RecordInput {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            name: body.name,
            detail: body.address,
        }
    }
}

impl HttpResource for Users {
    type CreateBody = CreateUserBody;
    type UpdateBody = UpdateUserBody;
}
