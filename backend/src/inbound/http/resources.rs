//! Generic record handlers shared by every resource.
//!
//! ```text
//! POST   /api/v1/{resource}       {"name":"Widget","description":"Blue"}
//! GET    /api/v1/{resource}?limit=10&page=1&isArchived=false
//! GET    /api/v1/{resource}/{id}
//! PUT    /api/v1/{resource}/{id}  {"name":"Widget","description":null}
//! DELETE /api/v1/{resource}/{id}
//! ```
//!
//! Each handler is instantiated per resource through [`HttpResource`], which
//! names the request bodies. Responses are wrapped in `{"data": ...}`.

use std::marker::PhantomData;

use actix_web::{HttpResponse, Scope, web};
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::ports::{CreateRecordRequest, ListRecordsRequest, UpdateRecordRequest};
use crate::domain::{Record, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    RecordInput, parse_archive_filter, parse_page_request, parse_record_id, validate_input,
};

/// A resource exposed over HTTP.
pub trait HttpResource: Resource {
    /// JSON body accepted by `POST`.
    type CreateBody: DeserializeOwned + Into<RecordInput> + 'static;
    /// JSON body accepted by `PUT`.
    type UpdateBody: DeserializeOwned + Into<RecordInput> + 'static;
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// JSON view of a record. The detail key is the resource's detail field.
#[derive(Debug, Clone)]
pub struct RecordBody<R: Resource>(Record<R>);

impl<R: Resource> From<Record<R>> for RecordBody<R> {
    fn from(record: Record<R>) -> Self {
        Self(record)
    }
}

impl<R: Resource> Serialize for RecordBody<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = &self.0;
        let mut state = serializer.serialize_struct("Record", 6)?;
        state.serialize_field("id", record.id().as_uuid())?;
        state.serialize_field("name", record.name())?;
        state.serialize_field(R::DETAIL_FIELD, &record.detail())?;
        state.serialize_field("isArchived", &record.is_archived())?;
        state.serialize_field("createdAt", &record.created_at())?;
        state.serialize_field("updatedAt", &record.updated_at())?;
        state.end()
    }
}

/// Raw list query. Values stay strings so failures can name the parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "isArchived")]
    pub is_archived: Option<String>,
}

fn ok_record<R: Resource>(record: Record<R>) -> HttpResponse {
    HttpResponse::Ok().json(DataEnvelope::new(RecordBody::from(record)))
}

async fn create_record<R: HttpResource>(
    state: web::Data<HttpState<R>>,
    payload: web::Json<R::CreateBody>,
) -> ApiResult<HttpResponse> {
    let input = validate_input::<R>(payload.into_inner().into())?;
    let record = state
        .command
        .create(CreateRecordRequest {
            name: input.name,
            detail: input.detail,
        })
        .await?;
    Ok(HttpResponse::Created().json(DataEnvelope::new(RecordBody::from(record))))
}

async fn list_records<R: HttpResource>(
    state: web::Data<HttpState<R>>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let page = parse_page_request(query.limit.as_deref(), query.page.as_deref())?;
    let filter = parse_archive_filter(query.is_archived.as_deref())?;
    let records = state
        .query
        .read_many(ListRecordsRequest { page, filter })
        .await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new(records.map(RecordBody::from))))
}

async fn get_record<R: HttpResource>(
    state: web::Data<HttpState<R>>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let record = state.query.read_one(id).await?;
    Ok(ok_record(record))
}

async fn update_record<R: HttpResource>(
    state: web::Data<HttpState<R>>,
    path: web::Path<String>,
    payload: web::Json<R::UpdateBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let input = validate_input::<R>(payload.into_inner().into())?;
    let record = state
        .command
        .update(
            id,
            UpdateRecordRequest {
                name: input.name,
                detail: input.detail,
            },
        )
        .await?;
    Ok(ok_record(record))
}

async fn delete_record<R: HttpResource>(
    state: web::Data<HttpState<R>>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let record = state.command.delete(id).await?;
    Ok(ok_record(record))
}

/// Route table for one resource, mounted at `/{plural}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use storefront::domain::Products;
/// use storefront::inbound::http::resources::ResourceRoutes;
///
/// let app = App::new().service(web::scope("/api/v1").service(ResourceRoutes::<Products>::scope()));
/// ```
pub struct ResourceRoutes<R>(PhantomData<R>);

impl<R: HttpResource> ResourceRoutes<R> {
    /// Build the scope serving the five record endpoints.
    pub fn scope() -> Scope {
        web::scope(&format!("/{}", R::PLURAL))
            .route("", web::post().to(create_record::<R>))
            .route("", web::get().to(list_records::<R>))
            .route("/{id}", web::get().to(get_record::<R>))
            .route("/{id}", web::put().to(update_record::<R>))
            .route("/{id}", web::delete().to(delete_record::<R>))
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
