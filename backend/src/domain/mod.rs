//! Domain primitives, ports, and services.
//!
//! Purpose: define the record entity shared by products and users, the
//! transport-agnostic error taxonomy, and the generic service implementing the
//! create / read / update / soft-delete use cases. Nothing here knows about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and stable category.
//! - Record, RecordId, RecordName: the stored entity and its parts.
//! - Resource, Products, Users: markers selecting a resource.
//! - ResourceService: implementation of the driving ports in [`ports`].

pub mod error;
pub mod ports;
pub mod record;
pub mod resource;
mod resource_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::record::{
    ArchiveFilter, MAX_DETAIL_LENGTH, MAX_NAME_LENGTH, NewRecord, Record, RecordChanges,
    RecordDraft, RecordId, RecordName, RecordValidationError, normalise_detail,
};
pub use self::resource::{Products, Resource, Users};
pub use self::resource_service::ResourceService;
pub use self::trace_id::TraceId;
