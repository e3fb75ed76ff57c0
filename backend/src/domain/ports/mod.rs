//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod resource_command;
mod resource_query;
mod resource_repository;

#[cfg(test)]
pub use resource_command::MockResourceCommand;
pub use resource_command::{CreateRecordRequest, ResourceCommand, UpdateRecordRequest};
#[cfg(test)]
pub use resource_query::MockResourceQuery;
pub use resource_query::{ListRecordsRequest, RecordPage, ResourceQuery};
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::{RepositoryError, ResourceRepository};
