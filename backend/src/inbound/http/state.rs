//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O. One
//! state value exists per resource; `web::Data` keys on the full type, so
//! `HttpState<Products>` and `HttpState<Users>` never collide.

use std::sync::Arc;

use crate::domain::Resource;
use crate::domain::ports::{ResourceCommand, ResourceQuery};

/// Dependency bundle for one resource's handlers.
pub struct HttpState<R: Resource> {
    pub command: Arc<dyn ResourceCommand<R>>,
    pub query: Arc<dyn ResourceQuery<R>>,
}

impl<R: Resource> Clone for HttpState<R> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            query: Arc::clone(&self.query),
        }
    }
}

impl<R: Resource> HttpState<R> {
    /// Construct state from explicit command and query ports.
    pub fn new(command: Arc<dyn ResourceCommand<R>>, query: Arc<dyn ResourceQuery<R>>) -> Self {
        Self { command, query }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use storefront::domain::{Products, ResourceService};
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::persistence::InMemoryResourceRepository;
    ///
    /// let service = ResourceService::new(
    ///     Arc::new(InMemoryResourceRepository::<Products>::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _query = state.query.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ResourceCommand<R> + ResourceQuery<R> + 'static,
    {
        let command: Arc<dyn ResourceCommand<R>> = service.clone();
        let query: Arc<dyn ResourceQuery<R>> = service;
        Self { command, query }
    }
}
