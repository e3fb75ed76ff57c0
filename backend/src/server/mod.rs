//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::Settings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::warn;

use storefront::domain::{Products, Resource, ResourceService, Users};
use storefront::domain::ports::ResourceRepository;
use storefront::inbound::http::api_scope;
use storefront::inbound::http::health::{HealthState, live, ready};
use storefront::inbound::http::state::HttpState;
use storefront::outbound::persistence::{
    DieselProductRepository, DieselUserRepository, InMemoryResourceRepository,
};
use storefront::{Timeout, Trace};

fn http_state<R, Repo>(repository: Repo) -> web::Data<HttpState<R>>
where
    R: Resource,
    Repo: ResourceRepository<R> + 'static,
{
    let service = ResourceService::new(Arc::new(repository), Arc::new(DefaultClock));
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    products: web::Data<HttpState<Products>>,
    users: web::Data<HttpState<Users>>,
    timeout: Timeout,
}

fn build_dependencies(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> AppDependencies {
    let (products, users) = match &config.db_pool {
        Some(pool) => (
            http_state(DieselProductRepository::new(pool.clone())),
            http_state(DieselUserRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; records are kept in memory");
            (
                http_state(InMemoryResourceRepository::<Products>::new()),
                http_state(InMemoryResourceRepository::<Users>::new()),
            )
        }
    };
    AppDependencies {
        health_state,
        products,
        users,
        timeout: Timeout::new(config.request_timeout),
    }
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        products,
        users,
        timeout,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(products)
        .app_data(users)
        .wrap(timeout)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deps = build_dependencies(health_state.clone(), &config);
    let shutdown_secs = config.shutdown_timeout.as_secs();

    let server = HttpServer::new(move || build_app(deps.clone()))
        .shutdown_timeout(shutdown_secs)
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
