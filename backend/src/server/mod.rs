//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub use state_builders::{build_backend, prepare_state};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use pet_registry::Trace;
#[cfg(debug_assertions)]
use pet_registry::doc::ApiDoc;
use pet_registry::inbound::http::breeds::list_breeds;
use pet_registry::inbound::http::health::{HealthState, live, ready};
use pet_registry::inbound::http::json_config;
use pet_registry::inbound::http::pets::{create_pet, delete_pet, get_pet, list_pets, update_pet};
use pet_registry::inbound::http::profile::{delete_profile, get_profile, update_profile};
use pet_registry::inbound::http::state::HttpState;
use pet_registry::inbound::http::users::{login, logout, register};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(get_profile)
        .service(update_profile)
        .service(delete_profile)
        .service(list_pets)
        .service(create_pet)
        .service(get_pet)
        .service(update_pet)
        .service(delete_pet)
        .service(list_breeds);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over prepared handler state.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `http_state`: domain services wired over the selected record store.
/// - `config`: session and binding settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
