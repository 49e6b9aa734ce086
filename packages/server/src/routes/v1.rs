use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/hackathons", hackathon_routes())
        .nest("/host-requests", host_request_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn hackathon_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::hackathon::list_hackathons,
            handlers::hackathon::create_hackathon
        ))
        .routes(routes!(handlers::hackathon::confirm_creation))
        .routes(routes!(
            handlers::hackathon::get_hackathon,
            handlers::hackathon::update_hackathon
        ))
        .routes(routes!(handlers::hackathon::transition_hackathon))
        .routes(routes!(handlers::hackathon::get_eligibility))
        .routes(routes!(handlers::registration::register_for_hackathon))
        .routes(routes!(handlers::registration::get_my_registration))
        .routes(routes!(
            handlers::submission::get_submission,
            handlers::submission::create_submission,
            handlers::submission::update_submission
        ))
        .routes(routes!(handlers::submission::finalize_submission))
}

fn host_request_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::host::list_host_requests,
            handlers::host::request_host
        ))
        .routes(routes!(handlers::host::get_my_host_request))
        .routes(routes!(handlers::host::decide_host_request))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::list_config))
        .routes(routes!(
            handlers::admin::get_config,
            handlers::admin::upsert_config
        ))
}
