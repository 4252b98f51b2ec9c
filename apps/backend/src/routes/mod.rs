use actix_web::web;

pub mod admin_pods;
pub mod admin_roles;
pub mod health;
pub mod pods;
pub mod win_conditions;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires these under scopes with additional
/// middleware (JWT extraction, CORS, request tracing). For tests we
/// register the same paths without those wrappers so that endpoint
/// behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Pod routes: /api/pods/**
    cfg.service(web::scope("/api/pods").configure(pods::configure_routes));

    // Win condition catalogue: /api/win-conditions
    cfg.service(web::scope("/api/win-conditions").configure(win_conditions::configure_routes));

    // Admin routes: /api/admin/**
    cfg.service(web::scope("/api/admin/pods").configure(admin_pods::configure_routes));
    cfg.service(web::scope("/api/admin/roles").configure(admin_roles::configure_routes));
}
