use actix_web::web;

pub mod health;
pub mod realtime;

/// Every route the server answers. `main.rs` and the integration tests
/// both mount this, wrapped in the same middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game rooms: /ws/{room_id}
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
