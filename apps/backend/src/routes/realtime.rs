use actix_web::web;

use crate::ws::session;

/// Mounted at `/ws`. The tail is matched greedily so a nested or empty
/// room path still reaches the handler and gets a problem response.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room_id:.*}", web::get().to(session::upgrade));
}
