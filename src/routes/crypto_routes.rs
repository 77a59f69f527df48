use axum::{Router, routing::get};
use crate::{AppState, controllers::crypto_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/api/crypto", get(crypto_controller::get_crypto))
}
