//! CORS configuration.

use actix_cors::Cors;

/// CORS middleware: restricted to `CORS_ALLOWED_ORIGIN` when set, permissive
/// otherwise (local development).
pub fn cors_middleware() -> Cors {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(origin) => Cors::default()
            .allowed_origin(&origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600),
        Err(_) => Cors::permissive(),
    }
}
