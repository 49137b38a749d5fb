pub mod handlers;
pub mod routes;
pub mod validation;

pub use routes::create_http_routes;
