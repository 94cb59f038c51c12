//! HTTP surface for the USSD gateway callback.

mod dto;
mod handlers;
mod routes;

pub use dto::{ReplyEncoding, UssdCallback, UssdResponse};
pub use handlers::UssdAppState;
pub use routes::ussd_routes;
