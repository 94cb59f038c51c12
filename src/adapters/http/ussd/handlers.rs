//! HTTP handler for the USSD gateway callback.
//!
//! Gateways treat any non-200 answer as a dead service and show the caller
//! a network error, so this endpoint always replies 200; faults surface as
//! terminal menu replies instead of status codes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::application::handlers::ussd::{HandleUssdTurn, UssdTurn};
use crate::domain::foundation::{Msisdn, SessionId};
use crate::domain::menu::{texts, MenuReply};

use super::dto::{ReplyEncoding, UssdCallback, UssdResponse};

/// Shared state for the USSD endpoint.
#[derive(Clone)]
pub struct UssdAppState {
    handler: Arc<HandleUssdTurn>,
    encoding: ReplyEncoding,
}

impl UssdAppState {
    pub fn new(handler: Arc<HandleUssdTurn>, encoding: ReplyEncoding) -> Self {
        Self { handler, encoding }
    }
}

/// POST /ussd - answer one gateway callback.
pub async fn answer_callback(
    State(state): State<UssdAppState>,
    Form(callback): Form<UssdCallback>,
) -> Response {
    let session_raw = callback.session_id.unwrap_or_default();

    let session_id = match SessionId::new(session_raw.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("callback without a session id");
            return render(
                state.encoding,
                session_raw,
                &MenuReply::terminal(texts::service_unavailable()),
            );
        }
    };

    let msisdn = match Msisdn::new(callback.msisdn.unwrap_or_default()) {
        Ok(msisdn) => msisdn,
        Err(_) => {
            tracing::warn!(session_id = %session_id, "callback without a usable phone number");
            return render(
                state.encoding,
                session_raw,
                &MenuReply::terminal(texts::service_unavailable()),
            );
        }
    };

    let turn = UssdTurn {
        session_id,
        msisdn,
        text: callback.user_input.unwrap_or_default(),
    };

    let reply = state.handler.handle(turn).await;
    render(state.encoding, session_raw, &reply)
}

fn render(encoding: ReplyEncoding, session_id: String, reply: &MenuReply) -> Response {
    match encoding {
        ReplyEncoding::Json => (
            StatusCode::OK,
            Json(UssdResponse::from_reply(session_id, reply)),
        )
            .into_response(),
        ReplyEncoding::Text => (StatusCode::OK, ReplyEncoding::text_body(reply)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_always_answers_200() {
        let reply = MenuReply::terminal("Bye");
        for encoding in [ReplyEncoding::Json, ReplyEncoding::Text] {
            let response = render(encoding, "s1".to_string(), &reply);
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
