//! HTTP DTOs for the USSD gateway callback.
//!
//! The field names mirror what gateways actually send; aliases cover the
//! common variants so one endpoint serves either convention.

use serde::{Deserialize, Serialize};

use crate::domain::menu::MenuReply;

/// One gateway callback, form- or JSON-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct UssdCallback {
    /// Gateway-assigned session identifier.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,

    /// Caller's phone number.
    #[serde(rename = "msisdn", alias = "phoneNumber", default)]
    pub msisdn: Option<String>,

    /// Accumulated `*`-delimited input; absent on the first dial.
    #[serde(rename = "UserInput", alias = "text", default)]
    pub user_input: Option<String>,

    /// Dialed service code, informational only.
    #[serde(rename = "serviceCode", default)]
    pub service_code: Option<String>,

    /// Carrier network identifier, informational only.
    #[serde(rename = "networkCode", default)]
    pub network_code: Option<String>,
}

/// JSON reply body.
#[derive(Debug, Clone, Serialize)]
pub struct UssdResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub message: String,
    /// 1 keeps the session open, 0 closes it.
    #[serde(rename = "ContinueSession")]
    pub continue_session: u8,
}

impl UssdResponse {
    pub fn from_reply(session_id: String, reply: &MenuReply) -> Self {
        Self {
            session_id,
            message: reply.text().to_string(),
            continue_session: if reply.continues() { 1 } else { 0 },
        }
    }
}

/// How replies are rendered on the wire.
///
/// JSON matches gateways that post to an application endpoint; text is the
/// `CON `/`END ` convention used by aggregators that expect a plain body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyEncoding {
    Json,
    Text,
}

impl ReplyEncoding {
    /// Renders a reply as a plain text body.
    pub fn text_body(reply: &MenuReply) -> String {
        if reply.continues() {
            format!("CON {}", reply.text())
        } else {
            format!("END {}", reply.text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_accepts_gateway_field_names() {
        let json = r#"{"sessionId": "s1", "msisdn": "+250781234567", "UserInput": "1*2"}"#;
        let cb: UssdCallback = serde_json::from_str(json).unwrap();
        assert_eq!(cb.session_id.as_deref(), Some("s1"));
        assert_eq!(cb.msisdn.as_deref(), Some("+250781234567"));
        assert_eq!(cb.user_input.as_deref(), Some("1*2"));
    }

    #[test]
    fn callback_accepts_aliased_field_names() {
        let json = r#"{"sessionId": "s1", "phoneNumber": "0781234567", "text": "1"}"#;
        let cb: UssdCallback = serde_json::from_str(json).unwrap();
        assert_eq!(cb.msisdn.as_deref(), Some("0781234567"));
        assert_eq!(cb.user_input.as_deref(), Some("1"));
    }

    #[test]
    fn callback_tolerates_missing_input_on_first_dial() {
        let json = r#"{"sessionId": "s1", "msisdn": "0781234567"}"#;
        let cb: UssdCallback = serde_json::from_str(json).unwrap();
        assert!(cb.user_input.is_none());
    }

    #[test]
    fn response_carries_numeric_continue_flag() {
        let open = UssdResponse::from_reply("s1".into(), &MenuReply::prompt("Choose:"));
        assert_eq!(open.continue_session, 1);

        let closed = UssdResponse::from_reply("s1".into(), &MenuReply::terminal("Bye"));
        assert_eq!(closed.continue_session, 0);

        let json = serde_json::to_string(&closed).unwrap();
        assert!(json.contains("\"ContinueSession\":0"));
        assert!(json.contains("\"sessionId\":\"s1\""));
    }

    #[test]
    fn text_encoding_prefixes_con_and_end() {
        assert_eq!(
            ReplyEncoding::text_body(&MenuReply::prompt("Choose:")),
            "CON Choose:"
        );
        assert_eq!(
            ReplyEncoding::text_body(&MenuReply::terminal("Bye")),
            "END Bye"
        );
    }
}
