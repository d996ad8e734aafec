// ABOUTME: Notification endpoint URLs and the webhook payload each one expects.
// ABOUTME: Supports slack://, discord://, teams+https://, generic(+http[s])://, and logger://.

use serde_json::{Value, json};

use super::error::NotificationError;

/// A parsed notification URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `slack://<a>/<b>/<c>`: incoming webhook tokens.
    Slack { url: String },
    /// `discord://<token>@<webhook id>`.
    Discord { url: String },
    /// `teams+https://...`: connector webhook URL.
    Teams { url: String },
    /// `generic+https://...`, `generic://...` or a plain http(s) URL.
    Generic { url: String },
    /// `logger://`: write the message to the log.
    Logger,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, NotificationError> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| invalid(raw, "missing scheme"))?;

        match scheme {
            "logger" => Ok(Endpoint::Logger),
            "slack" => {
                let tokens: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
                if tokens.len() != 3 || tokens.iter().any(|t| t.is_empty()) {
                    return Err(invalid(raw, "expected slack://<a>/<b>/<c>"));
                }
                Ok(Endpoint::Slack {
                    url: format!("https://hooks.slack.com/services/{}", tokens.join("/")),
                })
            }
            "discord" => {
                let (token, id) = rest
                    .trim_end_matches('/')
                    .split_once('@')
                    .filter(|(token, id)| !token.is_empty() && !id.is_empty())
                    .ok_or_else(|| invalid(raw, "expected discord://<token>@<webhook id>"))?;
                Ok(Endpoint::Discord {
                    url: format!("https://discord.com/api/webhooks/{}/{}", id, token),
                })
            }
            "teams+https" => Ok(Endpoint::Teams {
                url: format!("https://{}", non_empty(raw, rest)?),
            }),
            "generic+https" | "generic" | "https" => Ok(Endpoint::Generic {
                url: format!("https://{}", non_empty(raw, rest)?),
            }),
            "generic+http" | "http" => Ok(Endpoint::Generic {
                url: format!("http://{}", non_empty(raw, rest)?),
            }),
            other => Err(NotificationError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Webhook URL to POST to; `None` for the logger.
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Endpoint::Slack { url }
            | Endpoint::Discord { url }
            | Endpoint::Teams { url }
            | Endpoint::Generic { url } => Some(url),
            Endpoint::Logger => None,
        }
    }

    /// JSON body carrying `message`.
    pub fn payload(&self, message: &str) -> Value {
        match self {
            Endpoint::Slack { .. } | Endpoint::Teams { .. } => json!({ "text": message }),
            Endpoint::Discord { .. } => json!({ "content": message }),
            Endpoint::Generic { .. } | Endpoint::Logger => json!({ "message": message }),
        }
    }
}

fn non_empty<'a>(raw: &str, rest: &'a str) -> Result<&'a str, NotificationError> {
    if rest.is_empty() {
        Err(invalid(raw, "missing host"))
    } else {
        Ok(rest)
    }
}

fn invalid(url: &str, reason: &str) -> NotificationError {
    NotificationError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slack_tokens_map_to_incoming_webhook() {
        let endpoint = Endpoint::parse("slack://T000/B000/XXXX").unwrap();
        assert_eq!(
            endpoint.target_url(),
            Some("https://hooks.slack.com/services/T000/B000/XXXX")
        );
        assert_eq!(endpoint.payload("hi")["text"], "hi");
    }

    #[test]
    fn discord_token_and_id_are_swapped_into_path() {
        let endpoint = Endpoint::parse("discord://secret@12345").unwrap();
        assert_eq!(
            endpoint.target_url(),
            Some("https://discord.com/api/webhooks/12345/secret")
        );
        assert_eq!(endpoint.payload("hi")["content"], "hi");
    }

    #[test]
    fn generic_variants_keep_host_and_path() {
        assert_eq!(
            Endpoint::parse("generic+http://hooks.local:8080/x").unwrap(),
            Endpoint::Generic {
                url: "http://hooks.local:8080/x".to_string()
            }
        );
        assert_eq!(
            Endpoint::parse("generic://hooks.example.com/x").unwrap(),
            Endpoint::Generic {
                url: "https://hooks.example.com/x".to_string()
            }
        );
        assert_eq!(
            Endpoint::parse("https://hooks.example.com/y").unwrap(),
            Endpoint::Generic {
                url: "https://hooks.example.com/y".to_string()
            }
        );
    }

    #[test]
    fn teams_strips_prefix() {
        let endpoint = Endpoint::parse("teams+https://outlook.office.com/webhook/abc").unwrap();
        assert_eq!(
            endpoint.target_url(),
            Some("https://outlook.office.com/webhook/abc")
        );
    }

    #[test]
    fn logger_has_no_target() {
        assert_eq!(Endpoint::parse("logger://").unwrap(), Endpoint::Logger);
        assert_eq!(Endpoint::Logger.target_url(), None);
    }

    #[test]
    fn unknown_scheme_is_unsupported() {
        assert!(matches!(
            Endpoint::parse("smtp://mail.example.com"),
            Err(NotificationError::UnsupportedScheme(ref s)) if s == "smtp"
        ));
    }

    #[test]
    fn malformed_slack_url_is_invalid() {
        assert!(matches!(
            Endpoint::parse("slack://only-one"),
            Err(NotificationError::InvalidUrl { .. })
        ));
    }
}
