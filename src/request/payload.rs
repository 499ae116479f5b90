//! Callback payload carried by option buttons: `dl:<kind>:<format_code>:<token>`.

use std::str::FromStr;

use crate::download::MediaKind;
use crate::request::error::RequestError;

const PREFIX: &str = "dl";

/// Telegram rejects callback data longer than this.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Length of the tokens handed out by [`RequestTokens`](crate::request::RequestTokens).
pub const TOKEN_LEN: usize = 32;

/// Longest format code that still fits a payload next to a full token.
pub const MAX_FORMAT_CODE_LEN: usize = MAX_PAYLOAD_LEN - "dl:video::".len() - TOKEN_LEN;

/// Format codes are ASCII letters, digits, `_` and `-`, and short enough to encode.
pub fn is_valid_format_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_FORMAT_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A user's pick from the option keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: MediaKind,
    pub format_code: String,
    pub token: String,
}

impl Selection {
    pub fn new(kind: MediaKind, format_code: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            kind,
            format_code: format_code.into(),
            token: token.into(),
        }
    }

    /// Encodes the selection as button callback data.
    pub fn encode(&self) -> String {
        format!("{}:{}:{}:{}", PREFIX, self.kind, self.format_code, self.token)
    }

    /// Parses button callback data.
    ///
    /// Anything that does not have exactly the `dl:<kind>:<code>:<token>` shape
    /// is a [`RequestError::Validation`].
    pub fn parse(data: &str) -> Result<Self, RequestError> {
        if data.len() > MAX_PAYLOAD_LEN {
            return Err(RequestError::Validation("payload too long".to_string()));
        }

        let parts: Vec<&str> = data.splitn(4, ':').collect();
        let [prefix, kind, code, token] = parts.as_slice() else {
            return Err(RequestError::Validation(format!("malformed payload: {}", data)));
        };

        if *prefix != PREFIX {
            return Err(RequestError::Validation(format!("unknown payload prefix: {}", prefix)));
        }

        let kind = MediaKind::from_str(kind)
            .map_err(|_| RequestError::Validation(format!("unknown media kind: {}", kind)))?;

        let token_ok = !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric());
        if !is_valid_format_code(code) || !token_ok {
            return Err(RequestError::Validation(format!("malformed payload: {}", data)));
        }

        Ok(Self::new(kind, *code, *token))
    }
}
