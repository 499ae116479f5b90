//! Short-lived correlation tokens between an offer and the user's pick.

use moka::future::Cache;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::core::config;
use crate::download::OptionSet;
use crate::request::error::RequestError;

/// Everything remembered about a link between offering options and the click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub user_id: u64,
    pub chat_id: i64,
    pub source_url: Url,
    pub title: String,
    pub duration_secs: u64,
    pub options: OptionSet,
}

/// Token → pending request map with expiry.
///
/// Tokens are opaque 32-char hex strings so the full callback payload stays
/// well under Telegram's 64-byte limit regardless of the URL length.
/// A token is consumed by the first successful [`take`](Self::take).
#[derive(Clone)]
pub struct RequestTokens {
    cache: Cache<String, MediaRequest>,
}

impl RequestTokens {
    pub fn new(ttl: Duration, max_pending: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_pending).time_to_live(ttl).build();
        Self { cache }
    }

    pub fn from_env() -> Self {
        Self::new(
            config::download::token_ttl(),
            config::download::MAX_PENDING_REQUESTS,
        )
    }

    /// Stores the request and returns its fresh token.
    pub async fn issue(&self, request: MediaRequest) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.cache.insert(token.clone(), request).await;
        token
    }

    /// Claims the request behind `token` for `user_id`.
    ///
    /// Unknown, expired, already used or foreign tokens yield
    /// [`RequestError::Validation`]. A foreign click leaves the token in place
    /// for its owner.
    pub async fn take(&self, token: &str, user_id: u64) -> Result<MediaRequest, RequestError> {
        let request = self
            .cache
            .get(token)
            .await
            .ok_or_else(|| RequestError::Validation("unknown or expired token".to_string()))?;

        if request.user_id != user_id {
            return Err(RequestError::Validation(format!(
                "token belongs to user {}, clicked by {}",
                request.user_id, user_id
            )));
        }

        // remove() is the atomic claim; a concurrent click loses here
        self.cache
            .remove(token)
            .await
            .ok_or_else(|| RequestError::Validation("token already used".to_string()))
    }

    /// Drops a token without using it.
    pub async fn discard(&self, token: &str) {
        self.cache.invalidate(token).await;
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.cache.get(token).await.is_some()
    }
}
