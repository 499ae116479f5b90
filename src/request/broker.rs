//! Request lifecycle: link → quota → metadata → gated options → selection → one job.

use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::quota::QuotaTracker;
use crate::core::utils::format_duration;
use crate::download::{DownloadOption, DurationPolicy, JobDispatcher, MediaKind, MetadataResolver, OptionSet};
use crate::request::error::RequestError;
use crate::request::gateway::{ChatGateway, OptionButton};
use crate::request::job::DownloadJob;
use crate::request::link::parse_media_link;
use crate::request::payload::{is_valid_format_code, Selection, MAX_FORMAT_CODE_LEN};
use crate::request::tokens::{MediaRequest, RequestTokens};

/// Who sent an update and where replies go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: u64,
    pub chat_id: i64,
}

/// Runtime settings of the broker.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub policy: DurationPolicy,
    pub download_dir: PathBuf,
}

impl BrokerConfig {
    pub fn from_env() -> Self {
        Self {
            policy: DurationPolicy::from_env(),
            download_dir: PathBuf::from(config::DOWNLOAD_FOLDER.as_str()),
        }
    }

    /// Rejects video tiers that cannot travel in a button payload.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(tier) = self
            .policy
            .video_tiers
            .iter()
            .find(|tier| !is_valid_format_code(tier))
        {
            return Err(AppError::Config(format!(
                "invalid video quality tier {:?}: use up to {} letters, digits, '_' or '-'",
                tier, MAX_FORMAT_CODE_LEN
            )));
        }
        Ok(())
    }
}

/// What happened to an inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Not a supported link; nothing was sent
    Ignored,
    /// Options were presented under `token`
    Offered { token: String, options: Vec<DownloadOption> },
}

pub const PROCESSING_TEXT: &str = "⏳ Downloading… This may take a moment.";

/// Orchestrates one user request at a time per update.
///
/// The broker owns the quota tracker and the pending-request tokens; metadata
/// lookup and job execution are injected so tests can drive the whole flow
/// without yt-dlp or Telegram.
pub struct RequestBroker {
    quota: Arc<QuotaTracker>,
    resolver: Arc<dyn MetadataResolver>,
    dispatcher: Arc<dyn JobDispatcher>,
    tokens: RequestTokens,
    config: BrokerConfig,
}

impl RequestBroker {
    pub fn new(
        quota: Arc<QuotaTracker>,
        resolver: Arc<dyn MetadataResolver>,
        dispatcher: Arc<dyn JobDispatcher>,
        tokens: RequestTokens,
        config: BrokerConfig,
    ) -> Self {
        Self {
            quota,
            resolver,
            dispatcher,
            tokens,
            config,
        }
    }

    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.config.policy
    }

    /// Handles a plain text message.
    ///
    /// Non-links are ignored. Every error has already been reported to the
    /// chat when this returns `Err`.
    pub async fn handle_text(
        &self,
        chat: &dyn ChatGateway,
        ctx: RequestContext,
        text: &str,
    ) -> Result<LinkOutcome, RequestError> {
        let Some(url) = parse_media_link(text) else {
            log::debug!("Ignoring non-link message from user {}", ctx.user_id);
            return Ok(LinkOutcome::Ignored);
        };

        log::info!("User {} sent link {}", ctx.user_id, url);

        match self.offer(chat, ctx, url).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                log::warn!("Link request from user {} failed ({}): {}", ctx.user_id, e.category(), e);
                self.report(chat, ctx.chat_id, None, &e).await;
                Err(e)
            }
        }
    }

    async fn offer(&self, chat: &dyn ChatGateway, ctx: RequestContext, url: Url) -> Result<LinkOutcome, RequestError> {
        if !self.quota.can_download(ctx.user_id) {
            return Err(RequestError::QuotaExceeded {
                used: self.quota.usage(ctx.user_id),
                max: self.quota.max_daily(),
            });
        }

        let metadata = self.resolver.resolve(&url).await?;
        let policy = &self.config.policy;
        let options = policy.gate(metadata.duration_secs);

        if options == OptionSet::Rejected {
            return Err(RequestError::DurationLimit {
                duration_secs: metadata.duration_secs,
                limit_secs: policy.audio_max_secs,
            });
        }

        let mut text = format!(
            "🎞 {}\n⏱ {}\n\nChoose a format:",
            metadata.title,
            format_duration(metadata.duration_secs)
        );
        if options == OptionSet::AudioOnly {
            text.push_str(&format!(
                "\n(videos longer than {} minutes are available as audio only)",
                policy.full_max_secs / 60
            ));
        }

        let offered = policy.options(options);
        let token = self
            .tokens
            .issue(MediaRequest {
                user_id: ctx.user_id,
                chat_id: ctx.chat_id,
                source_url: url,
                title: metadata.title,
                duration_secs: metadata.duration_secs,
                options,
            })
            .await;

        let buttons = offered
            .iter()
            .map(|option| OptionButton {
                label: option.label.clone(),
                payload: Selection::new(option.kind, option.format_code.as_str(), token.as_str()).encode(),
            })
            .collect();

        if let Err(e) = chat.send_options(ctx.chat_id, &text, buttons).await {
            self.tokens.discard(&token).await;
            return Err(e.into());
        }

        log::info!("Offered {:?} to user {} (token {})", options, ctx.user_id, token);
        Ok(LinkOutcome::Offered { token, options: offered })
    }

    /// Handles a button click carrying `payload`.
    ///
    /// Returns the user's download count after a successful delivery. The
    /// output file is gone and the error reported to the chat by the time
    /// this returns, whatever the outcome.
    pub async fn handle_selection(
        &self,
        chat: &dyn ChatGateway,
        ctx: RequestContext,
        payload: &str,
    ) -> Result<u32, RequestError> {
        let mut status_message = None;

        match self.dispatch(chat, ctx, payload, &mut status_message).await {
            Ok(used) => Ok(used),
            Err(e) => {
                match &e {
                    RequestError::Download(cause) => log::warn!(
                        "Download for user {} failed ({}/{}): {}",
                        ctx.user_id,
                        e.category(),
                        cause.subcategory(),
                        cause
                    ),
                    _ => log::warn!("Selection from user {} failed ({}): {}", ctx.user_id, e.category(), e),
                }
                self.report(chat, ctx.chat_id, status_message, &e).await;
                Err(e)
            }
        }
    }

    async fn dispatch(
        &self,
        chat: &dyn ChatGateway,
        ctx: RequestContext,
        payload: &str,
        status_message: &mut Option<i32>,
    ) -> Result<u32, RequestError> {
        let selection = Selection::parse(payload)?;
        let request = self.tokens.take(&selection.token, ctx.user_id).await?;

        if !self
            .config
            .policy
            .permits(request.options, selection.kind, &selection.format_code)
        {
            return Err(RequestError::Validation(format!(
                "{}:{} was not offered",
                selection.kind, selection.format_code
            )));
        }

        // The quota may have been used up by other downloads since the offer.
        // The slot is held until delivery and given back if the job fails.
        let reservation = self
            .quota
            .try_reserve(ctx.user_id)
            .ok_or_else(|| RequestError::QuotaExceeded {
                used: self.quota.usage(ctx.user_id),
                max: self.quota.max_daily(),
            })?;

        let job = DownloadJob::new(
            ctx.user_id,
            request.source_url,
            selection.kind,
            &selection.format_code,
            &request.title,
            &self.config.download_dir,
        );

        *status_message = Some(chat.send_text(ctx.chat_id, PROCESSING_TEXT).await?);

        self.dispatcher
            .run(&job.source_url, job.kind, &job.format_code, job.output_path())
            .await?;

        match job.kind {
            MediaKind::Audio => chat.send_audio(ctx.chat_id, job.output_path(), &request.title).await?,
            MediaKind::Video => chat.send_document(ctx.chat_id, job.output_path(), &request.title).await?,
        }

        let used = reservation.commit();
        log::info!(
            "Delivered {} {} to user {} ({}/{})",
            job.kind,
            job.format_code,
            ctx.user_id,
            used,
            self.quota.max_daily()
        );

        if let Some(message_id) = *status_message {
            let done = format!("✅ Done! Downloads today: {}/{}", used, self.quota.max_daily());
            if let Err(e) = chat.edit_text(ctx.chat_id, message_id, &done).await {
                log::warn!("Failed to update status message for user {}: {}", ctx.user_id, e);
            }
        }

        Ok(used)
    }

    /// Text for `/usage`.
    pub fn usage_text(&self, user_id: u64) -> String {
        format!(
            "📊 Downloads today: {}/{}",
            self.quota.usage(user_id),
            self.quota.max_daily()
        )
    }

    async fn report(&self, chat: &dyn ChatGateway, chat_id: i64, status_message: Option<i32>, err: &RequestError) {
        let text = err.user_message();

        if let Some(message_id) = status_message {
            match chat.edit_text(chat_id, message_id, &text).await {
                Ok(()) => return,
                Err(e) => log::warn!("Failed to edit status message {}: {}", message_id, e),
            }
        }

        if let Err(e) = chat.send_text(chat_id, &text).await {
            log::error!("Failed to report error to chat {}: {}", chat_id, e);
        }
    }
}
