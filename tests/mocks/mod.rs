//! Mock implementations of the broker's collaborators
//!
//! Lets the full request flow run without yt-dlp or a Telegram connection.

pub mod mock_chat;
pub mod mock_media;

#[allow(unused_imports)]
pub use mock_chat::{ChatEvent, RecordingChat};
#[allow(unused_imports)]
pub use mock_media::{DispatchCall, DispatchMode, MockDispatcher, MockResolver};
