//! Request orchestration: link detection, option tokens and the broker

pub mod broker;
pub mod error;
pub mod gateway;
pub mod job;
pub mod link;
pub mod payload;
pub mod tokens;

pub use broker::{BrokerConfig, LinkOutcome, RequestBroker, RequestContext};
pub use error::{DeliveryError, RequestError};
pub use gateway::{ChatGateway, OptionButton};
pub use job::DownloadJob;
pub use link::parse_media_link;
pub use payload::Selection;
pub use tokens::{MediaRequest, RequestTokens};
