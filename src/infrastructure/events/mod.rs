//! In-process transport for analytics events.

mod channel_publisher;

pub use channel_publisher::ChannelPublisher;
