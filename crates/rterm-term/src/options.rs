use std::time::Duration;

use crate::channel::ChannelConfig;

/// Configuration knobs for [`crate::Engine`].
#[derive(Clone, Debug)]
pub struct TerminalOptions {
    /// Initial screen width, in columns.
    pub columns: usize,
    /// Initial screen height, in rows.
    pub rows: usize,
    /// Literal string replied to ENQ (empty by default).
    pub answerback: String,
    /// Size of the temporary buffer used to drain PTY output per poll.
    pub read_buffer_capacity: usize,
    /// Timeout used when polling for PTY/window events.
    pub poll_timeout: Duration,
    /// Interval between cursor/SGR blink phase flips.
    pub blink_interval: Duration,
    /// Sizing for the request/event channels between the engine and its
    /// front-end.
    pub channel_config: ChannelConfig,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
            answerback: String::new(),
            read_buffer_capacity: 4096,
            poll_timeout: Duration::from_millis(16),
            blink_interval: Duration::from_millis(400),
            channel_config: ChannelConfig::default(),
        }
    }
}
