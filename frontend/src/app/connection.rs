//! # Stream Connection State Machine
//!
//! ```text
//!            connect()              handshake ok
//! Disconnected ───────► Connecting ─────────────► Open
//!      ▲                    │                       │
//!      │   connect failed   │     closed / error    │
//!      └────────────────────┴───────────────────────┘
//!        wait base_delay * (attempt + 1), attempt += 1,
//!        or stay Disconnected once attempt == max_attempts
//! ```
//!
//! [`ReconnectPolicy`] holds the attempt counter and cap; the store's
//! connection task asks it what to do after every disconnect.

use crate::core::config::ReconnectConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Stream connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
}

/// Linear-backoff reconnect policy with an attempt cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    attempt: u32,
    max_attempts: u32,
    base_delay: Duration,
}

impl ReconnectPolicy {
    pub fn new(config: ReconnectConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            base_delay: config.base_delay,
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// A connection opened: start counting from scratch.
    pub fn on_open(&mut self) {
        self.attempt = 0;
    }

    /// The connection dropped (or never opened). Returns how long to wait
    /// before the next attempt, or `None` once the cap is reached.
    pub fn on_disconnect(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        let delay = self.base_delay.saturating_mul(self.attempt + 1);
        self.attempt += 1;
        Some(delay)
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

/// Observable connection details, for status displays and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    /// Reconnect attempts since the last successful open
    pub attempt: u32,
    pub max_attempts: u32,
    /// Reconnects gave up; live updates are off until reset
    pub degraded: bool,
    pub messages_received: u64,
    /// Frames that could not be parsed
    pub frames_dropped: u64,
    pub last_error: Option<String>,
    pub last_connected: Option<DateTime<Utc>>,
    pub last_message: Option<DateTime<Utc>>,
}

impl ConnectionStatus {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            attempt: 0,
            max_attempts,
            degraded: false,
            messages_received: 0,
            frames_dropped: 0,
            last_error: None,
            last_connected: None,
            last_message: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == ConnectionState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32, base_ms: u64) -> ReconnectPolicy {
        ReconnectPolicy::new(ReconnectConfig {
            max_attempts,
            base_delay: Duration::from_millis(base_ms),
        })
    }

    #[test]
    fn test_delays_grow_linearly_then_stop() {
        let mut policy = policy(4, 500);
        let delays: Vec<_> = std::iter::from_fn(|| policy.on_disconnect()).collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1500),
                Duration::from_millis(2000),
            ]
        );
        assert!(policy.is_exhausted());
        assert_eq!(policy.on_disconnect(), None);
        assert_eq!(policy.on_disconnect(), None);
    }

    #[test]
    fn test_open_resets_attempts() {
        let mut policy = policy(3, 100);
        assert_eq!(policy.on_disconnect(), Some(Duration::from_millis(100)));
        assert_eq!(policy.on_disconnect(), Some(Duration::from_millis(200)));

        policy.on_open();
        assert_eq!(policy.attempt(), 0);
        assert_eq!(policy.on_disconnect(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_cap_never_retries() {
        let mut policy = policy(0, 100);
        assert!(policy.is_exhausted());
        assert_eq!(policy.on_disconnect(), None);
    }

    #[test]
    fn test_reset_rearms_exhausted_policy() {
        let mut policy = policy(1, 100);
        policy.on_disconnect();
        assert!(policy.is_exhausted());

        policy.reset();
        assert_eq!(policy.on_disconnect(), Some(Duration::from_millis(100)));
    }
}
