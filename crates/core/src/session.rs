//! Per-session context routing and chat rate limiting.
//!
//! Each active user session owns one [`Session`]: the dataset currently
//! attached to generated-text requests, the fixed-window rate counter,
//! and the most recently served exchange. Nothing here is process-global,
//! so concurrent users never share or leak context.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::warn;
use serde::Serialize;
use uuid::Uuid;

use crate::settings::RateLimitSettings;

/// Dataset attached to a session's generated-text requests.
///
/// At most one is active; selecting a new one replaces the old wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionContext {
    /// No dataset attached.
    #[default]
    None,
    /// An IPO announcement the user opened.
    Ipo { title: String, article: String },
    /// A company the user looked up, with its raw detail payload.
    Stock {
        symbol: String,
        details: serde_json::Value,
    },
}

impl SessionContext {
    pub fn is_none(&self) -> bool {
        matches!(self, SessionContext::None)
    }
}

/// Outcome of asking the rate limiter for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    /// Over the limit; `retry_after` is the time until the window can
    /// reset.
    Denied { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }
}

struct RateWindow {
    window_start: Instant,
    count: u32,
}

/// State for one user session.
///
/// The rate limiter is a fixed window: the counter resets only when a
/// full window has elapsed since `window_start`, so a burst of `limit`
/// requests at the tail of one window followed by `limit` more at the
/// head of the next is admitted. That coarseness is a documented property
/// of this limiter, not an accident.
pub struct Session {
    id: Uuid,
    limits: RateLimitSettings,
    context: Mutex<SessionContext>,
    window: Mutex<Option<RateWindow>>,
    last_exchange: Mutex<Option<(String, String)>>,
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("session lock poisoned; recovering");
        poisoned.into_inner()
    })
}

impl Session {
    pub fn new(limits: RateLimitSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            limits,
            context: Mutex::new(SessionContext::None),
            window: Mutex::new(None),
            last_exchange: Mutex::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replace the active context wholesale.
    pub fn select_context(&self, context: SessionContext) {
        *lock_or_recover(&self.context) = context;
    }

    /// Read the active context without side effects.
    pub fn current_context(&self) -> SessionContext {
        lock_or_recover(&self.context).clone()
    }

    /// Reset the context to none. A no-op when already none.
    pub fn clear_context(&self) {
        *lock_or_recover(&self.context) = SessionContext::None;
    }

    /// Ask for a request slot at the current time.
    pub fn admit(&self) -> Admission {
        self.admit_at(Instant::now())
    }

    /// Ask for a request slot as of `now`.
    ///
    /// The first call, or any call once a full window has elapsed since
    /// the window opened, resets the window to `count = 1` and admits.
    /// Within a window, calls admit while `count < max_requests`. A
    /// denied call mutates nothing. The read-check-increment runs under
    /// one lock, so two requests racing on the same session cannot both
    /// take the last slot.
    pub fn admit_at(&self, now: Instant) -> Admission {
        let mut window = lock_or_recover(&self.window);
        match window.as_mut() {
            None => {
                *window = Some(RateWindow {
                    window_start: now,
                    count: 1,
                });
                Admission::Allowed
            }
            Some(active) => {
                let elapsed = now.saturating_duration_since(active.window_start);
                if elapsed >= self.limits.window {
                    active.window_start = now;
                    active.count = 1;
                    Admission::Allowed
                } else if active.count < self.limits.max_requests {
                    active.count += 1;
                    Admission::Allowed
                } else {
                    Admission::Denied {
                        retry_after: self.limits.window - elapsed,
                    }
                }
            }
        }
    }

    /// Memoize the reply served for `prompt`.
    pub fn remember_exchange(&self, prompt: &str, reply: &str) {
        *lock_or_recover(&self.last_exchange) = Some((prompt.to_string(), reply.to_string()));
    }

    /// The memoized reply, but only for exactly the same prompt.
    pub fn replay(&self, prompt: &str) -> Option<String> {
        lock_or_recover(&self.last_exchange)
            .as_ref()
            .and_then(|(last_prompt, reply)| (last_prompt == prompt).then(|| reply.clone()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RateLimitSettings::default())
    }
}
