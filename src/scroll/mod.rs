//! Continuous auto-scroll for a horizontally scrollable container.
//!
//! Unlike the carousel this has no slide index: each tick moves the scroll
//! offset forward by a fixed step and jumps back to the start once the end of
//! the content is visible.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::ScrollConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A container whose content can be scrolled horizontally.
pub trait ScrollContainer: Send {
    /// Current horizontal offset
    fn scroll_left(&self) -> u32;
    /// Visible width
    fn client_width(&self) -> u32;
    /// Total width of the content
    fn scroll_width(&self) -> u32;
    fn scroll_by(&mut self, delta: u32, behavior: ScrollBehavior);
    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTick {
    Advanced,
    Wrapped,
}

#[derive(Debug, Clone)]
pub struct AutoScroller {
    interval: Duration,
    step: u32,
}

impl AutoScroller {
    pub fn new(interval: Duration, step: u32) -> Self {
        Self { interval, step }
    }

    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(Duration::from_millis(config.tick_interval_ms), config.step)
    }

    /// Advance one step, wrapping to the start when the end was already visible.
    ///
    /// The end check uses the offset from before the advance: a smooth scroll
    /// has not moved yet when the check runs, so the reset lands one tick after
    /// the end is reached.
    pub fn tick<C: ScrollContainer + ?Sized>(&self, container: &mut C) -> ScrollTick {
        let offset = container.scroll_left();
        container.scroll_by(self.step, ScrollBehavior::Smooth);

        if offset.saturating_add(container.client_width()) >= container.scroll_width() {
            container.scroll_to(0, ScrollBehavior::Smooth);
            ScrollTick::Wrapped
        } else {
            ScrollTick::Advanced
        }
    }

    /// Start ticking `container` on a background task.
    ///
    /// Returns `None` without scheduling anything when there is no container.
    /// The first tick fires one full interval after starting.
    pub fn start<C>(&self, container: Option<Arc<Mutex<C>>>) -> Option<AutoScrollHandle>
    where
        C: ScrollContainer + 'static,
    {
        let Some(container) = container else {
            tracing::warn!("Auto-scroll not started: no scroll container");
            return None;
        };

        let scroller = self.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + scroller.interval;
            let mut ticker = tokio::time::interval_at(start, scroller.interval);
            loop {
                ticker.tick().await;
                let Ok(mut guard) = container.lock() else {
                    tracing::error!("Scroll container lock poisoned, stopping auto-scroll");
                    break;
                };
                if scroller.tick(&mut *guard) == ScrollTick::Wrapped {
                    tracing::trace!("Auto-scroll wrapped to start");
                }
            }
        });

        tracing::debug!(
            "Auto-scroll started: step {} every {:?}",
            self.step,
            self.interval
        );
        Some(AutoScrollHandle { handle })
    }
}

/// Owns the auto-scroll task; cancelling or dropping it stops the timer.
pub struct AutoScrollHandle {
    handle: JoinHandle<()>,
}

impl AutoScrollHandle {
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for AutoScrollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
