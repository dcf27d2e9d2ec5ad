//! Per-frame event queue.
//!
//! Overlap detection pushes events while scanning; the session drains the
//! queue once per step in push order. Handlers never run in the middle of a
//! physics scan.

use std::collections::VecDeque;

use crate::collectibles::CollectibleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    CoinCollected(CollectibleId),
    PowerUpCollected(CollectibleId),
}

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<LevelEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LevelEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = LevelEvent> + '_ {
        self.events.drain(..)
    }
}
