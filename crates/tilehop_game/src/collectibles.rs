//! Coin and power-up pickups placed from the level's object markers.
//!
//! Pickups are static boxes one tile in size. A pickup is destroyed the first
//! time the player's box overlaps it, and that destruction is what makes each
//! pickup collectible exactly once: later frames no longer see it.

use glam::Vec2;

use crate::collision::Aabb;
use crate::events::{EventQueue, LevelEvent};
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectibleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Coin,
    PowerUp,
}

#[derive(Debug, Clone, Copy)]
pub struct Collectible {
    pub id: CollectibleId,
    pub kind: CollectibleKind,
    pub bounds: Aabb,
    pub alive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Collectibles {
    items: Vec<Collectible>,
}

impl Collectibles {
    /// Build every pickup the level places, all alive. Coins come first, then
    /// power-ups, each in marker order.
    pub fn from_level(level: &Level) -> Self {
        let size = Vec2::splat(level.grid.cell_size);
        let coins = level.coins.iter().map(|&p| (CollectibleKind::Coin, p));
        let power_ups = level.power_ups.iter().map(|&p| (CollectibleKind::PowerUp, p));
        let items = coins
            .chain(power_ups)
            .enumerate()
            .map(|(i, (kind, pos))| Collectible {
                id: CollectibleId(i),
                kind,
                bounds: Aabb::new(pos, size),
                alive: true,
            })
            .collect();
        Self { items }
    }

    /// Destroy every live pickup the player overlaps and queue one event per
    /// destroyed pickup. Returns how many were collected.
    pub fn collect_overlapping(&mut self, player: &Aabb, queue: &mut EventQueue) -> usize {
        let mut collected = 0;
        for item in self.items.iter_mut().filter(|i| i.alive) {
            if !item.bounds.overlaps(player) {
                continue;
            }
            item.alive = false;
            collected += 1;
            queue.push(match item.kind {
                CollectibleKind::Coin => LevelEvent::CoinCollected(item.id),
                CollectibleKind::PowerUp => LevelEvent::PowerUpCollected(item.id),
            });
        }
        collected
    }

    pub fn live(&self, kind: CollectibleKind) -> impl Iterator<Item = &Collectible> {
        self.items
            .iter()
            .filter(move |i| i.alive && i.kind == kind)
    }

    pub fn live_count(&self, kind: CollectibleKind) -> usize {
        self.live(kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::tests::flat_level;

    #[test]
    fn built_from_level_markers() {
        let level = flat_level();
        let collectibles = Collectibles::from_level(&level);
        assert_eq!(collectibles.live_count(CollectibleKind::Coin), 1);
        assert_eq!(collectibles.live_count(CollectibleKind::PowerUp), 1);

        let coin = collectibles
            .live(CollectibleKind::Coin)
            .next()
            .expect("coin exists");
        assert_eq!(coin.id, CollectibleId(0));
        assert_eq!(coin.bounds.center, Vec2::new(117.0, 135.0));
        assert_eq!(coin.bounds.half, Vec2::splat(9.0));
    }

    #[test]
    fn overlap_destroys_and_queues_once() {
        let level = flat_level();
        let mut collectibles = Collectibles::from_level(&level);
        let mut queue = EventQueue::new();
        let player = Aabb::new(Vec2::new(110.0, 132.0), Vec2::splat(24.0));

        assert_eq!(collectibles.collect_overlapping(&player, &mut queue), 1);
        assert_eq!(collectibles.collect_overlapping(&player, &mut queue), 0);
        assert_eq!(collectibles.collect_overlapping(&player, &mut queue), 0);

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events, vec![LevelEvent::CoinCollected(CollectibleId(0))]);
        assert_eq!(collectibles.live_count(CollectibleKind::Coin), 0);
        assert_eq!(collectibles.live_count(CollectibleKind::PowerUp), 1);
    }

    #[test]
    fn distant_player_collects_nothing() {
        let level = flat_level();
        let mut collectibles = Collectibles::from_level(&level);
        let mut queue = EventQueue::new();
        let player = Aabb::new(level.spawn, Vec2::splat(24.0));

        assert_eq!(collectibles.collect_overlapping(&player, &mut queue), 0);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn power_up_overlap_queues_power_up_event() {
        let level = flat_level();
        let mut collectibles = Collectibles::from_level(&level);
        let mut queue = EventQueue::new();
        let player = Aabb::new(Vec2::new(200.0, 132.0), Vec2::splat(24.0));

        collectibles.collect_overlapping(&player, &mut queue);
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events, vec![LevelEvent::PowerUpCollected(CollectibleId(1))]);
    }
}
