//! Per-entity strategy registry
//!
//! Optional helper for callers that track many remote cursors. Each entity
//! gets its own strategy instance on first sight; disconnecting an entity
//! drops its state.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::strategy::{CursorSmoothing, StrategyKind};
use super::types::{Point, Sample};
use crate::config::Config;

/// Map from entity identity to its smoothing strategy
pub struct RemoteCursors<K> {
    config: Config,
    kind: StrategyKind,
    cursors: HashMap<K, Box<dyn CursorSmoothing + Send>>,
}

impl<K> RemoteCursors<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Create an empty registry using the configured strategy
    pub fn new(config: Config) -> Self {
        let kind = config.strategy;
        Self::with_strategy(config, kind)
    }

    /// Create an empty registry using `kind` regardless of configuration
    pub fn with_strategy(config: Config, kind: StrategyKind) -> Self {
        Self {
            config,
            kind,
            cursors: HashMap::new(),
        }
    }

    /// Route a sample to its entity, creating the entity on first sight
    pub fn observe(&mut self, id: &K, sample: Sample) -> bool {
        let (kind, config) = (self.kind, &self.config);
        let cursor = self.cursors.entry(id.clone()).or_insert_with(|| {
            debug!("Tracking remote cursor {:?} ({})", id, kind);
            kind.build(config)
        });
        cursor.push(sample)
    }

    /// Render position of one entity, `None` if it is not tracked
    pub fn position(&mut self, id: &K, now_ms: i64) -> Option<Point> {
        self.cursors.get_mut(id).map(|cursor| cursor.position(now_ms))
    }

    /// Render positions of every tracked entity
    pub fn positions(&mut self, now_ms: i64) -> Vec<(K, Point)> {
        self.cursors
            .iter_mut()
            .map(|(id, cursor)| (id.clone(), cursor.position(now_ms)))
            .collect()
    }

    /// Reset one entity without forgetting it
    pub fn reset(&mut self, id: &K) -> bool {
        match self.cursors.get_mut(id) {
            Some(cursor) => {
                cursor.reset();
                true
            }
            None => false,
        }
    }

    /// Stop tracking an entity (disconnect)
    pub fn remove(&mut self, id: &K) -> bool {
        let removed = self.cursors.remove(id).is_some();
        if removed {
            debug!("Dropped remote cursor {:?}", id);
        }
        removed
    }

    /// Whether `id` is tracked
    pub fn contains(&self, id: &K) -> bool {
        self.cursors.contains_key(id)
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Whether no entity is tracked
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Strategy used for new entities
    pub fn strategy(&self) -> StrategyKind {
        self.kind
    }

    /// Forget every entity
    pub fn clear(&mut self) {
        self.cursors.clear();
    }
}
