//! Host session - where work items come from and where they are routed to

use std::collections::{BTreeMap, VecDeque};

use crate::models::{Relationship, WorkItem};

/// Boundary to the host engine that owns queued work items
pub trait Session {
    /// Next queued item, if any
    fn get(&mut self) -> Option<WorkItem>;

    /// Fresh, empty item for triggers without input
    fn create(&mut self) -> WorkItem {
        WorkItem::new()
    }

    fn transfer(&mut self, item: WorkItem, relationship: Relationship);
}

/// In-memory session with per-relationship output queues
#[derive(Debug, Default)]
pub struct MemorySession {
    incoming: VecDeque<WorkItem>,
    outgoing: BTreeMap<Relationship, Vec<WorkItem>>,
}

impl MemorySession {
    pub fn new() -> Self {
        MemorySession::default()
    }

    pub fn enqueue(&mut self, item: WorkItem) {
        self.incoming.push_back(item);
    }

    pub fn queued(&self) -> usize {
        self.incoming.len()
    }

    pub fn transferred(&self, relationship: Relationship) -> &[WorkItem] {
        self.outgoing
            .get(&relationship)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn transferred_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }
}

impl Session for MemorySession {
    fn get(&mut self) -> Option<WorkItem> {
        self.incoming.pop_front()
    }

    fn transfer(&mut self, item: WorkItem, relationship: Relationship) {
        self.outgoing.entry(relationship).or_default().push(item);
    }
}
