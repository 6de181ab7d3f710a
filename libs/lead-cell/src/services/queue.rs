use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::sync::Arc;

use tracing::debug;

use crate::models::{LeadRecord, PrioritizedLead};
use crate::services::priority::LeadPrioritizer;

#[derive(Debug)]
struct QueueEntry {
    sequence: u64,
    lead: PrioritizedLead,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on priority; earlier arrivals win ties
        self.lead
            .priority
            .cmp(&other.lead.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Binary-heap triage queue: `dequeue` always yields the highest-priority lead.
pub struct LeadPriorityQueue {
    heap: BinaryHeap<QueueEntry>,
    prioritizer: Arc<LeadPrioritizer>,
    next_sequence: u64,
}

impl LeadPriorityQueue {
    pub fn new(prioritizer: Arc<LeadPrioritizer>) -> Self {
        Self {
            heap: BinaryHeap::new(),
            prioritizer,
            next_sequence: 0,
        }
    }

    pub fn from_leads<I>(prioritizer: Arc<LeadPrioritizer>, leads: I) -> Self
    where
        I: IntoIterator<Item = LeadRecord>,
    {
        let mut queue = Self::new(prioritizer);
        for lead in leads {
            queue.enqueue(lead);
        }
        debug!("Built lead queue with {} entries", queue.size());
        queue
    }

    pub fn enqueue(&mut self, lead: LeadRecord) {
        let prioritized = self.prioritizer.prioritize(lead);
        self.push(prioritized);
    }

    fn push(&mut self, lead: PrioritizedLead) {
        let entry = QueueEntry {
            sequence: self.next_sequence,
            lead,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    /// `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<PrioritizedLead> {
        self.heap.pop().map(|entry| entry.lead)
    }

    pub fn peek(&self) -> Option<&PrioritizedLead> {
        self.heap.peek().map(|entry| &entry.lead)
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The `n` leads `dequeue` would return next, without removing them.
    pub fn top(&self, n: usize) -> Vec<PrioritizedLead> {
        let mut entries: Vec<&QueueEntry> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().take(n).map(|e| e.lead.clone()).collect()
    }

    /// Drains the queue in dequeue order.
    pub fn into_sorted_vec(mut self) -> Vec<PrioritizedLead> {
        let mut leads = Vec::with_capacity(self.heap.len());
        while let Some(lead) = self.dequeue() {
            leads.push(lead);
        }
        leads
    }

    /// Number of queued leads at each priority level.
    pub fn priority_distribution(&self) -> BTreeMap<u8, usize> {
        let mut distribution = BTreeMap::new();
        for entry in self.heap.iter() {
            *distribution.entry(entry.lead.priority).or_insert(0) += 1;
        }
        distribution
    }
}
