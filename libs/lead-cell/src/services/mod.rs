pub mod priority;
pub mod queue;

pub use priority::LeadPrioritizer;
pub use queue::LeadPriorityQueue;
