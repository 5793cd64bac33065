//! FIFO of person ids waiting to be expanded.

use std::collections::VecDeque;

use kinograph_domain::PersonId;

/// Owned by the single crawl task; no locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    queue: VecDeque<PersonId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: PersonId) {
        self.queue.push_back(id);
    }

    pub fn pop(&mut self) -> Option<PersonId> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn to_vec(&self) -> Vec<PersonId> {
        self.queue.iter().copied().collect()
    }
}

impl FromIterator<PersonId> for Frontier {
    fn from_iter<I: IntoIterator<Item = PersonId>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl Extend<PersonId> for Frontier {
    fn extend<I: IntoIterator<Item = PersonId>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}
