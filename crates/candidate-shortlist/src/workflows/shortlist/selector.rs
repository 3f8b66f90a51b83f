//! Greedy top-N selection with a soft location/education diversity rule.
//!
//! Candidates are visited once, best first. While the shortlist still has room, a
//! candidate whose location and education level have both been seen before is
//! dropped for good; once the shortlist is full every candidate competes on score
//! alone. The pass is order dependent and not a globally diverse optimum: a strong
//! candidate can lose its place only because two earlier candidates already covered
//! its location and its education level.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use super::domain::{RankedCandidate, WeightedCandidate};
use super::explanation::annotate;

/// Fixed-capacity min-heap keeping the best `capacity` items offered so far.
///
/// Entries are ordered by score, then by insertion sequence, so among equal scores
/// the later arrival ranks higher.
#[derive(Debug)]
pub struct BoundedMinHeap<T> {
    capacity: usize,
    next_sequence: u64,
    entries: BinaryHeap<Reverse<HeapEntry<T>>>,
}

#[derive(Debug)]
struct HeapEntry<T> {
    score: f64,
    sequence: u64,
    item: T,
}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for HeapEntry<T> {}

/// Result of offering an item to a [`BoundedMinHeap`].
#[derive(Debug, PartialEq)]
pub enum Offer<T> {
    Inserted,
    /// The heap was full and the previous minimum was evicted.
    Replaced(T),
    /// The heap was full and the offered item did not beat the minimum.
    Rejected(T),
}

impl<T> BoundedMinHeap<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            next_sequence: 0,
            entries: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn min_score(&self) -> Option<f64> {
        self.entries.peek().map(|Reverse(entry)| entry.score)
    }

    pub fn offer(&mut self, score: f64, item: T) -> Offer<T> {
        let entry = HeapEntry {
            score,
            sequence: self.next_sequence,
            item,
        };
        self.next_sequence += 1;

        if !self.is_full() {
            self.entries.push(Reverse(entry));
            return Offer::Inserted;
        }

        match self.entries.peek_mut() {
            Some(mut min) if min.0 < entry => {
                let Reverse(evicted) = std::mem::replace(&mut *min, Reverse(entry));
                Offer::Replaced(evicted.item)
            }
            _ => Offer::Rejected(entry.item),
        }
    }

    /// Drains the heap, best entry first.
    pub fn into_sorted_desc(self) -> Vec<T> {
        let mut entries: Vec<HeapEntry<T>> = self
            .entries
            .into_iter()
            .map(|Reverse(entry)| entry)
            .collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|entry| entry.item).collect()
    }
}

/// Locations and education levels recorded by the selection pass so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiversityState {
    locations: HashSet<String>,
    educations: HashSet<String>,
}

impl DiversityState {
    pub fn covers(&self, location: &str, education: &str) -> bool {
        self.locations.contains(location) && self.educations.contains(education)
    }

    pub fn record(mut self, location: String, education: String) -> Self {
        self.locations.insert(location);
        self.educations.insert(education);
        self
    }

    pub fn locations(&self) -> &HashSet<String> {
        &self.locations
    }

    pub fn educations(&self) -> &HashSet<String> {
        &self.educations
    }
}

/// What a single selection step did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Dropped because its location and education were both already covered.
    DiversitySkip,
    Inserted,
    Evicted,
    Rejected,
}

/// Picks up to `top_n` finalists from weighted candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversitySelector {
    top_n: usize,
}

impl DiversitySelector {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn select(&self, mut candidates: Vec<WeightedCandidate>) -> Vec<RankedCandidate> {
        candidates.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        let mut heap = BoundedMinHeap::with_capacity(self.top_n);
        let mut diversity = DiversityState::default();

        for candidate in candidates {
            let (next, outcome) = step(diversity, &mut heap, candidate);
            diversity = next;
            if outcome == StepOutcome::DiversitySkip {
                debug!(
                    shortlisted = heap.len(),
                    capacity = heap.capacity(),
                    "skipped candidate with an already covered location and education"
                );
            }
        }

        heap.into_sorted_desc()
    }
}

/// Runs one greedy selection step and hands the updated diversity state back.
pub fn step(
    diversity: DiversityState,
    heap: &mut BoundedMinHeap<RankedCandidate>,
    candidate: WeightedCandidate,
) -> (DiversityState, StepOutcome) {
    let location = candidate.scored.record.normalized_location();
    let education = candidate.scored.record.normalized_education();

    if diversity.covers(&location, &education) && !heap.is_full() {
        return (diversity, StepOutcome::DiversitySkip);
    }

    let diversity = diversity.record(location, education);
    let final_score = candidate.final_score;
    let outcome = match heap.offer(final_score, annotate(candidate)) {
        Offer::Inserted => StepOutcome::Inserted,
        Offer::Replaced(_) => StepOutcome::Evicted,
        Offer::Rejected(_) => StepOutcome::Rejected,
    };

    (diversity, outcome)
}
