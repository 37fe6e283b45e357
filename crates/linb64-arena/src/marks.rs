//! Stack of allocation boundaries.
//!
//! [`BoundaryStack`] records, in allocation order, the exclusive end address
//! of every allocation made in the current epoch. The next allocation starts
//! at the top boundary. Releasing a slot marks it dead; dead slots are only
//! popped once everything above them is dead too, so space is reclaimed
//! promptly under stack-ordered release and held until the region is
//! replaced otherwise.

/// A single boundary record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundarySlot {
    /// Exclusive end address of the allocation.
    pub end: u32,
    /// Allocation serial that created this slot.
    pub ticket: u32,
    /// Whether the allocation is still outstanding.
    pub live: bool,
}

/// Result of releasing a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// The slot was live and is now released.
    Released,
    /// No live slot at that index carries that ticket.
    Unmatched,
}

/// Allocation boundaries of one epoch, in allocation order.
///
/// Invariants: the top slot, if any, is live; `end` values are
/// non-decreasing from bottom to top.
#[derive(Clone, Debug, Default)]
pub struct BoundaryStack {
    slots: Vec<BoundarySlot>,
    /// Next ticket to hand out. Never reused within an epoch.
    next_ticket: u32,
}

impl BoundaryStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Address where the next allocation starts: the top boundary, or 0.
    pub fn top(&self) -> u32 {
        self.slots.last().map_or(0, |s| s.end)
    }

    /// Record a new boundary at `end`. Returns `(slot, ticket)`.
    pub fn push(&mut self, end: u32) -> (u32, u32) {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let slot = self.slots.len() as u32;
        self.slots.push(BoundarySlot {
            end,
            ticket,
            live: true,
        });
        (slot, ticket)
    }

    /// Release the slot at `slot` if it is live and carries `ticket`.
    ///
    /// O(1) apart from popping the dead run at the top, which is amortised
    /// against the pushes that created it.
    pub fn release(&mut self, slot: u32, ticket: u32) -> Release {
        match self.slots.get_mut(slot as usize) {
            Some(s) if s.live && s.ticket == ticket => s.live = false,
            _ => return Release::Unmatched,
        }
        while self.slots.last().is_some_and(|s| !s.live) {
            self.slots.pop();
        }
        Release::Released
    }

    /// End addresses of all outstanding allocations, bottom to top.
    pub fn live_marks(&self) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|s| s.live)
            .map(|s| s.end)
            .collect()
    }

    /// Number of outstanding allocations.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    /// Number of recorded slots, including dead ones held below a live one.
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Whether no allocation is outstanding.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_starts_at_zero() {
        let stack = BoundaryStack::new();
        assert_eq!(stack.top(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn stack_ordered_release_empties() {
        let mut stack = BoundaryStack::new();
        let (a, ta) = stack.push(10);
        let (b, tb) = stack.push(25);
        assert_eq!(stack.live_marks(), vec![10, 25]);
        assert_eq!(stack.release(b, tb), Release::Released);
        assert_eq!(stack.top(), 10);
        assert_eq!(stack.release(a, ta), Release::Released);
        assert!(stack.is_empty());
        assert_eq!(stack.top(), 0);
    }

    #[test]
    fn out_of_order_release_keeps_upper_boundary() {
        let mut stack = BoundaryStack::new();
        let (a, ta) = stack.push(10);
        let (b, tb) = stack.push(25);
        assert_eq!(stack.release(a, ta), Release::Released);
        assert_eq!(stack.live_marks(), vec![25]);
        // The space below b is not reusable yet.
        assert_eq!(stack.top(), 25);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.release(b, tb), Release::Released);
        assert!(stack.is_empty());
    }

    #[test]
    fn double_release_is_unmatched() {
        let mut stack = BoundaryStack::new();
        let (a, ta) = stack.push(8);
        stack.push(16);
        assert_eq!(stack.release(a, ta), Release::Released);
        assert_eq!(stack.release(a, ta), Release::Unmatched);
    }

    #[test]
    fn reused_slot_rejects_old_ticket() {
        let mut stack = BoundaryStack::new();
        let (a, ta) = stack.push(8);
        stack.release(a, ta);
        let (b, tb) = stack.push(8);
        assert_eq!(a, b);
        assert_ne!(ta, tb);
        assert_eq!(stack.release(a, ta), Release::Unmatched);
        assert_eq!(stack.live_marks(), vec![8]);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn top_slot_always_live_and_marks_ordered(
                lens in proptest::collection::vec(0u32..500, 1..30),
                order in proptest::collection::vec(any::<prop::sample::Index>(), 0..30),
            ) {
                let mut stack = BoundaryStack::new();
                let mut handles = Vec::new();
                for len in &lens {
                    let end = stack.top() + len;
                    handles.push(stack.push(end));
                }
                for idx in &order {
                    let (slot, ticket) = handles[idx.index(handles.len())];
                    stack.release(slot, ticket);
                    if let Some(top) = stack.slots.last() {
                        prop_assert!(top.live);
                    }
                    let marks = stack.live_marks();
                    prop_assert!(marks.windows(2).all(|w| w[0] <= w[1]));
                }
            }

            #[test]
            fn releasing_everything_empties(
                lens in proptest::collection::vec(1u32..500, 1..30),
                seed in any::<u64>(),
            ) {
                let mut stack = BoundaryStack::new();
                let mut handles = Vec::new();
                for len in &lens {
                    let end = stack.top() + len;
                    handles.push(stack.push(end));
                }
                // Deterministic shuffle from the seed.
                let n = handles.len();
                for i in 0..n {
                    let j = (seed.wrapping_mul(i as u64 + 1) % n as u64) as usize;
                    handles.swap(i, j);
                }
                for (slot, ticket) in handles {
                    prop_assert_eq!(stack.release(slot, ticket), Release::Released);
                }
                prop_assert!(stack.is_empty());
            }
        }
    }
}
