//! Physics Event System
//!
//! Provides collision event reporting (begin/persist/end). Events are
//! collected during `step()` and can be consumed after each frame.
//!
//! Author: Moroya Sakamoto

use crate::math::Vector2;

/// Type of contact event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactEventType {
    /// First frame of contact
    Begin,
    /// Contact persists from previous frame
    Persist,
    /// Contact ended (bodies separated)
    End,
}

/// A contact event between two bodies
#[derive(Clone, Copy, Debug)]
pub struct ContactEvent {
    /// First body index (always the smaller of the pair)
    pub body_a: usize,
    /// Second body index
    pub body_b: usize,
    /// Event type
    pub event_type: ContactEventType,
    /// Contact normal (A to B)
    pub normal: Vector2,
    /// Contact point (world space)
    pub point: Vector2,
    /// Penetration depth
    pub depth: f64,
    /// Relative velocity along normal at contact point
    pub relative_velocity: f64,
}

/// Manages contact events for one simulation step
pub struct EventCollector {
    /// Contact events this frame
    contact_events: Vec<ContactEvent>,
    /// Active contact pairs from previous frame (for begin/persist/end tracking)
    prev_pairs: Vec<(usize, usize)>,
    /// Active contact pairs this frame
    curr_pairs: Vec<(usize, usize)>,
}

impl EventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self {
            contact_events: Vec::new(),
            prev_pairs: Vec::new(),
            curr_pairs: Vec::new(),
        }
    }

    /// Begin a new frame: swap previous/current pair tracking
    pub fn begin_frame(&mut self) {
        self.contact_events.clear();
        core::mem::swap(&mut self.prev_pairs, &mut self.curr_pairs);
        self.curr_pairs.clear();
        // Sort prev list for binary_search lookups
        self.prev_pairs.sort_unstable();
    }

    /// Report a contact between two bodies. A pair reported more than once
    /// in the same frame (from later substeps) keeps only its first event.
    pub fn report_contact(
        &mut self,
        body_a: usize,
        body_b: usize,
        normal: Vector2,
        point: Vector2,
        depth: f64,
        relative_velocity: f64,
    ) {
        let pair = normalize_pair(body_a, body_b);
        if self.curr_pairs.contains(&pair) {
            return;
        }
        self.curr_pairs.push(pair);

        let was_active = self.prev_pairs.binary_search(&pair).is_ok();
        let event_type = if was_active {
            ContactEventType::Persist
        } else {
            ContactEventType::Begin
        };

        self.contact_events.push(ContactEvent {
            body_a: pair.0,
            body_b: pair.1,
            event_type,
            normal,
            point,
            depth,
            relative_velocity,
        });
    }

    /// Finalize frame: generate End events for contacts that stopped
    pub fn end_frame(&mut self) {
        for &pair in &self.prev_pairs {
            if !self.curr_pairs.contains(&pair) {
                self.contact_events.push(ContactEvent {
                    body_a: pair.0,
                    body_b: pair.1,
                    event_type: ContactEventType::End,
                    normal: Vector2::ZERO,
                    point: Vector2::ZERO,
                    depth: 0.0,
                    relative_velocity: 0.0,
                });
            }
        }
    }

    /// Forget a body that left the world; its live pairs simply stop
    /// being reported, without a trailing End event for a dead index.
    pub fn forget_body(&mut self, index: usize) {
        self.prev_pairs.retain(|&(a, b)| a != index && b != index);
        self.curr_pairs.retain(|&(a, b)| a != index && b != index);
    }

    /// Retarget pair bookkeeping after a swap-remove moved the body at
    /// `old_index` into slot `new_index`. The previous-frame list is
    /// re-sorted at the next `begin_frame`.
    pub fn remap_body(&mut self, old_index: usize, new_index: usize) {
        for pairs in [&mut self.prev_pairs, &mut self.curr_pairs] {
            for pair in pairs.iter_mut() {
                let (mut a, mut b) = *pair;
                if a == old_index {
                    a = new_index;
                }
                if b == old_index {
                    b = new_index;
                }
                *pair = normalize_pair(a, b);
            }
        }
    }

    /// Get all contact events for this frame
    #[inline]
    pub fn contact_events(&self) -> &[ContactEvent] {
        &self.contact_events
    }

    /// Drain contact events (consumes them)
    #[inline]
    pub fn drain_contact_events(&mut self) -> Vec<ContactEvent> {
        core::mem::take(&mut self.contact_events)
    }

    /// Check if there are any events this frame
    #[inline]
    pub fn has_events(&self) -> bool {
        !self.contact_events.is_empty()
    }
}

impl Default for EventCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a body pair so that the smaller index is first (deterministic ordering)
#[inline]
fn normalize_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(events: &mut EventCollector, a: usize, b: usize) {
        events.report_contact(a, b, Vector2::UNIT_Y, Vector2::ZERO, 1.0, 0.0);
    }

    #[test]
    fn test_contact_begin() {
        let mut events = EventCollector::new();
        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        assert_eq!(events.contact_events().len(), 1);
        assert_eq!(
            events.contact_events()[0].event_type,
            ContactEventType::Begin
        );
    }

    #[test]
    fn test_contact_persist() {
        let mut events = EventCollector::new();

        // Frame 1: begin
        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        // Frame 2: persist
        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        assert_eq!(
            events.contact_events()[0].event_type,
            ContactEventType::Persist
        );
    }

    #[test]
    fn test_contact_end() {
        let mut events = EventCollector::new();

        // Frame 1: begin
        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        // Frame 2: no contact => end event
        events.begin_frame();
        events.end_frame();

        let end_events: Vec<_> = events
            .contact_events()
            .iter()
            .filter(|e| e.event_type == ContactEventType::End)
            .collect();
        assert_eq!(end_events.len(), 1);
        assert_eq!(end_events[0].body_a, 0);
        assert_eq!(end_events[0].body_b, 1);
    }

    #[test]
    fn test_duplicate_reports_collapse() {
        let mut events = EventCollector::new();
        events.begin_frame();
        report(&mut events, 0, 1);
        report(&mut events, 0, 1);
        report(&mut events, 1, 0);
        events.end_frame();

        assert_eq!(events.contact_events().len(), 1);
    }

    #[test]
    fn test_pair_normalization() {
        let mut events = EventCollector::new();
        events.begin_frame();
        report(&mut events, 3, 1);
        events.end_frame();

        // Normalized to (1, 3)
        assert_eq!(events.contact_events()[0].body_a, 1);
        assert_eq!(events.contact_events()[0].body_b, 3);
    }

    #[test]
    fn test_mixed_frame_lifecycle() {
        let mut events = EventCollector::new();

        // Frame 1: pairs (0,1) and (2,3) begin
        events.begin_frame();
        report(&mut events, 0, 1);
        report(&mut events, 2, 3);
        events.end_frame();

        // Frame 2: (0,1) persists, (2,3) gone, (4,5) begins
        events.begin_frame();
        report(&mut events, 0, 1);
        report(&mut events, 4, 5);
        events.end_frame();

        let kinds: Vec<_> = events
            .contact_events()
            .iter()
            .map(|e| (e.body_a, e.body_b, e.event_type))
            .collect();
        assert!(kinds.contains(&(0, 1, ContactEventType::Persist)));
        assert!(kinds.contains(&(4, 5, ContactEventType::Begin)));
        assert!(kinds.contains(&(2, 3, ContactEventType::End)));
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_forget_body_suppresses_end_event() {
        let mut events = EventCollector::new();

        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        // body 1 removed between frames
        events.begin_frame();
        events.forget_body(1);
        events.end_frame();

        assert!(events.contact_events().is_empty());
    }

    #[test]
    fn test_remap_keeps_pair_identity_across_swap() {
        let mut events = EventCollector::new();

        events.begin_frame();
        report(&mut events, 0, 2);
        events.end_frame();

        // body 1 removed; body 2 swapped into slot 1
        events.forget_body(1);
        events.remap_body(2, 1);

        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        assert_eq!(events.contact_events().len(), 1);
        assert_eq!(
            events.contact_events()[0].event_type,
            ContactEventType::Persist
        );
    }

    #[test]
    fn test_drain_empties_collector() {
        let mut events = EventCollector::new();
        events.begin_frame();
        report(&mut events, 0, 1);
        events.end_frame();

        let drained = events.drain_contact_events();
        assert_eq!(drained.len(), 1);
        assert!(!events.has_events());
    }
}
