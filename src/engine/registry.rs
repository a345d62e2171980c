//! Ordered collection of course components with session-unique ids.

use crate::engine::types::Component;

/// Holds the components in display order and hands out monotonically
/// increasing ids. An id is never reused within a session, including across
/// resets.
#[derive(Debug, Default)]
pub struct Registry {
    components: Vec<Component>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blank component and returns its id.
    pub fn add(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.components.push(Component::blank(id));
        id
    }

    /// Removes the component with `id`, returning whether anything was
    /// removed. Unknown ids are a no-op, not an error.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.id != id);
        self.components.len() != before
    }

    /// Mutable access to one component, for field edits.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Combined weight of every component plus the final exam, feeding the
    /// live indicator. Validation recomputes this independently.
    pub fn total_weight(&self, final_weight: f64) -> f64 {
        self.components.iter().map(|c| c.weight).sum::<f64>() + final_weight
    }

    /// Drops all components. The id counter keeps running so ids stay
    /// unique across resets.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
