//! Falling-object registry
//!
//! Owns the set of active falling objects. Iteration supports safe in-place
//! removal: each object's visitor returns a verdict, and removal never
//! corrupts traversal of the remaining set. Insertion order is preserved
//! for deterministic evaluation.

use glam::Vec2;

use super::state::FallingObject;

/// Visitor verdict for one object during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Remove,
    /// Remove this object and stop evaluating the rest (fatal collision)
    RemoveAndHalt,
}

/// Registry of active falling objects
#[derive(Debug, Default)]
pub struct Registry {
    objects: Vec<FallingObject>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new object at the given position, returning its id
    pub fn insert(&mut self, pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(FallingObject { id, pos });
        id
    }

    /// Visit every object in insertion order. Returns true if traversal
    /// was halted by a `RemoveAndHalt` verdict.
    pub fn visit_mut<F>(&mut self, mut visit: F) -> bool
    where
        F: FnMut(&mut FallingObject) -> Visit,
    {
        let mut i = 0;
        while i < self.objects.len() {
            match visit(&mut self.objects[i]) {
                Visit::Keep => i += 1,
                Visit::Remove => {
                    self.objects.remove(i);
                }
                Visit::RemoveAndHalt => {
                    self.objects.remove(i);
                    return true;
                }
            }
        }
        false
    }

    /// Destroy all objects (restart)
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingObject> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(xs: &[f32]) -> Registry {
        let mut registry = Registry::new();
        for &x in xs {
            registry.insert(Vec2::new(x, 0.0));
        }
        registry
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let mut registry = Registry::new();
        let a = registry.insert(Vec2::ZERO);
        let b = registry.insert(Vec2::ZERO);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_removal_during_iteration() {
        let mut registry = registry_with(&[1.0, 2.0, 3.0, 4.0]);

        // Remove the middle two while iterating
        let halted = registry.visit_mut(|obj| {
            if obj.pos.x == 2.0 || obj.pos.x == 3.0 {
                Visit::Remove
            } else {
                Visit::Keep
            }
        });

        assert!(!halted);
        let xs: Vec<f32> = registry.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![1.0, 4.0]);
    }

    #[test]
    fn test_halt_stops_traversal() {
        let mut registry = registry_with(&[1.0, 2.0, 3.0]);

        let mut visited = 0;
        let halted = registry.visit_mut(|obj| {
            visited += 1;
            if obj.pos.x == 2.0 {
                Visit::RemoveAndHalt
            } else {
                Visit::Keep
            }
        });

        assert!(halted);
        assert_eq!(visited, 2);
        let xs: Vec<f32> = registry.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn test_clear() {
        let mut registry = registry_with(&[1.0, 2.0]);
        registry.clear();
        assert!(registry.is_empty());
    }
}
