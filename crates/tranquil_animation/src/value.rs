//! Shared animated scalar
//!
//! An [`AnimatedValue`] is what a screen binds to (opacity, scale, progress).
//! Clones share the same cell, so the manager can drive a value that the UI
//! keeps reading from its own handle.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct AnimatedValue {
    cell: Rc<Cell<f32>>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            cell: Rc::new(Cell::new(initial)),
        }
    }

    pub fn get(&self) -> f32 {
        self.cell.get()
    }

    pub fn set(&self, value: f32) {
        self.cell.set(value);
    }

    /// Whether two handles drive the same underlying value
    pub fn same_as(&self, other: &AnimatedValue) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnimatedValue").field(&self.get()).finish()
    }
}
