//! Two-way binding to a value owned outside the widget.
//!
//! A widget never owns the value it edits. The owner hands it a getter and a
//! setter; the widget reads through the getter when it needs the current value
//! and writes through the setter when it commits.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Get/set accessor pair over an externally owned value.
///
/// Bindings are cheap to clone; clones share the same accessors. They are
/// `Rc`-based because widgets are driven from a single UI thread.
pub struct Binding<T> {
    getter: Rc<dyn Fn() -> T>,
    setter: Rc<dyn Fn(T)>,
}

impl<T> Binding<T> {
    /// Builds a binding from an explicit accessor pair.
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl Fn(T) + 'static) -> Self {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(setter),
        }
    }

    /// Reads the current value from the owner.
    pub fn get(&self) -> T {
        (self.getter)()
    }

    /// Writes a new value back to the owner.
    pub fn set(&self, value: T) {
        (self.setter)(value)
    }
}

impl<T: Clone + 'static> Binding<T> {
    /// Binds to a shared cell the caller keeps a handle to.
    pub fn from_cell(cell: &Rc<RefCell<T>>) -> Self {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        Self::new(move || read.borrow().clone(), move |value| *write.borrow_mut() = value)
    }

    /// Creates a fresh cell holding `initial` and returns the binding together
    /// with the owner's handle.
    pub fn shared(initial: T) -> (Self, Rc<RefCell<T>>) {
        let cell = Rc::new(RefCell::new(initial));
        (Self::from_cell(&cell), cell)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("value", &self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_visible_to_the_owner() {
        let (binding, cell) = Binding::shared(5_i64);
        binding.set(42);
        assert_eq!(*cell.borrow(), 42);
    }

    #[test]
    fn owner_writes_are_visible_through_the_binding() {
        let (binding, cell) = Binding::shared(String::from("draft"));
        *cell.borrow_mut() = "owner".to_string();
        assert_eq!(binding.get(), "owner");
    }

    #[test]
    fn clones_share_accessors() {
        let (binding, cell) = Binding::shared(1_i64);
        let copy = binding.clone();
        copy.set(7);
        assert_eq!(binding.get(), 7);
        assert_eq!(*cell.borrow(), 7);
    }

    #[test]
    fn custom_accessors_can_transform_values() {
        let cents = Rc::new(RefCell::new(1_250_i64));
        let read = Rc::clone(&cents);
        let write = Rc::clone(&cents);
        let doubled = Binding::new(move || *read.borrow() * 2, move |value: i64| *write.borrow_mut() = value / 2);
        assert_eq!(doubled.get(), 2_500);
        doubled.set(100);
        assert_eq!(*cents.borrow(), 50);
    }
}
