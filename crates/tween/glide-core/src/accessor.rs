//! Typed getter/setter pair decoupled from the caller's storage.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Reads and writes one animated value.
///
/// The engine cannot observe the lifetime of whatever the closures touch; a
/// tween whose storage has gone away must be killed by the caller.
pub struct Accessor<T> {
    getter: Box<dyn FnMut() -> T>,
    setter: Box<dyn FnMut(T)>,
}

impl<T: 'static> Accessor<T> {
    pub fn new(getter: impl FnMut() -> T + 'static, setter: impl FnMut(T) + 'static) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }

    /// Shared `RefCell` storage; the value is cloned on read.
    pub fn shared(cell: &Rc<RefCell<T>>) -> Self
    where
        T: Clone,
    {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        Self::new(move || read.borrow().clone(), move |v| *write.borrow_mut() = v)
    }

    /// Map this accessor onto another representation, e.g. a single field.
    pub fn map<U: 'static>(
        self,
        mut into: impl FnMut(T) -> U + 'static,
        mut from: impl FnMut(U) -> T + 'static,
    ) -> Accessor<U> {
        let Accessor {
            mut getter,
            mut setter,
        } = self;
        Accessor::new(move || into(getter()), move |u| setter(from(u)))
    }

    #[inline]
    pub fn get(&mut self) -> T {
        (self.getter)()
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        (self.setter)(value)
    }
}

impl<T: Copy + 'static> Accessor<T> {
    /// Shared `Cell` storage.
    pub fn cell(cell: &Rc<Cell<T>>) -> Self {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        Self::new(move || read.get(), move |v| write.set(v))
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_accessor_reads_and_writes() {
        let cell = Rc::new(Cell::new(1.5f32));
        let mut acc = Accessor::cell(&cell);
        assert_eq!(acc.get(), 1.5);
        acc.set(4.0);
        assert_eq!(cell.get(), 4.0);
    }

    #[test]
    fn mapped_accessor_targets_one_field() {
        let pos = Rc::new(RefCell::new([1.0f32, 2.0, 3.0]));
        let y = Rc::clone(&pos);
        let mut acc = Accessor::new(move || y.borrow()[1], {
            let pos = Rc::clone(&pos);
            move |v| pos.borrow_mut()[1] = v
        });
        acc.set(9.0);
        assert_eq!(*pos.borrow(), [1.0, 9.0, 3.0]);
        assert_eq!(acc.get(), 9.0);

        let mut doubled = Accessor::shared(&pos).map(|v| v[0] * 2.0, |d: f32| [d / 2.0, 0.0, 0.0]);
        assert_eq!(doubled.get(), 2.0);
        doubled.set(8.0);
        assert_eq!(*pos.borrow(), [4.0, 0.0, 0.0]);
    }
}
