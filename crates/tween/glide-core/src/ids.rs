//! Identifiers, target tags and the handle allocator.

use serde::{Deserialize, Serialize};

/// Opaque handle for a playable registered with a [`crate::TweenEngine`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TweenId(pub u32);

impl std::fmt::Display for TweenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Opaque grouping tag used to filter control operations.
///
/// The engine only compares tags; it never dereferences them. Build one from an
/// arbitrary number, or from the address of the object being animated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetRef(pub u64);

impl TargetRef {
    pub const fn new(tag: u64) -> Self {
        Self(tag)
    }

    /// Tag derived from the address of `object`. Two tags built from the same
    /// live object compare equal.
    pub fn of<T: ?Sized>(object: &T) -> Self {
        Self(object as *const T as *const () as usize as u64)
    }
}

impl From<u64> for TargetRef {
    fn from(tag: u64) -> Self {
        Self(tag)
    }
}

/// Monotonic allocator for TweenId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_tween: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_tween(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween = self.next_tween.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_tween(), TweenId(0));
        assert_eq!(alloc.alloc_tween(), TweenId(1));
    }

    #[test]
    fn target_from_address_is_stable() {
        let a = [0.0f32; 3];
        let b = [0.0f32; 3];
        assert_eq!(TargetRef::of(&a), TargetRef::of(&a));
        assert_ne!(TargetRef::of(&a), TargetRef::of(&b));
        assert_eq!(TargetRef::from(7), TargetRef::new(7));
    }
}
