//! Current/previous pairs and the edge queries built on top of them.
//!
//! Every signal that needs "did this change since last frame" goes through
//! [`DoubleBuffered`].  Writers touch `current_mut()` whenever an event
//! arrives; the frame loop calls [`DoubleBuffered::advance`] once per
//! completed frame.

use std::collections::HashMap;
use std::hash::Hash;

/// A value together with its copy from the end of the previous frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoubleBuffered<T> {
    current: T,
    previous: T,
}

impl<T: Clone> DoubleBuffered<T> {
    pub fn new(initial: T) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
        }
    }

    #[inline]
    pub fn current(&self) -> &T {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    #[inline]
    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Copy the current value into the previous slot.
    pub fn advance(&mut self) {
        self.previous.clone_from(&self.current);
    }
}

/// A collection of on/off signals addressable by `K`.
///
/// `state` returns `None` for ids the collection does not track; all edge
/// queries treat those as "not down, not up, no edge".
pub trait ButtonSet<K: ?Sized> {
    fn state(&self, key: &K) -> Option<bool>;
}

impl<K, Q> ButtonSet<Q> for HashMap<K, bool>
where
    K: Eq + Hash + std::borrow::Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    fn state(&self, key: &Q) -> Option<bool> {
        self.get(key).copied()
    }
}

impl<const N: usize> ButtonSet<usize> for [bool; N] {
    fn state(&self, key: &usize) -> Option<bool> {
        self.get(*key).copied()
    }
}

impl<T> DoubleBuffered<T> {
    /// Currently held.
    pub fn is_down<K: ?Sized>(&self, key: &K) -> bool
    where
        T: ButtonSet<K>,
    {
        self.current.state(key) == Some(true)
    }

    /// Tracked and currently released.
    pub fn is_up<K: ?Sized>(&self, key: &K) -> bool
    where
        T: ButtonSet<K>,
    {
        self.current.state(key) == Some(false)
    }

    /// Went from up (or never seen) to down since the previous frame.
    pub fn is_pressed<K: ?Sized>(&self, key: &K) -> bool
    where
        T: ButtonSet<K>,
    {
        self.current.state(key) == Some(true) && self.previous.state(key) != Some(true)
    }

    /// Went from down to up since the previous frame.
    pub fn is_released<K: ?Sized>(&self, key: &K) -> bool
    where
        T: ButtonSet<K>,
    {
        self.current.state(key) == Some(false) && self.previous.state(key) == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // one state per frame, advance() between frames
    fn run_sequence(states: &[bool]) -> Vec<(bool, bool)> {
        let mut buf = DoubleBuffered::new([false; 1]);
        let mut edges = Vec::new();
        for &down in states {
            buf.current_mut()[0] = down;
            edges.push((buf.is_pressed(&0usize), buf.is_released(&0usize)));
            buf.advance();
        }
        edges
    }

    #[test]
    fn edges_fire_once_per_transition() {
        let edges = run_sequence(&[false, false, true, true, false]);
        assert_eq!(
            edges,
            vec![
                (false, false),
                (false, false),
                (true, false),
                (false, false),
                (false, true),
            ]
        );
    }

    #[test]
    fn untracked_keys_are_neither_up_nor_down() {
        let buf: DoubleBuffered<HashMap<String, bool>> = DoubleBuffered::default();
        assert!(!buf.is_down("Space"));
        assert!(!buf.is_up("Space"));
        assert!(!buf.is_pressed("Space"));
        assert!(!buf.is_released("Space"));

        let arr = DoubleBuffered::new([false; 3]);
        assert!(!arr.is_pressed(&99usize));
        assert!(!arr.is_released(&99usize));
        assert!(arr.is_up(&0usize));
    }

    #[test]
    fn lazily_inserted_key_counts_as_pressed() {
        let mut buf: DoubleBuffered<HashMap<String, bool>> = DoubleBuffered::default();
        buf.current_mut().insert("KeyA".to_string(), true);
        assert!(buf.is_pressed("KeyA"));
        buf.advance();
        assert!(!buf.is_pressed("KeyA"));
        assert!(buf.is_down("KeyA"));
    }
}
