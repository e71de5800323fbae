//! Fixed-capacity entity pools
//!
//! Slots are addressed by index and never compacted. An empty slot is `None`;
//! insertion takes the first empty slot found.

use crate::error::{PoolKind, SpawnError};

/// A fixed-capacity slot array owning its entities by value
#[derive(Debug, Clone)]
pub struct Pool<T> {
    kind: PoolKind,
    slots: Vec<Option<T>>,
    occupied: usize,
}

impl<T> Pool<T> {
    pub fn new(kind: PoolKind, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            kind,
            slots,
            occupied: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Index of the first empty slot
    pub fn vacancy(&self) -> Result<usize, SpawnError> {
        self.slots
            .iter()
            .position(Option::is_none)
            .ok_or(SpawnError::PoolFull {
                pool: self.kind,
                capacity: self.slots.len(),
            })
    }

    /// Place `value` in the first empty slot, returning its index
    pub fn insert(&mut self, value: T) -> Result<usize, SpawnError> {
        let index = self.vacancy()?;
        self.slots[index] = Some(value);
        self.occupied += 1;
        Ok(index)
    }

    /// Take the value out of a slot, leaving it empty
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let taken = self.slots.get_mut(index)?.take();
        if taken.is_some() {
            self.occupied -= 1;
        }
        taken
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Occupied slots with their indices
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|v| (i, v)))
    }

    /// Remove every occupied slot matching `pred`, yielding the removed values
    /// in slot order
    pub fn extract_if(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        for slot in self.slots.iter_mut() {
            if slot.as_ref().is_some_and(&mut pred) {
                if let Some(value) = slot.take() {
                    removed.push(value);
                }
            }
        }
        self.occupied -= removed.len();
        removed
    }

    /// Empty every slot unconditionally, yielding what was there
    pub fn drain(&mut self) -> Vec<T> {
        let removed: Vec<T> = self.slots.iter_mut().filter_map(Option::take).collect();
        self.occupied = 0;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_until_full() {
        let mut pool = Pool::new(PoolKind::Wasps, 2);
        assert_eq!(pool.insert(1), Ok(0));
        assert_eq!(pool.insert(2), Ok(1));
        assert!(pool.is_full());
        assert_eq!(
            pool.insert(3),
            Err(SpawnError::PoolFull {
                pool: PoolKind::Wasps,
                capacity: 2
            })
        );
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_first_empty_slot_reused() {
        let mut pool = Pool::new(PoolKind::Debris, 4);
        for i in 0..4 {
            pool.insert(i).unwrap();
        }
        assert_eq!(pool.remove(2), Some(2));
        assert_eq!(pool.remove(1), Some(1));
        assert_eq!(pool.remove(1), None);
        assert_eq!(pool.insert(10), Ok(1));
        assert_eq!(pool.insert(11), Ok(2));
        assert_eq!(pool.get(3), Some(&3));
    }

    #[test]
    fn test_extract_if_keeps_slots_in_place() {
        let mut pool = Pool::new(PoolKind::Bullets, 5);
        for i in 0..5 {
            pool.insert(i).unwrap();
        }
        let removed = pool.extract_if(|v| v % 2 == 1);
        assert_eq!(removed, vec![1, 3]);
        assert_eq!(pool.len(), 3);
        let remaining: Vec<_> = pool.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(remaining, vec![(0, 0), (2, 2), (4, 4)]);
    }

    #[test]
    fn test_drain_empties_everything() {
        let mut pool = Pool::new(PoolKind::Asteroids, 3);
        pool.insert('a').unwrap();
        pool.insert('b').unwrap();
        pool.remove(0);
        assert_eq!(pool.drain(), vec!['b']);
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 3);
    }
}
