//! Bounded-quantity container
//!
//! A Container holds a balance that add/remove keep within `[0, capacity]`.
//! Construction stores the values as given, so a container may start out
//! holding more than its capacity; the first resize reconciles it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity bounded by a capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    capacity: f64,
    balance: f64,
}

impl Container {
    /// Create a container with the given capacity and starting balance
    pub fn new(capacity: f64, initial_balance: f64) -> Self {
        Self {
            capacity,
            balance: initial_balance,
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// How much more fits before the container is full
    pub fn free_space(&self) -> f64 {
        (self.capacity - self.balance).max(0.0)
    }

    /// Store `amount`, discarding whatever does not fit.
    ///
    /// Negative amounts are ignored.
    pub fn add(&mut self, amount: f64) {
        if amount < 0.0 {
            tracing::debug!(amount, "ignoring negative add");
            return;
        }
        let wanted = self.balance + amount;
        if wanted > self.capacity {
            tracing::debug!(wanted, capacity = self.capacity, "add clamped at capacity");
        }
        self.balance = self.capacity.min(wanted);
    }

    /// Take out `amount`, stopping at zero.
    ///
    /// Negative amounts are ignored.
    pub fn remove(&mut self, amount: f64) {
        if amount < 0.0 {
            tracing::debug!(amount, "ignoring negative remove");
            return;
        }
        let left = self.balance - amount;
        if left < 0.0 {
            tracing::debug!(left, "remove clamped at zero");
        }
        self.balance = left.max(0.0);
    }

    /// Change the capacity, never below zero, and drop any balance that no
    /// longer fits.
    pub fn resize(&mut self, new_capacity: f64) {
        self.capacity = new_capacity.max(0.0);
        if self.balance > self.capacity {
            tracing::debug!(
                balance = self.balance,
                capacity = self.capacity,
                "resize cut balance down to capacity"
            );
        }
        self.balance = self.balance.min(self.capacity);
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "balance = {:.1}, free space = {:.1}",
            self.balance,
            self.free_space()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within_bounds(container: &Container) {
        assert!(container.balance() >= 0.0, "balance below zero: {:?}", container);
        assert!(
            container.balance() <= container.capacity(),
            "balance above capacity: {:?}",
            container
        );
    }

    #[test]
    fn test_container_new() {
        let container = Container::new(100.0, 50.0);
        assert_eq!(container.capacity(), 100.0);
        assert_eq!(container.balance(), 50.0);
        assert_eq!(container.free_space(), 50.0);
    }

    #[test]
    fn test_container_new_keeps_overfull_balance() {
        let container = Container::new(10.0, 25.0);
        assert_eq!(container.capacity(), 10.0);
        assert_eq!(container.balance(), 25.0);
        assert_eq!(container.free_space(), 0.0);
    }

    #[test]
    fn test_add() {
        let mut container = Container::new(100.0, 50.0);
        container.add(30.0);
        assert_eq!(container.balance(), 80.0);
    }

    #[test]
    fn test_add_clamps_at_capacity() {
        let mut container = Container::new(100.0, 80.0);
        container.add(50.0);
        assert_eq!(container.balance(), 100.0);
    }

    #[test]
    fn test_add_negative_is_ignored() {
        let mut container = Container::new(100.0, 40.0);
        container.add(-10.0);
        assert_eq!(container.balance(), 40.0);
    }

    #[test]
    fn test_remove() {
        let mut container = Container::new(100.0, 50.0);
        container.remove(20.0);
        assert_eq!(container.balance(), 30.0);
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let mut container = Container::new(100.0, 80.0);
        container.remove(90.0);
        assert_eq!(container.balance(), 0.0);
    }

    #[test]
    fn test_remove_negative_is_ignored() {
        let mut container = Container::new(100.0, 40.0);
        container.remove(-10.0);
        assert_eq!(container.balance(), 40.0);
    }

    #[test]
    fn test_add_then_remove_restores_balance() {
        let mut container = Container::new(100.0, 40.0);
        container.add(25.0);
        container.remove(25.0);
        assert_eq!(container.balance(), 40.0);
    }

    #[test]
    fn test_resize_below_balance() {
        let mut container = Container::new(100.0, 80.0);
        container.resize(50.0);
        assert_eq!(container.capacity(), 50.0);
        assert_eq!(container.balance(), 50.0);
    }

    #[test]
    fn test_resize_above_balance() {
        let mut container = Container::new(100.0, 30.0);
        container.resize(150.0);
        assert_eq!(container.capacity(), 150.0);
        assert_eq!(container.balance(), 30.0);
    }

    #[test]
    fn test_resize_negative_becomes_zero() {
        let mut container = Container::new(100.0, 30.0);
        container.resize(-5.0);
        assert_eq!(container.capacity(), 0.0);
        assert_eq!(container.balance(), 0.0);
    }

    #[test]
    fn test_resize_reconciles_overfull_construction() {
        let mut container = Container::new(10.0, 25.0);
        container.resize(10.0);
        assert_eq!(container.balance(), 10.0);
    }

    #[test]
    fn test_scenario() {
        let mut container = Container::new(100.0, 50.0);
        container.add(30.0);
        assert_eq!(container.balance(), 80.0);
        container.resize(50.0);
        assert_eq!(container.balance(), 50.0);
        assert_eq!(container.capacity(), 50.0);
        container.remove(90.0);
        assert_eq!(container.balance(), 0.0);
    }

    #[test]
    fn test_invariant_holds_over_operation_sequence() {
        let mut container = Container::new(100.0, 0.0);
        let amounts = [
            0.0, 12.5, 250.0, 3.0, 99.9, 0.1, 1000.0, 42.0, 7.25, 60.0, -3.0, 18.0,
        ];

        for (i, amount) in amounts.iter().cycle().take(120).enumerate() {
            match i % 3 {
                0 => container.add(*amount),
                1 => container.remove(*amount),
                _ => container.resize(*amount),
            }
            assert_within_bounds(&container);
        }
    }

    #[test]
    fn test_display() {
        let container = Container::new(100.0, 25.0);
        assert_eq!(container.to_string(), "balance = 25.0, free space = 75.0");
    }
}
