use std::fmt::Display;

use ticket::{Quantity, StoreId};

use crate::clock::{remaining_wrapped, Minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Cooking,
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Cooking => write!(f, "cooking"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub store: StoreId,
    pub name: String,
    pub address: String,
    pub menu: String,
    pub quantity: Quantity,
    pub placed_at: Minutes,
    // Fixed when the order is taken, never recomputed
    pub arrival: Minutes,
    status: OrderStatus,
}

impl OrderRecord {
    pub fn new(
        store: StoreId,
        name: impl Into<String>,
        address: impl Into<String>,
        menu: impl Into<String>,
        quantity: Quantity,
        placed_at: Minutes,
        arrival: Minutes,
    ) -> Self {
        Self {
            store,
            name: name.into(),
            address: address.into(),
            menu: menu.into(),
            quantity,
            placed_at,
            arrival,
            status: OrderStatus::Cooking,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    pub fn estimated_minutes(&self) -> Minutes {
        remaining_wrapped(self.arrival, self.placed_at)
    }

    /// Marks the order delivered. Returns false if it already was;
    /// there is no way back to cooking.
    pub fn complete_delivery(&mut self) -> bool {
        if self.is_delivered() {
            return false;
        }
        self.status = OrderStatus::Delivered;
        true
    }
}
