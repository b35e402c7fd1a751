use tracing::debug;

use crate::order::OrderRecord;

/// Every order taken during this session, oldest first.
/// Nothing is ever removed or merged.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    orders: Vec<OrderRecord>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: OrderRecord) {
        debug!(
            "Registering order #{} for {} at {}",
            self.orders.len() + 1,
            record.name,
            record.address
        );
        self.orders.push(record);
    }

    // Same name and address may show up more than once.
    // The oldest one wins.
    pub fn find_by_key(&mut self, name: &str, address: &str) -> Option<&mut OrderRecord> {
        self.orders
            .iter_mut()
            .find(|o| o.name == name && o.address == address)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord> {
        self.orders.iter()
    }
}
