use thiserror::Error;
use ticket::{Quantity, StoreId};

use crate::clock::ClockTime;

/// Why an order or a status query was turned down.
/// None of these end the session; the caller may simply try again.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("We don't have store {0}.")]
    UnknownStore(StoreId),

    #[error("{store} is getting ready. Please order after {opens_at}.")]
    StoreClosed { store: String, opens_at: ClockTime },

    #[error("We don't deliver to {0}.")]
    UnknownAddress(String),

    #[error("We don't serve {0}.")]
    UnknownMenuItem(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(Quantity),

    #[error("No order found for {name} at {address}.")]
    OrderNotFound { name: String, address: String },

    #[error("Couldn't record the order: {0}")]
    Storage(#[source] anyhow::Error),
}
