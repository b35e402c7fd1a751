use crate::{
    clock::{add_wrapped, Minutes},
    config::Config,
    error::OrderError,
};

// Table driven: the service area and the menu are small and fixed,
// so an order costs its area's minutes plus its menu's minutes.
pub struct DeliveryEstimator<'a> {
    config: &'a Config,
}

impl<'a> DeliveryEstimator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn estimate_minutes(&self, address: &str, menu: &str) -> Result<Minutes, OrderError> {
        let area = self
            .config
            .area_minutes(address)
            .ok_or_else(|| OrderError::UnknownAddress(address.into()))?;
        let cooking = self
            .config
            .menu_minutes(menu)
            .ok_or_else(|| OrderError::UnknownMenuItem(menu.into()))?;
        Ok(area + cooking)
    }

    pub fn estimate_arrival(
        &self,
        placed_at: Minutes,
        address: &str,
        menu: &str,
    ) -> Result<Minutes, OrderError> {
        Ok(add_wrapped(placed_at, self.estimate_minutes(address, menu)?))
    }
}
