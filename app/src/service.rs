use std::{fmt::Display, sync::Arc};

use ticket::{Command, Customer, OrderLine, Param, StoreId, Ticket};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::{
    clock::{Clock, ClockTime, Minutes},
    config::{Config, StoreProfile},
    db::Db,
    delivery::DeliveryEstimator,
    error::OrderError,
    order::OrderRecord,
    registry::OrderRegistry,
    status::{resolve, StatusReport},
};

pub const HELP: &str = "\
Commands:
  stores                                                    list stores and their hours
  menu for store <id>                                       show a store's menu
  areas                                                     list delivery areas
  order for store <id>: <name>, <address>, <menu> * <qty>   place an order
  check: <name>, <address>                                  how long until it arrives
  quit";

/// Takes orders and answers status queries. Owns every order of the session.
pub struct OrderDesk<C> {
    config: Arc<Config>,
    db: Arc<Db>,
    registry: Mutex<OrderRegistry>,
    clock: C,
}

#[derive(Debug)]
pub struct Receipt {
    pub record: OrderRecord,
    pub store_name: String,
    pub minutes: Minutes,
}

impl Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = &self.record;
        writeln!(
            f,
            "{} got your order: name({}), address({}), menu({}), quantity({})",
            self.store_name, r.name, r.address, r.menu, r.quantity
        )?;
        write!(
            f,
            "Estimated arrival: {} (in {} minutes)",
            ClockTime(r.arrival),
            self.minutes
        )
    }
}

#[derive(Debug)]
pub struct StatusCheck {
    pub record: OrderRecord,
    pub report: StatusReport,
}

impl Display for StatusCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.report {
            StatusReport::InProgress { status, remaining } => {
                writeln!(f, "Status: {}", status)?;
                write!(f, "About {} minutes left until delivery.", remaining)
            }
            StatusReport::Delivered { .. } => {
                let r = &self.record;
                writeln!(f, "========================")?;
                writeln!(f, "Delivered!")?;
                writeln!(f, "Name: {}", r.name)?;
                writeln!(f, "Menu: {}", r.menu)?;
                writeln!(f, "Quantity: {}", r.quantity)?;
                write!(f, "========================")
            }
        }
    }
}

pub struct StoreBoard<'a> {
    stores: Vec<&'a StoreProfile>,
    now: Minutes,
}

impl<'a> Display for StoreBoard<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.stores.iter().peekable();
        while let Some(store) = iter.next() {
            let state = if store.hours.is_open(self.now) {
                "open"
            } else {
                "closed"
            };
            write!(f, "{}. {} ({}) {}", store.id, store.name, store.hours, state)?;
            if iter.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub struct MenuBoard<'a> {
    store: &'a StoreProfile,
    config: &'a Config,
}

impl<'a> Display for MenuBoard<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}> {}", self.store.name, self.store.hours)?;
        if self.store.menus.is_empty() {
            return write!(f, "\nNo menu board yet.");
        }
        for menu in self.store.menus.iter() {
            // Config validation guarantees the menu is in the table
            let minutes = self.config.menu_minutes(menu).unwrap_or_default();
            write!(f, "\n  {} ({} min)", menu, minutes)?;
        }
        Ok(())
    }
}

impl<C> OrderDesk<C>
where
    C: Clock,
{
    pub fn new(config: Arc<Config>, db: Arc<Db>, clock: C) -> Self {
        Self {
            config,
            db,
            registry: Mutex::new(OrderRegistry::new()),
            clock,
        }
    }

    /// Validates everything first, in order: store, hours, address, menu,
    /// quantity. Only an order that passed every check and made it into the
    /// audit log is registered.
    #[instrument(name = "Placing order", skip(self))]
    pub async fn place_order(
        &self,
        store_id: StoreId,
        line: &OrderLine,
    ) -> Result<Receipt, OrderError> {
        let now = self.clock.now();
        let store = self
            .config
            .store(store_id)
            .ok_or(OrderError::UnknownStore(store_id))?;
        if !store.hours.is_open(now) {
            return Err(OrderError::StoreClosed {
                store: store.name.clone(),
                opens_at: ClockTime(store.hours.open),
            });
        }
        let customer = &line.customer;
        let estimator = DeliveryEstimator::new(&self.config);
        let minutes = estimator.estimate_minutes(&customer.address, &line.menu)?;
        let arrival = estimator.estimate_arrival(now, &customer.address, &line.menu)?;
        if line.quantity <= 0 {
            return Err(OrderError::InvalidQuantity(line.quantity));
        }
        let record = OrderRecord::new(
            store_id,
            customer.name.as_str(),
            customer.address.as_str(),
            line.menu.as_str(),
            line.quantity,
            now,
            arrival,
        );

        let mut registry = self.registry.lock().await;
        self.db.insert_order(&record).map_err(OrderError::Storage)?;
        registry.insert(record.clone());
        info!(
            "Order taken. {} minutes, arriving at {}.",
            minutes,
            ClockTime(arrival)
        );
        Ok(Receipt {
            record,
            store_name: store.name.clone(),
            minutes,
        })
    }

    /// Looks up the oldest order of `customer` and reports on it. The lookup
    /// and a possible switch to delivered happen under one lock.
    #[instrument(name = "Checking order", skip(self))]
    pub async fn check_order(&self, customer: &Customer) -> Result<StatusCheck, OrderError> {
        let now = self.clock.now();
        let mut registry = self.registry.lock().await;
        let record = registry
            .find_by_key(&customer.name, &customer.address)
            .ok_or_else(|| OrderError::OrderNotFound {
                name: customer.name.clone(),
                address: customer.address.clone(),
            })?;
        let report = resolve(record, now);
        if let StatusReport::Delivered {
            newly_delivered: true,
        } = report
        {
            info!("Order marked as delivered.");
        }
        Ok(StatusCheck {
            record: record.clone(),
            report,
        })
    }

    pub fn stores(&self) -> StoreBoard<'_> {
        let mut stores: Vec<&StoreProfile> = self.config.stores.iter().collect();
        stores.sort_by_key(|s| s.id);
        StoreBoard {
            stores,
            now: self.clock.now(),
        }
    }

    pub fn menu(&self, store_id: StoreId) -> Result<MenuBoard<'_>, OrderError> {
        let store = self
            .config
            .store(store_id)
            .ok_or(OrderError::UnknownStore(store_id))?;
        Ok(MenuBoard {
            store,
            config: &self.config,
        })
    }

    pub fn areas(&self) -> String {
        format!("We deliver to: {}", self.config.area_names().join(", "))
    }

    pub async fn order_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Runs one console command and renders the answer.
    pub async fn process_ticket(&self, ticket: Ticket) -> String {
        debug!("Processing `{}`", ticket.to_ticket_string());
        use Command::*;
        let result = match (ticket.command, ticket.store, ticket.param) {
            (Order, Some(store), Some(Param::Order(line))) => self
                .place_order(store, &line)
                .await
                .map(|r| r.to_string()),
            (Check, None, Some(Param::Customer(customer))) => self
                .check_order(&customer)
                .await
                .map(|c| c.to_string()),
            (Menu, Some(store), None) => self.menu(store).map(|m| m.to_string()),
            (Stores, _, _) => Ok(self.stores().to_string()),
            (Areas, _, _) => Ok(self.areas()),
            (Help, _, _) => Ok(HELP.to_string()),
            (Quit, _, _) => Ok("Bye.".to_string()),
            // The codec only lets well formed tickets through
            (command, _, _) => Ok(format!("Can't do {} like that. Try `help`.", command)),
        };
        match result {
            Ok(reply) => reply,
            Err(e @ OrderError::Storage(_)) => {
                error!("Something went wrong with error {}", e);
                "Something went wrong inside. Please try again.".to_string()
            }
            Err(e @ OrderError::UnknownAddress(_)) => {
                info!("Rejected: {}", e);
                format!("{}\n{}", e, self.areas())
            }
            Err(e) => {
                info!("Rejected: {}", e);
                e.to_string()
            }
        }
    }
}
