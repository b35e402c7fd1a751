use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::{rusqlite::params, SqliteConnectionManager};

use anyhow::Result;
use ticket::{Customer, OrderLine, StoreId, Ticket};

use crate::{clock::ClockTime, order::OrderRecord};

/// Append-only audit log of accepted orders.
/// Nothing in the app reads it back to answer a status query.
pub struct Db {
    pub pool: Pool<SqliteConnectionManager>,
}

#[derive(Debug)]
pub struct OrderRow {
    pub id: u64,
    pub store: StoreId,
    pub line: String,
    pub ticket: String,
    pub timestamp: i64,
}

pub fn order_line(record: &OrderRecord) -> String {
    format!(
        "placed {}, arrival {}, customer {}, address {}, menu {}, quantity {}",
        ClockTime(record.placed_at),
        ClockTime(record.arrival),
        record.name,
        record.address,
        record.menu,
        record.quantity
    )
}

fn order_ticket(record: &OrderRecord) -> Ticket {
    Ticket::order(
        record.store,
        OrderLine {
            customer: Customer::new(record.name.as_str(), record.address.as_str()),
            menu: record.menu.clone(),
            quantity: record.quantity,
        },
    )
}

impl Db {
    pub fn init(filename: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(filename);
        let s = Self {
            pool: Pool::new(manager)?,
        };
        s.init_table()?;
        Ok(s)
    }

    /// Opens the log at `filename`; `:memory:` gives a throwaway one.
    pub fn open(filename: &str) -> Result<Self> {
        if filename == ":memory:" {
            Self::in_memory()
        } else {
            Self::init(filename)
        }
    }

    // Every pooled connection to `:memory:` would get its own database,
    // so keep exactly one.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let s = Self {
            pool: Pool::builder().max_size(1).build(manager)?,
        };
        s.init_table()?;
        Ok(s)
    }

    fn init_table(&self) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS orders (
                    id INTEGER PRIMARY KEY,
                    store INTEGER NOT NULL,
                    placed_at STRING NOT NULL,
                    arrival STRING NOT NULL,
                    name STRING NOT NULL,
                    address STRING NOT NULL,
                    menu STRING NOT NULL,
                    quantity INTEGER NOT NULL,
                    line STRING NOT NULL,
                    ticket STRING NOT NULL,
                    timestamp INTEGER NOT NULL
                );",
            params![],
        )?;
        Ok(())
    }

    pub fn insert_order(&self, record: &OrderRecord) -> Result<()> {
        let conn = self.pool.get()?;
        let timestamp = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO orders
            (store, placed_at, arrival, name, address, menu, quantity, line, ticket, timestamp)
            VALUES
            (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);
            ",
            params![
                record.store,
                ClockTime(record.placed_at).to_string(),
                ClockTime(record.arrival).to_string(),
                record.name,
                record.address,
                record.menu,
                record.quantity,
                order_line(record),
                order_ticket(record).to_ticket_string(),
                timestamp
            ],
        )?;
        Ok(())
    }

    pub fn get_orders(&self, store: StoreId) -> Result<Vec<OrderRow>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "
            SELECT id, store, line, ticket, timestamp
            FROM orders
            WHERE store = ?1
            ORDER BY id;
            ",
        )?;
        let rows = stmt
            .query_map(params![store], |row| {
                Ok(OrderRow {
                    id: row.get(0)?,
                    store: row.get(1)?,
                    line: row.get(2)?,
                    ticket: row.get(3)?,
                    timestamp: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<OrderRow>, _>>();
        Ok(rows?)
    }
}
