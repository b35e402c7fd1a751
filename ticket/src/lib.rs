use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail, Result};

pub type StoreId = u32;
pub type Quantity = i64;

trait MySplit<'a> {
    fn my_split<'b>(&'a self, p: &'b str) -> (Option<&'a str>, Option<&'a str>);
}

impl<'a> MySplit<'a> for &'a str {
    fn my_split<'b>(&'a self, p: &'b str) -> (Option<&'a str>, Option<&'a str>) {
        let mut iter = self.splitn(2, p);
        (iter.next(), iter.next())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Order,
    Check,
    Menu,
    Stores,
    Areas,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Command::*;
        match s.trim() {
            "order" => Ok(Order),
            "check" => Ok(Check),
            "menu" => Ok(Menu),
            "stores" => Ok(Stores),
            "areas" => Ok(Areas),
            "help" => Ok(Help),
            "quit" => Ok(Quit),
            c => Err(anyhow!("Unknown command: {}", c)),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Command::*;
        let s = match self {
            Order => "order",
            Check => "check",
            Menu => "menu",
            Stores => "stores",
            Areas => "areas",
            Help => "help",
            Quit => "quit",
        };
        write!(f, "{}", s)
    }
}

/// Who an order belongs to. Orders are looked up by this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub address: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub customer: Customer,
    pub menu: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Order(OrderLine),
    Customer(Customer),
}

fn get_menu_quant(s: &str) -> Result<(String, Quantity)> {
    // Input: menu * quant
    let (menu, quant) = s
        .split_once('*')
        .ok_or(anyhow!("Menu must come with a quantity: menu * quantity"))?;
    let menu = menu.trim();
    if menu.is_empty() {
        bail!("Menu name must not be empty.");
    }
    let quant = quant.trim();
    let quant = quant
        .parse()
        .map_err(|_| anyhow!("Invalid quantity: {}", quant))?;
    Ok((menu.into(), quant))
}

impl FromStr for Param {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            bail!("Parameter must not be an empty string.");
        }
        // Input: name, address
        // Input: name, address, menu * quant
        let fields: Vec<&str> = s.split(',').map(|e| e.trim()).collect();
        if fields.iter().any(|f| f.is_empty()) {
            bail!("Parameters must not contain empty fields.");
        }
        match fields.as_slice() {
            [name, address] => Ok(Param::Customer(Customer::new(*name, *address))),
            [name, address, menu_quant] => {
                let (menu, quantity) = get_menu_quant(menu_quant)?;
                Ok(Param::Order(OrderLine {
                    customer: Customer::new(*name, *address),
                    menu,
                    quantity,
                }))
            }
            _ => bail!("Expecting `name, address` or `name, address, menu * quantity`."),
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Order(o) => write!(
                f,
                "{}, {}, {} * {}",
                o.customer.name, o.customer.address, o.menu, o.quantity
            ),
            Param::Customer(c) => write!(f, "{}, {}", c.name, c.address),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub command: Command,
    pub store: Option<StoreId>,
    pub param: Option<Param>,
}

// Parse left side of ':' which can contain command or store id
fn parse_left(s: Option<&str>) -> Result<(Command, Option<StoreId>)> {
    // Input: command for store id
    let s = s.ok_or(anyhow!("Left side must not be empty."))?;
    let s = s.trim();
    let (command, store) = s.my_split("for store");
    let command = command.ok_or(anyhow!("empty command"))?.trim().parse()?;
    let store = store.map(|t| t.trim().parse()).transpose()?;
    Ok((command, store))
}

// Parse right side of ':' which can only be parameters
fn parse_right(s: Option<&str>) -> Result<Option<Param>> {
    s.map(|inner| inner.parse()).transpose()
}

impl Ticket {
    pub fn order(store: StoreId, line: OrderLine) -> Self {
        Self {
            command: Command::Order,
            store: Some(store),
            param: Some(Param::Order(line)),
        }
    }

    pub fn check(customer: Customer) -> Self {
        Self {
            command: Command::Check,
            store: None,
            param: Some(Param::Customer(customer)),
        }
    }

    fn integrity_check(&self) -> Result<()> {
        use Command::*;
        match self.command {
            Order => {
                self.store.ok_or(anyhow!("order command needs store id"))?;
                match &self.param {
                    Some(Param::Order(_)) => (),
                    _ => bail!("order command needs `name, address, menu * quantity`"),
                }
            }
            Check => {
                if self.store.is_some() {
                    bail!("check command doesn't take a store id");
                }
                match &self.param {
                    Some(Param::Customer(_)) => (),
                    _ => bail!("check command needs `name, address`"),
                }
            }
            Menu => {
                self.store.ok_or(anyhow!("menu command needs store id"))?;
                if self.param.is_some() {
                    bail!("menu command takes no parameters");
                }
            }
            Stores | Areas | Help | Quit => {
                if self.store.is_some() || self.param.is_some() {
                    bail!("{} needs nothing. Just only {}.", self.command, self.command);
                }
            }
        };
        Ok(())
    }

    pub fn from_ticket_string(input: &str) -> Result<Self> {
        // Input: command for store id: params
        let input = input.trim();
        let (left, right) = input.my_split(":");
        let (command, store) = parse_left(left)?;
        let param = parse_right(right)?;
        let ticket = Self {
            command,
            store,
            param,
        };
        ticket.integrity_check()?;
        Ok(ticket)
    }

    pub fn to_ticket_string(&self) -> String {
        let mut s = self.command.to_string();
        if let Some(store) = self.store {
            s.push_str(&format!(" for store {}", store));
        }
        if let Some(param) = &self.param {
            s.push_str(&format!(": {}", param));
        }
        s
    }
}

impl From<Ticket> for String {
    fn from(ticket: Ticket) -> Self {
        ticket.to_ticket_string()
    }
}

impl FromStr for Ticket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticket::from_ticket_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Command::*;
    use super::*;

    const ORDER: &str = "order for store 4: 홍길동, 봉명1동, 족발 * 2";
    const ORDER2: &str = "  order  for store 4  :홍길동,봉명1동 ,족발* 2";
    const CHECK: &str = "check: 홍길동, 봉명1동";
    const MENU: &str = "menu for store 1";
    const STORES: &str = "stores";
    const KRANGLED: &str = "what is this for store something: oh a semicolon;";

    #[test]
    fn test_bad_string() {
        assert!(Ticket::from_ticket_string(KRANGLED).is_err());
        assert!(Ticket::from_ticket_string("asdfasdfjklasjdflkjaskldjfkljasjdkf").is_err());
        assert!(Ticket::from_ticket_string("").is_err());
    }

    #[test]
    fn test_command_tokens() {
        assert_eq!(Ticket::from_ticket_string(ORDER).unwrap().command, Order);
        assert_eq!(Ticket::from_ticket_string(ORDER2).unwrap().command, Order);
        assert_eq!(Ticket::from_ticket_string(CHECK).unwrap().command, Check);
        assert_eq!(Ticket::from_ticket_string(MENU).unwrap().command, Menu);
        assert_eq!(Ticket::from_ticket_string(STORES).unwrap().command, Stores);
        assert_eq!(Ticket::from_ticket_string("areas").unwrap().command, Areas);
        assert_eq!(Ticket::from_ticket_string(" quit ").unwrap().command, Quit);
    }

    #[test]
    fn test_param_tokens() {
        let expected = Param::Order(OrderLine {
            customer: Customer::new("홍길동", "봉명1동"),
            menu: "족발".into(),
            quantity: 2,
        });
        assert_eq!(Ticket::from_ticket_string(ORDER).unwrap().param, Some(expected.clone()));
        assert_eq!(Ticket::from_ticket_string(ORDER2).unwrap().param, Some(expected));
        assert_eq!(Ticket::from_ticket_string(ORDER).unwrap().store, Some(4));
        assert_eq!(
            Ticket::from_ticket_string(CHECK).unwrap().param,
            Some(Param::Customer(Customer::new("홍길동", "봉명1동")))
        );
        assert!(Ticket::from_ticket_string(MENU).unwrap().param.is_none());
        assert!(Ticket::from_ticket_string(STORES).unwrap().param.is_none());
    }

    #[test]
    fn test_bad_quantity() {
        let err = Ticket::from_ticket_string("order for store 1: a, b, c * many").unwrap_err();
        assert!(err.to_string().contains("Invalid quantity"));
        // Sign is checked by whoever takes the order, not by the codec.
        let ticket = Ticket::from_ticket_string("order for store 1: a, b, c * -1").unwrap();
        assert!(matches!(ticket.param, Some(Param::Order(OrderLine { quantity: -1, .. }))));
    }

    #[test]
    fn test_serde() {
        let de_str = Ticket::from_ticket_string(ORDER).unwrap().to_ticket_string();
        assert_eq!(ORDER, de_str);
        let de_str = Ticket::from_ticket_string(ORDER2).unwrap().to_ticket_string();
        assert_eq!(ORDER, de_str);
        let de_str = Ticket::from_ticket_string(CHECK).unwrap().to_ticket_string();
        assert_eq!(CHECK, de_str);
        let de_str = Ticket::from_ticket_string(MENU).unwrap().to_ticket_string();
        assert_eq!(MENU, de_str);
        let de_str = Ticket::from_ticket_string(STORES).unwrap().to_ticket_string();
        assert_eq!(STORES, de_str);
    }

    #[test]
    fn test_constructors() {
        let check = Ticket::check(Customer::new("홍길동", "봉명1동"));
        assert_eq!(check.to_ticket_string(), CHECK);
        let parsed = Ticket::from_ticket_string(&check.to_ticket_string()).unwrap();
        assert_eq!(parsed.command, Check);
        assert_eq!(parsed.param, check.param);

        let line = OrderLine {
            customer: Customer::new("홍길동", "봉명1동"),
            menu: "족발".into(),
            quantity: 2,
        };
        assert_eq!(String::from(Ticket::order(4, line)), ORDER);
    }

    #[test]
    fn test_integrity_check() {
        assert!(Ticket::from_ticket_string("order: a, b, c * 1").is_err());
        assert!(Ticket::from_ticket_string("order for store 1: a, b").is_err());
        assert!(Ticket::from_ticket_string("check for store 1: a, b").is_err());
        assert!(Ticket::from_ticket_string("check: a, b, c * 1").is_err());
        assert!(Ticket::from_ticket_string("check").is_err());
        assert!(Ticket::from_ticket_string("menu").is_err());
        assert!(Ticket::from_ticket_string("stores for store 1").is_err());
        assert!(Ticket::from_ticket_string("quit: a, b").is_err());
        assert!(Ticket::from_ticket_string("check: a, , b").is_err());
    }
}
