use std::{
    collections::{HashMap, HashSet},
    fs,
};

use anyhow::{bail, Context, Result};
use serde_derive::Deserialize;
use ticket::StoreId;

use crate::{
    clock::{Minutes, MINUTES_PER_DAY},
    hours::StoreHours,
};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreProfile {
    pub id: StoreId,
    pub name: String,
    pub hours: StoreHours,
    // What the store prints as its menu board
    #[serde(default)]
    pub menus: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub db: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Delivery area name to base delivery minutes.
    pub areas: HashMap<String, Minutes>,
    /// Menu name to preparation and delivery minutes.
    pub menus: HashMap<String, Minutes>,
    pub stores: Vec<StoreProfile>,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_file(file: &str) -> Result<Self> {
        let toml_string = fs::read_to_string(file).with_context(|| {
            format!(
                "Error when trying to read the config file {}. \
                Make sure baedal.toml is in /config directory.",
                file
            )
        })?;
        Self::from_toml_string(&toml_string)
    }

    pub fn from_toml_string(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).context("Error parsing TOML in the config file.")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.stores.is_empty() {
            bail!("At least one store is needed.");
        }
        let mut ids = HashSet::new();
        for store in self.stores.iter() {
            if !ids.insert(store.id) {
                bail!("Store id {} is used more than once.", store.id);
            }
            if let Some(m) = store.menus.iter().find(|m| !self.menus.contains_key(*m)) {
                bail!("{} lists {} but it is not in [menus].", store.name, m);
            }
        }
        // Arrival is kept as a time of day, so no order may take a day or more
        let slowest_area = self.areas.iter().max_by_key(|(_, m)| **m);
        let slowest_menu = self.menus.iter().max_by_key(|(_, m)| **m);
        if let (Some((area, a)), Some((menu, m))) = (slowest_area, slowest_menu) {
            if u64::from(*a) + u64::from(*m) >= u64::from(MINUTES_PER_DAY) {
                bail!(
                    "{} to {} would take {} minutes. Estimates must stay under a day.",
                    menu,
                    area,
                    u64::from(*a) + u64::from(*m)
                );
            }
        }
        Ok(())
    }

    pub fn store(&self, id: StoreId) -> Option<&StoreProfile> {
        self.stores.iter().find(|s| s.id == id)
    }

    pub fn area_minutes(&self, address: &str) -> Option<Minutes> {
        self.areas.get(address).copied()
    }

    pub fn menu_minutes(&self, menu: &str) -> Option<Minutes> {
        self.menus.get(menu).copied()
    }

    // Area names sorted, for stable listings
    pub fn area_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.areas.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
