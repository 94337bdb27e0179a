use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use err_derive::Error;
use log::*;
use serde::Deserialize;

use infra::ids::Id;

use crate::services::{Queryable, Request};

mod models;

use self::models::DishRecord;
pub use self::models::{Dish, Rating, SpiceLevel};

const HOUSE_SPECIALS: &str = include_str!("house_specials.toml");

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuError {
    #[error(display = "no such dish on the menu: {:?}", _0)]
    UnknownDish(String),
    #[error(display = "dish listed twice: {:?}", _0)]
    DuplicateDish(String),
    #[error(display = "dish {:?} must have a positive price", _0)]
    InvalidPrice(String),
    #[error(display = "rating must be between 0 and 5; got {}", _0)]
    InvalidRating(f64),
    #[error(display = "spice level must be between 0 and 5; got {}", _0)]
    InvalidSpiceLevel(u8),
    #[error(display = "dish name must not be blank")]
    EmptyName,
    #[error(display = "menu has no dishes")]
    EmptyMenu,
}

/// The fixed, ordered catalog. Never changes once built.
#[derive(Debug, Clone)]
pub struct Menu {
    dishes: Vec<Dish>,
    index: HashMap<Id<Dish>, usize>,
}

#[derive(Deserialize, Debug)]
struct Catalog {
    #[serde(default)]
    dish: Vec<DishRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMenu;

impl Request for ShowMenu {
    type Resp = Vec<Dish>;
}

impl Menu {
    pub fn new<I: IntoIterator<Item = Dish>>(dishes: I) -> Result<Self, MenuError> {
        let mut index = HashMap::new();
        let mut list = Vec::new();
        for dish in dishes {
            if index.insert(dish.id, list.len()).is_some() {
                return Err(MenuError::DuplicateDish(dish.name));
            }
            list.push(dish);
        }
        if list.is_empty() {
            return Err(MenuError::EmptyMenu);
        }
        debug!("Built menu of {} dishes", list.len());
        Ok(Menu {
            dishes: list,
            index,
        })
    }

    /// The restaurant's own line-up, compiled into the binary.
    pub fn house_specials() -> Result<Self> {
        Self::from_toml_str(HOUSE_SPECIALS).context("house specials")
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Load menu from {:?}", path);
        let buf = fs::read_to_string(path).with_context(|| format!("read menu {:?}", path))?;
        Self::from_toml_str(&buf).with_context(|| format!("parse menu {:?}", path))
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(src).context("menu toml")?;
        let dishes = catalog
            .dish
            .into_iter()
            .map(Dish::from_record)
            .collect::<Result<Vec<Dish>, MenuError>>()?;
        Ok(Self::new(dishes)?)
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn get(&self, id: &Id<Dish>) -> Option<&Dish> {
        self.index.get(id).map(|&i| &self.dishes[i])
    }

    /// Resolves a dish from its id, its 1-based position on the menu, or
    /// its name (ignoring case).
    pub fn lookup(&self, query: &str) -> Result<&Dish, MenuError> {
        let query = query.trim();
        let found = if let Ok(id) = query.parse::<Id<Dish>>() {
            self.get(&id)
        } else if let Ok(pos) = query.parse::<usize>() {
            pos.checked_sub(1).and_then(|i| self.dishes.get(i))
        } else {
            let wanted = query.to_lowercase();
            self.dishes.iter().find(|d| d.name.to_lowercase() == wanted)
        };
        trace!("Lookup {:?} -> {:?}", query, found.map(|d| d.id));
        found.ok_or_else(|| MenuError::UnknownDish(query.to_string()))
    }
}

impl Queryable<ShowMenu> for Menu {
    fn query(&self, _: ShowMenu) -> Result<Vec<Dish>> {
        Ok(self.dishes.clone())
    }
}
