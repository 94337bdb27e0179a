use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use infra::ids::{Entity, Id};

use super::MenuError;
use crate::money::Price;

const MAX_STARS: u8 = 5;
const MAX_SPICE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dish {
    pub(super) id: Id<Dish>,
    pub(super) name: String,
    pub(super) description: String,
    pub(super) price: Price,
    pub(super) image: Url,
    pub(super) rating: Rating,
    pub(super) spice_level: SpiceLevel,
}

/// A dish as written in a catalog file; the id is derived from the name.
#[derive(Deserialize, Debug, Clone)]
pub(super) struct DishRecord {
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: String,
    pub(super) price: u64,
    pub(super) image: Url,
    pub(super) rating: Rating,
    pub(super) spice_level: SpiceLevel,
}

/// Star rating from 0 to 5, held in tenths so it compares exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpiceLevel(u8);

impl Dish {
    pub(super) fn from_record(record: DishRecord) -> Result<Self, MenuError> {
        let DishRecord {
            name,
            description,
            price,
            image,
            rating,
            spice_level,
        } = record;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(MenuError::EmptyName);
        }
        let price = Price::new(price);
        if !price.is_positive() {
            return Err(MenuError::InvalidPrice(name));
        }

        Ok(Dish {
            id: Id::hashed(&name),
            name,
            description,
            price,
            image,
            rating,
            spice_level,
        })
    }

    pub fn id(&self) -> Id<Dish> {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn price(&self) -> Price {
        self.price
    }
    pub fn image(&self) -> &Url {
        &self.image
    }
    pub fn rating(&self) -> Rating {
        self.rating
    }
    pub fn spice_level(&self) -> SpiceLevel {
        self.spice_level
    }
}

impl Entity for Dish {
    const PREFIX: &'static str = "dish";
}

impl Rating {
    pub fn from_tenths(tenths: u8) -> Result<Self, MenuError> {
        if tenths > MAX_STARS * 10 {
            return Err(MenuError::InvalidRating(f64::from(tenths) / 10.0));
        }
        Ok(Rating(tenths))
    }

    pub fn tenths(&self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = MenuError;
    fn try_from(stars: f64) -> Result<Self, MenuError> {
        if !(0.0..=f64::from(MAX_STARS)).contains(&stars) {
            return Err(MenuError::InvalidRating(stars));
        }
        Ok(Rating((stars * 10.0).round() as u8))
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> f64 {
        f64::from(rating.0) / 10.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl SpiceLevel {
    pub const MAX: u8 = MAX_SPICE;

    pub fn new(level: u8) -> Result<Self, MenuError> {
        if level > MAX_SPICE {
            return Err(MenuError::InvalidSpiceLevel(level));
        }
        Ok(SpiceLevel(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SpiceLevel {
    type Error = MenuError;
    fn try_from(level: u8) -> Result<Self, MenuError> {
        SpiceLevel::new(level)
    }
}

impl From<SpiceLevel> for u8 {
    fn from(level: SpiceLevel) -> u8 {
        level.0
    }
}
