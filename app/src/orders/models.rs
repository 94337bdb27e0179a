use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use err_derive::Error;
use serde::{Deserialize, Serialize};

use infra::ids::{Entity, Id};

use crate::cart::LineItem;
use crate::customer::CustomerDetails;
use crate::money::Price;

/// What the customer is told once an order goes through. Nothing is sent
/// anywhere; this is the whole record of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub id: Id<Confirmation>,
    pub lines: Vec<LineItem>,
    pub total_price: Price,
    pub total_items: u32,
    pub customer: CustomerDetails,
    pub placed_at: DateTime<Utc>,
    pub delivery: DeliveryWindow,
}

/// Promised delivery time, in minutes from placing the order. The earliest
/// time never comes after the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowRecord")]
pub struct DeliveryWindow {
    min_minutes: u32,
    max_minutes: u32,
}

#[derive(Deserialize, Debug)]
struct WindowRecord {
    min_minutes: u32,
    max_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    display = "delivery window runs backwards: {}-{} minutes",
    min_minutes,
    max_minutes
)]
pub struct InvalidDeliveryWindow {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl Entity for Confirmation {
    const PREFIX: &'static str = "order";
}

impl DeliveryWindow {
    pub fn new(min_minutes: u32, max_minutes: u32) -> Result<Self, InvalidDeliveryWindow> {
        if min_minutes > max_minutes {
            return Err(InvalidDeliveryWindow {
                min_minutes,
                max_minutes,
            });
        }
        Ok(DeliveryWindow {
            min_minutes,
            max_minutes,
        })
    }

    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }
}

impl TryFrom<WindowRecord> for DeliveryWindow {
    type Error = InvalidDeliveryWindow;
    fn try_from(record: WindowRecord) -> Result<Self, InvalidDeliveryWindow> {
        DeliveryWindow::new(record.min_minutes, record.max_minutes)
    }
}

impl Default for DeliveryWindow {
    fn default() -> Self {
        DeliveryWindow {
            min_minutes: 30,
            max_minutes: 45,
        }
    }
}
