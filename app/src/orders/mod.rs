use std::fmt;

use chrono::Utc;
use err_derive::Error;
use log::*;

use infra::ids::IdGen;

use crate::cart::Cart;
use crate::customer::{CustomerDetails, Field};
use crate::menu::Menu;

mod models;

pub use self::models::{Confirmation, DeliveryWindow, InvalidDeliveryWindow};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error(display = "your cart is empty; add some biryani first")]
    EmptyCart,
    #[error(display = "please fill in all details; missing {}", _0)]
    IncompleteDetails(MissingFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<Field>);

/// Checks and places an order.
///
/// The cart must hold something and every customer field must be filled
/// in, checked in that order. A failed check leaves both untouched. On
/// success the cart is emptied, the details are cleared and the returned
/// confirmation is the only record of the order.
pub fn submit_order(
    cart: &mut Cart,
    details: &mut CustomerDetails,
    menu: &Menu,
    idgen: &IdGen,
    delivery: DeliveryWindow,
) -> Result<Confirmation, OrderError> {
    if cart.is_empty() {
        debug!("Rejecting order: empty cart");
        return Err(OrderError::EmptyCart);
    }

    let missing = details.missing_fields();
    if !missing.is_empty() {
        debug!("Rejecting order: missing {:?}", missing);
        return Err(OrderError::IncompleteDetails(MissingFields(missing)));
    }

    let confirmation = Confirmation {
        id: idgen.generate(),
        lines: cart.itemise(menu),
        total_price: cart.total_price(),
        total_items: cart.total_items(),
        customer: details.clone(),
        placed_at: Utc::now(),
        delivery,
    };
    info!(
        "Placed {}: {} items, {}",
        confirmation.id, confirmation.total_items, confirmation.total_price
    );

    cart.clear();
    details.reset();

    Ok(confirmation)
}

impl fmt::Display for MissingFields {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{}", field)?;
        }
        Ok(())
    }
}
