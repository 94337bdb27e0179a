//! The session's shopping cart.
//!
//! Lines are kept in the order dishes were first added. A line exists only
//! while its quantity is at least one; a dish whose quantity drops to zero is
//! indistinguishable from one never added.

use log::*;
use serde::Serialize;

use infra::ids::Id;

use crate::menu::{Dish, Menu};
use crate::money::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartLine {
    dish: Id<Dish>,
    unit_price: Price,
    quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// A cart line joined with its menu entry, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub dish: Id<Dish>,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

impl CartLine {
    pub fn dish(&self) -> Id<Dish> {
        self.dish
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn add(&mut self, dish: &Dish) {
        let id = dish.id();
        match self.position(&id) {
            Some(i) => self.lines[i].quantity += 1,
            None => self.lines.push(CartLine {
                dish: id,
                unit_price: dish.price(),
                quantity: 1,
            }),
        }
        trace!("Added {}; now {}", id, self.quantity_of(&id));
    }

    /// Takes one of `dish` out of the cart. Removing a dish that isn't in
    /// the cart does nothing.
    pub fn remove(&mut self, dish: &Id<Dish>) {
        if let Some(i) = self.position(dish) {
            if self.lines[i].quantity > 1 {
                self.lines[i].quantity -= 1;
            } else {
                self.lines.remove(i);
            }
        }
        trace!("Removed {}; now {}", dish, self.quantity_of(dish));
    }

    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, dish: &Id<Dish>) -> u32 {
        self.position(dish)
            .map(|i| self.lines[i].quantity)
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn itemise(&self, menu: &Menu) -> Vec<LineItem> {
        self.lines
            .iter()
            .map(|line| LineItem {
                dish: line.dish,
                name: menu
                    .get(&line.dish)
                    .map(|d| d.name().to_string())
                    .unwrap_or_else(|| line.dish.to_string()),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect()
    }

    fn position(&self, dish: &Id<Dish>) -> Option<usize> {
        self.lines.iter().position(|l| l.dish == *dish)
    }
}
