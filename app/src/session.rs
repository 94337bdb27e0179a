use std::sync::Arc;

use anyhow::Result;
use log::*;
use serde::Serialize;

use infra::ids::{Id, IdGen};
use infra::mailbox::MailBox;

use crate::cart::{Cart, LineItem};
use crate::customer::CustomerDetails;
use crate::menu::{Dish, Menu, MenuError};
use crate::money::Price;
use crate::orders::{self, Confirmation, DeliveryWindow};
use crate::services::{Commandable, Queryable, Request};

/// One customer's visit: their cart, their order form, and the
/// notifications waiting for them.
#[derive(Debug)]
pub struct Session {
    menu: Arc<Menu>,
    cart: Cart,
    details: CustomerDetails,
    outbox: MailBox<SessionEvent>,
    idgen: IdGen,
    delivery: DeliveryWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    OrderPlaced(Confirmation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddToCart(pub Id<Dish>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveFromCart(pub Id<Dish>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines: Vec<LineItem>,
    pub total_price: Price,
    pub total_items: u32,
}

impl Request for AddToCart {
    /// Quantity of the dish now in the cart.
    type Resp = u32;
}

impl Request for RemoveFromCart {
    type Resp = u32;
}

impl Request for UpdateDetails {
    type Resp = ();
}

impl Request for CancelOrder {
    type Resp = ();
}

impl Request for SubmitOrder {
    type Resp = Confirmation;
}

impl Request for CartSummary {
    type Resp = Summary;
}

impl Session {
    pub fn new(menu: Arc<Menu>, delivery: DeliveryWindow) -> Self {
        Session {
            menu,
            cart: Cart::new(),
            details: CustomerDetails::default(),
            outbox: MailBox::empty(),
            idgen: IdGen::new(),
            delivery,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    pub fn take_event(&mut self) -> Option<SessionEvent> {
        self.outbox.take_one()
    }

    pub fn pending_events(&self) -> usize {
        self.outbox.len()
    }
}

impl Commandable<AddToCart> for Session {
    fn execute(&mut self, AddToCart(id): AddToCart) -> Result<u32> {
        let dish = self
            .menu
            .get(&id)
            .ok_or_else(|| MenuError::UnknownDish(id.to_string()))?;
        self.cart.add(dish);
        Ok(self.cart.quantity_of(&id))
    }
}

impl Commandable<RemoveFromCart> for Session {
    fn execute(&mut self, RemoveFromCart(id): RemoveFromCart) -> Result<u32> {
        self.cart.remove(&id);
        Ok(self.cart.quantity_of(&id))
    }
}

impl Commandable<UpdateDetails> for Session {
    fn execute(&mut self, update: UpdateDetails) -> Result<()> {
        let UpdateDetails {
            name,
            phone,
            address,
        } = update;
        if let Some(name) = name {
            self.details.name = name;
        }
        if let Some(phone) = phone {
            self.details.phone = phone;
        }
        if let Some(address) = address {
            self.details.address = address;
        }
        Ok(())
    }
}

impl Commandable<CancelOrder> for Session {
    fn execute(&mut self, _: CancelOrder) -> Result<()> {
        debug!("Order form cancelled");
        self.details.reset();
        Ok(())
    }
}

impl Commandable<SubmitOrder> for Session {
    fn execute(&mut self, _: SubmitOrder) -> Result<Confirmation> {
        let confirmation = orders::submit_order(
            &mut self.cart,
            &mut self.details,
            &self.menu,
            &self.idgen,
            self.delivery,
        )?;
        self.outbox.send(SessionEvent::OrderPlaced(confirmation.clone()));
        Ok(confirmation)
    }
}

impl Queryable<CartSummary> for Session {
    fn query(&self, _: CartSummary) -> Result<Summary> {
        Ok(Summary {
            lines: self.cart.itemise(&self.menu),
            total_price: self.cart.total_price(),
            total_items: self.cart.total_items(),
        })
    }
}
