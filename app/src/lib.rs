use std::sync::Arc;

use anyhow::{Context, Result};
use log::*;

pub mod cart;
pub mod config;
pub mod customer;
pub mod menu;
pub mod money;
pub mod orders;
pub mod render;
pub mod services;
pub mod session;
pub mod shell;

use crate::menu::Menu;
use crate::orders::DeliveryWindow;
use crate::session::Session;

/// The restaurant: one shared menu, any number of independent sessions.
#[derive(Debug, Clone)]
pub struct Biryani {
    menu: Arc<Menu>,
    delivery: DeliveryWindow,
}

impl Biryani {
    pub fn new(config: &config::Config) -> Result<Self> {
        let menu = config.menu.build().context("load menu")?;
        info!("Serving {} dishes", menu.len());
        Ok(Biryani {
            menu: Arc::new(menu),
            delivery: config.delivery,
        })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn session(&self) -> Session {
        debug!("New session");
        Session::new(self.menu.clone(), self.delivery)
    }
}
