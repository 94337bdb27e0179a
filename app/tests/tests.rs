use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use lazy_static::lazy_static;

use biryani::config::{Config, MenuConfig};
use biryani::customer::{CustomerDetails, Field};
use biryani::money::Price;
use biryani::orders::{Confirmation, MissingFields, OrderError};
use biryani::services::{Commandable, Queryable};
use biryani::session::{
    AddToCart, CancelOrder, CartSummary, RemoveFromCart, Session, SessionEvent, SubmitOrder,
    UpdateDetails,
};
use biryani::Biryani;

lazy_static! {
    static ref HOUSE: Biryani = Biryani::new(&Config::default()).expect("restaurant");
}

struct Scenario {
    restaurant: Biryani,
}

struct Customer {
    session: Session,
}

impl Scenario {
    fn new() -> Self {
        let _ = env_logger::try_init();
        Scenario {
            restaurant: HOUSE.clone(),
        }
    }

    fn with_menu(path: PathBuf) -> Result<Self> {
        let _ = env_logger::try_init();
        let config = Config {
            menu: MenuConfig { path: Some(path) },
            ..Default::default()
        };
        Ok(Scenario {
            restaurant: Biryani::new(&config)?,
        })
    }

    fn new_customer(&self) -> Customer {
        Customer {
            session: self.restaurant.session(),
        }
    }
}

impl Customer {
    fn orders(&mut self, dish: &str) -> u32 {
        let id = self.session.menu().lookup(dish).expect("dish on menu").id();
        self.session.execute(AddToCart(id)).expect("add to cart")
    }

    fn changes_mind_about(&mut self, dish: &str) -> u32 {
        let id = self.session.menu().lookup(dish).expect("dish on menu").id();
        self.session
            .execute(RemoveFromCart(id))
            .expect("remove from cart")
    }

    fn fills_in(&mut self, name: &str, phone: &str, address: &str) {
        self.session
            .execute(UpdateDetails {
                name: Some(name.into()),
                phone: Some(phone.into()),
                address: Some(address.into()),
            })
            .expect("fill in details")
    }

    fn places_order(&mut self) -> Result<Confirmation> {
        self.session.execute(SubmitOrder)
    }

    fn notifications(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(ev) = self.session.take_event() {
            events.push(ev);
        }
        events
    }
}

fn order_error(err: &anyhow::Error) -> Option<&OrderError> {
    err.chain().find_map(|e| e.downcast_ref::<OrderError>())
}

#[test]
fn should_serve_biryani() {
    let scenario = Scenario::new();
    let mut customer = scenario.new_customer();

    customer.orders("Hyderabadi Dum Biryani");
    customer.orders("Chicken Tikka Biryani");
    assert_eq!(customer.orders("Hyderabadi Dum Biryani"), 2);

    let summary = customer.session.query(CartSummary).expect("summary");
    assert_eq!(summary.total_price, Price::new(947));
    assert_eq!(summary.total_items, 3);

    customer.fills_in("Ravi", "+91 98765 43210", "123 Biryani Street, Flavor Town");
    let confirmation = customer.places_order().expect("order placed");

    assert_eq!(confirmation.total_price, Price::new(947));
    assert_eq!(
        customer.notifications(),
        vec![SessionEvent::OrderPlaced(confirmation)]
    );
    assert!(customer.session.cart().is_empty());
    assert_eq!(customer.session.details(), &CustomerDetails::default());
}

#[test]
fn should_refuse_an_empty_cart() {
    let scenario = Scenario::new();
    let mut customer = scenario.new_customer();
    customer.fills_in("Ravi", "+91 98765 43210", "123 Biryani Street");

    let err = customer.places_order().expect_err("empty cart");

    assert_eq!(order_error(&err), Some(&OrderError::EmptyCart));
    assert!(customer.notifications().is_empty());
    assert_eq!(customer.session.details().phone, "+91 98765 43210");
}

#[test]
fn should_refuse_missing_phone_number() {
    let scenario = Scenario::new();
    let mut customer = scenario.new_customer();
    customer.orders("Mutton Biryani");
    customer.fills_in("Ravi", "", "123 Biryani Street");

    let err = customer.places_order().expect_err("no phone");

    assert_eq!(
        order_error(&err),
        Some(&OrderError::IncompleteDetails(MissingFields(vec![
            Field::Phone
        ])))
    );
    assert!(customer.notifications().is_empty());
    assert_eq!(customer.session.cart().total_items(), 1);
    assert_eq!(customer.session.details().name, "Ravi");
}

#[test]
fn should_let_customer_start_over_after_cancelling() {
    let scenario = Scenario::new();
    let mut customer = scenario.new_customer();
    customer.orders("Veg Biryani");
    customer.fills_in("Ravi", "+91 98765 43210", "123 Biryani Street");

    customer.session.execute(CancelOrder).expect("cancel");
    assert!(customer.places_order().is_err());

    customer.fills_in("Anu", "+91 87654 32109", "7 Spice Lane");
    let confirmation = customer.places_order().expect("order placed");
    assert_eq!(confirmation.customer.name, "Anu");
    assert_eq!(confirmation.total_price, Price::new(249));
}

#[test]
fn sessions_do_not_share_carts() {
    let scenario = Scenario::new();
    let mut first = scenario.new_customer();
    let mut second = scenario.new_customer();

    first.orders("Fish Biryani");
    first.orders("Fish Biryani");
    second.orders("Egg Biryani");
    assert_eq!(second.changes_mind_about("Egg Biryani"), 0);

    assert_eq!(first.session.cart().total_items(), 2);
    assert!(second.session.cart().is_empty());
}

#[test]
fn should_serve_from_a_custom_menu() -> Result<()> {
    let path = std::env::temp_dir().join(format!("biryani-menu-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
        [[dish]]
        name = "Kheema Biryani"
        description = "Minced mutton, maximum flavour."
        price = 379
        image = "https://example.com/kheema.jpeg"
        rating = 4.4
        spice_level = 4
        "#,
    )?;
    let scenario = Scenario::with_menu(path.clone());
    fs::remove_file(&path)?;
    let scenario = scenario?;

    let mut customer = scenario.new_customer();
    assert_eq!(customer.orders("1"), 1);
    assert_eq!(customer.orders("kheema biryani"), 2);
    assert_eq!(customer.session.cart().total_price(), Price::new(758));
    Ok(())
}
