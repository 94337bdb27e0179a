//! A line-at-a-time ordering session over any reader and writer.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::*;

use crate::orders::Confirmation;
use crate::render::{ConfirmationView, MenuView, SummaryView};
use crate::services::{Commandable, Queryable};
use crate::session::{
    AddToCart, CancelOrder, CartSummary, RemoveFromCart, Session, SessionEvent, SubmitOrder,
    UpdateDetails,
};

const HELP: &str = "\
commands:
  menu                 show the menu
  add <dish>           add one (by number, name or id)
  remove <dish>        take one out
  cart                 show the cart
  name|phone|address <text>
                       fill in the order form
  submit               place the order
  cancel               clear the order form
  quit
";

pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{}", MenuView(session.menu()))?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (cmd, arg) = match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], line[i..].trim()),
            None => (line, ""),
        };
        trace!("Command {:?} {:?}", cmd, arg);

        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => write!(out, "{}", HELP)?,
            "menu" => write!(out, "{}", MenuView(session.menu()))?,
            "cart" => {
                let summary = session.query(CartSummary)?;
                write!(out, "{}", SummaryView(&summary))?;
            }
            "add" | "remove" => {
                let found = session
                    .menu()
                    .lookup(arg)
                    .map(|d| (d.id(), d.name().to_string()));
                let (id, name) = match found {
                    Ok(found) => found,
                    Err(e) => {
                        writeln!(out, "{}", e)?;
                        continue;
                    }
                };
                let quantity = if cmd == "add" {
                    session.execute(AddToCart(id))?
                } else {
                    session.execute(RemoveFromCart(id))?
                };
                writeln!(out, "{} x {}", name, quantity)?;
            }
            "name" | "phone" | "address" => {
                let mut update = UpdateDetails::default();
                let value = Some(arg.to_string());
                match cmd {
                    "name" => update.name = value,
                    "phone" => update.phone = value,
                    _ => update.address = value,
                }
                session.execute(update)?;
            }
            "cancel" => {
                session.execute(CancelOrder)?;
                writeln!(out, "Order form cleared.")?;
            }
            "submit" => {
                if let Err(e) = session.execute(SubmitOrder) {
                    writeln!(out, "{}", e)?;
                }
                while let Some(SessionEvent::OrderPlaced(confirmation)) = session.take_event() {
                    write!(out, "{}", ConfirmationView(&confirmation))?;
                }
            }
            other => writeln!(out, "unknown command {:?}; try \"help\"", other)?,
        }
    }

    if !session.cart().is_empty() {
        debug!(
            "Session ended with {} items left in the cart",
            session.cart().total_items()
        );
    }
    Ok(())
}

/// Places one order in a single go: every addition, then every removal,
/// then the form, then the submission. The first unknown dish or failed
/// check stops it.
pub fn place_order<S: AsRef<str>>(
    session: &mut Session,
    adds: &[S],
    removes: &[S],
    details: UpdateDetails,
) -> Result<Confirmation> {
    for query in adds {
        let id = session.menu().lookup(query.as_ref())?.id();
        session.execute(AddToCart(id))?;
    }
    for query in removes {
        let id = session.menu().lookup(query.as_ref())?.id();
        session.execute(RemoveFromCart(id))?;
    }
    session.execute(details)?;
    session.execute(SubmitOrder).context("place order")
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::customer::Field;
    use crate::menu::{Menu, MenuError};
    use crate::money::Price;
    use crate::orders::{DeliveryWindow, MissingFields, OrderError};

    fn session() -> Session {
        let menu = Menu::house_specials().expect("house specials");
        Session::new(Arc::new(menu), DeliveryWindow::default())
    }

    fn form(name: &str, phone: &str, address: &str) -> UpdateDetails {
        UpdateDetails {
            name: Some(name.into()),
            phone: Some(phone.into()),
            address: Some(address.into()),
        }
    }

    fn transcript(script: &str) -> (Session, String) {
        let mut session = session();
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).expect("run shell");
        (session, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn places_an_order() {
        let (session, out) = transcript(
            "add 1\nadd chicken tikka biryani\nadd 1\ncart\n\
             name Ravi\nphone +91 98765 43210\naddress 123 Biryani Street\nsubmit\n",
        );

        assert!(out.contains("Hyderabadi Dum Biryani x 2"), "{}", out);
        assert!(out.contains("Total: ₹947 (3 items)"), "{}", out);
        assert!(out.contains("Order placed successfully!"), "{}", out);
        assert!(session.cart().is_empty());
        assert_eq!(session.pending_events(), 0);
    }

    #[test]
    fn reports_validation_failures() {
        let (session, out) = transcript("submit\nadd 2\nname Ravi\nsubmit\n");

        assert!(out.contains("your cart is empty"), "{}", out);
        assert!(out.contains("missing phone, address"), "{}", out);
        assert!(!out.contains("Order placed"), "{}", out);
        assert_eq!(session.cart().total_items(), 1);
    }

    #[test]
    fn unknown_dishes_and_commands_do_not_stop_the_session() {
        let (session, out) = transcript("add pizza\ndance\nadd 6\nquit\nadd 6\n");

        assert!(out.contains("no such dish on the menu: \"pizza\""), "{}", out);
        assert!(out.contains("unknown command \"dance\""), "{}", out);
        assert_eq!(session.cart().total_items(), 1);
    }

    #[test]
    fn cancel_clears_the_form() {
        let (session, out) = transcript("add 3\nname Ravi\ncancel\n");

        assert!(out.contains("Order form cleared."), "{}", out);
        assert_eq!(session.details().name, "");
        assert_eq!(session.cart().total_items(), 1);
    }

    #[test]
    fn one_shot_order_removes_after_adding() {
        let mut session = session();
        let confirmation = place_order(
            &mut session,
            &["1", "2", "1"],
            &["hyderabadi dum biryani", "Mutton Biryani"],
            form("Ravi", "+91 98765 43210", "123 Biryani Street"),
        )
        .expect("order placed");

        assert_eq!(confirmation.total_price, Price::new(648));
        assert_eq!(confirmation.total_items, 2);
        assert_eq!(
            session.take_event(),
            Some(SessionEvent::OrderPlaced(confirmation))
        );
        assert!(session.cart().is_empty());
    }

    #[test]
    fn one_shot_order_stops_at_an_unknown_dish() {
        let mut session = session();
        let err = place_order(
            &mut session,
            &["1", "pizza"],
            &[],
            form("Ravi", "+91 98765 43210", "123 Biryani Street"),
        )
        .expect_err("unknown dish");

        assert_eq!(
            err.downcast_ref::<MenuError>(),
            Some(&MenuError::UnknownDish("pizza".to_string()))
        );
        assert_eq!(session.pending_events(), 0);
    }

    #[test]
    fn one_shot_order_refuses_an_incomplete_form() {
        let mut session = session();
        let err = place_order(&mut session, &["4"], &[], form("Ravi", " ", ""))
            .expect_err("incomplete form");

        let order_err = err.chain().find_map(|e| e.downcast_ref::<OrderError>());
        assert_eq!(
            order_err,
            Some(&OrderError::IncompleteDetails(MissingFields(vec![
                Field::Phone,
                Field::Address
            ])))
        );
        assert_eq!(session.cart().total_items(), 1);
        assert_eq!(session.pending_events(), 0);
    }

    #[test]
    fn one_shot_order_refuses_an_empty_cart() {
        let mut session = session();
        let err = place_order(
            &mut session,
            &["6"],
            &["6"],
            form("Ravi", "+91 98765 43210", "123 Biryani Street"),
        )
        .expect_err("empty cart");

        let order_err = err.chain().find_map(|e| e.downcast_ref::<OrderError>());
        assert_eq!(order_err, Some(&OrderError::EmptyCart));
    }
}
