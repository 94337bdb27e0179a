//! Plain-text views for the terminal.

use std::fmt;

use crate::menu::{Dish, Menu, SpiceLevel};
use crate::orders::Confirmation;
use crate::session::Summary;

pub struct MenuView<'a>(pub &'a Menu);
pub struct SummaryView<'a>(pub &'a Summary);
pub struct ConfirmationView<'a>(pub &'a Confirmation);
pub struct SpiceIndicator(pub SpiceLevel);

impl<'a> fmt::Display for MenuView<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, dish) in self.0.dishes().iter().enumerate() {
            write_dish(fmt, i + 1, dish)?;
        }
        Ok(())
    }
}

fn write_dish(fmt: &mut fmt::Formatter, pos: usize, dish: &Dish) -> fmt::Result {
    writeln!(
        fmt,
        "{:>2}. {:<28} {:>6}  ★ {}  spice {}",
        pos,
        dish.name(),
        dish.price().to_string(),
        dish.rating(),
        SpiceIndicator(dish.spice_level())
    )?;
    if !dish.description().is_empty() {
        writeln!(fmt, "    {}", dish.description())?;
    }
    Ok(())
}

impl<'a> fmt::Display for SummaryView<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let summary = self.0;
        if summary.lines.is_empty() {
            return writeln!(fmt, "Your cart is empty! Add some delicious biryani.");
        }
        for line in summary.lines.iter() {
            writeln!(
                fmt,
                "{:<28} {:>6} x {:<3} {:>7}",
                line.name,
                line.unit_price.to_string(),
                line.quantity,
                line.line_total.to_string()
            )?;
        }
        writeln!(
            fmt,
            "Total: {} ({} items)",
            summary.total_price, summary.total_items
        )
    }
}

impl<'a> fmt::Display for ConfirmationView<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let c = self.0;
        writeln!(
            fmt,
            "Order placed successfully! Your biryani will reach you in {}-{} minutes.",
            c.delivery.min_minutes(),
            c.delivery.max_minutes()
        )?;
        writeln!(fmt, "Order: {}", c.id)?;
        writeln!(
            fmt,
            "Total: {} ({} items), for {} at {}",
            c.total_price, c.total_items, c.customer.name, c.customer.address
        )
    }
}

impl fmt::Display for SpiceIndicator {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let hot = self.0.level();
        for i in 0..SpiceLevel::MAX {
            fmt.write_str(if i < hot { "●" } else { "○" })?;
        }
        Ok(())
    }
}
