use anyhow::{Context, Result};
use console::style;
use tracing::{debug, error, info, warn};

use crate::{
    cli::{console::Console, CART, CHECKMARK, CROSS, INFO},
    models::{cart::Cart, catalog::Catalog},
    services::checkout_service::{Checkout, CheckoutOutcome},
    utils::formatting::{format_listing, format_money, ListingOrder},
};

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Exited,
    InputClosed,
}

enum MenuChoice {
    ShowProducts,
    ShowCart,
    Exit,
}

pub struct StoreApp<C: Console> {
    console: C,
    catalog: Catalog,
    cart: Cart,
    order: ListingOrder,
}

impl<C: Console> StoreApp<C> {
    pub fn new(console: C, catalog: Catalog, order: ListingOrder) -> Self {
        Self {
            console,
            catalog,
            cart: Cart::new(),
            order,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Main menu loop. Sub-screen failures are reported and the menu comes back;
    /// only Exit or the end of input finish the session.
    pub fn run(&mut self) -> SessionOutcome {
        info!("Store session started with {} products", self.catalog.len());

        loop {
            let choice = match self.read_menu_choice() {
                Ok(Some(choice)) => choice,
                Ok(None) => {
                    info!("Input closed, ending session");
                    return SessionOutcome::InputClosed;
                }
                Err(e) => {
                    error!("Failed to read menu choice: {:#}", e);
                    return SessionOutcome::InputClosed;
                }
            };

            let result = match choice {
                MenuChoice::ShowProducts => self.handle_show_products(),
                MenuChoice::ShowCart => self.handle_show_cart(),
                MenuChoice::Exit => {
                    if let Err(e) = self.console.say("Thank you for shopping with us!") {
                        warn!("Failed to print farewell: {}", e);
                    }
                    info!("Store session ended by user");
                    return SessionOutcome::Exited;
                }
            };

            if let Err(e) = result {
                error!("Screen failed: {:#}", e);
                let message = format!("{}{}", CROSS, style("Something went wrong").red());
                if self.console.say(&message).is_err() {
                    return SessionOutcome::InputClosed;
                }
            }
        }
    }

    fn read_menu_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            self.say("")?;
            self.say(&style("Welcome to the Online Store!").bold().cyan().to_string())?;
            self.say("1. Show Products")?;
            self.say("2. Show Cart")?;
            self.say("3. Exit")?;

            let Some(answer) = self.ask("Your choice:")? else {
                return Ok(None);
            };

            match answer.parse::<i64>() {
                Ok(1) => return Ok(Some(MenuChoice::ShowProducts)),
                Ok(2) => return Ok(Some(MenuChoice::ShowCart)),
                Ok(3) => return Ok(Some(MenuChoice::Exit)),
                Ok(other) => {
                    debug!("Menu choice out of range: {}", other);
                    self.say("Invalid choice!")?;
                }
                Err(_) => self.say("Please enter 1, 2, or 3.")?,
            }
        }
    }

    fn handle_show_products(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            self.say(&format!("{}No products available.", INFO))?;
        } else {
            let listing = format_listing(self.catalog.products(), self.order);
            self.say(&listing)?;
        }

        loop {
            let Some(answer) =
                self.ask("If you want to buy something write its Id, otherwise write \"no\"")?
            else {
                return Ok(());
            };

            if answer.eq_ignore_ascii_case("no") {
                return Ok(());
            }

            match self.catalog.find(&answer).cloned() {
                Some(product) => {
                    let message = format!(
                        "{}{}",
                        CHECKMARK,
                        style(format!("{} has been added to cart.", product.name)).green()
                    );
                    debug!("Added {} to cart", product.id);
                    self.cart.add(product);
                    self.say(&message)?;
                }
                None => {
                    debug!("Unknown product id: '{}'", answer);
                    self.say("Sorry! Id is not found. Please try again.")?;
                }
            }
        }
    }

    fn handle_show_cart(&mut self) -> Result<()> {
        let total = self.cart.total()?;
        if self.cart.is_empty() {
            self.say(&format!("{}Your cart is empty.", CART))?;
        } else {
            let listing = format_listing(self.cart.items(), self.order);
            self.say(&listing)?;
            self.say(&format!("{} item(s) in your cart", self.cart.len()))?;
        }
        let total_line = format!("Your total is: {}", format_money(total));
        self.say(&total_line)?;

        loop {
            let Some(answer) =
                self.ask("Please choose your option: \"C\" to check out, \"X\" to return.")?
            else {
                return Ok(());
            };

            if answer.eq_ignore_ascii_case("x") {
                return Ok(());
            }
            if answer.eq_ignore_ascii_case("c") {
                return self.handle_checkout();
            }
            self.say("Invalid input, please try again")?;
        }
    }

    fn handle_checkout(&mut self) -> Result<()> {
        if self.cart.is_empty() {
            self.say(&format!(
                "{}Your cart is empty, there is nothing to check out.",
                INFO
            ))?;
            return Ok(());
        }

        let outcome = Checkout::new(&mut self.console, &mut self.cart, self.order)?.run()?;
        match outcome {
            CheckoutOutcome::Completed(receipt) => {
                info!(
                    "Order {} paid: total {}, change {}",
                    receipt.number,
                    receipt.total,
                    receipt.change()
                );
            }
            CheckoutOutcome::Aborted(reason) => {
                info!("Checkout not completed ({:?}), cart kept with {} items", reason, self.cart.len());
            }
        }
        Ok(())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.console.say(message).context("Failed to write output")
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.console.ask(prompt).context("Failed to read input")
    }
}
