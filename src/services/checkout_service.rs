use std::str::FromStr;

use anyhow::{Context, Result};
use console::style;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cli::{console::Console, CHECKMARK, CROSS, WARNING},
    models::{
        cart::{Cart, CartError},
        receipt::Receipt,
    },
    utils::formatting::{format_money, format_receipt, ListingOrder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
}

#[derive(Error, Debug)]
#[error("Unknown payment method '{0}'")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// How a tendered cash amount compares with the amount due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tender {
    Insufficient { short: Decimal },
    Exact,
    Change(Decimal),
}

impl Tender {
    pub fn evaluate(total: Decimal, tendered: Decimal) -> Self {
        if tendered < total {
            Tender::Insufficient {
                short: total - tendered,
            }
        } else if tendered == total {
            Tender::Exact
        } else {
            Tender::Change(tendered - total)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    Declined,
    InputClosed,
}

#[derive(Debug)]
pub enum CheckoutOutcome {
    Completed(Receipt),
    Aborted(AbortReason),
}

#[derive(Debug)]
enum CheckoutState {
    Confirm,
    PaymentMethod,
    CashCollection,
    Receipt { tendered: Decimal },
    Cleared(Receipt),
    Aborted(AbortReason),
}

/// One checkout over a borrowed cart. The cart is only emptied when the
/// receipt is issued; every abort path leaves it as it was.
pub struct Checkout<'a, C: Console> {
    console: &'a mut C,
    cart: &'a mut Cart,
    order: ListingOrder,
    total: Decimal,
}

impl<'a, C: Console> Checkout<'a, C> {
    pub fn new(
        console: &'a mut C,
        cart: &'a mut Cart,
        order: ListingOrder,
    ) -> Result<Self, CartError> {
        let total = cart.total()?;
        Ok(Self {
            console,
            cart,
            order,
            total,
        })
    }

    pub fn run(mut self) -> Result<CheckoutOutcome> {
        info!(
            "Checkout started for {} items, total {}",
            self.cart.len(),
            self.total
        );

        let mut state = CheckoutState::Confirm;
        loop {
            debug!("Checkout state: {:?}", state);
            state = match state {
                CheckoutState::Confirm => self.confirm()?,
                CheckoutState::PaymentMethod => self.choose_payment()?,
                CheckoutState::CashCollection => self.collect_cash()?,
                CheckoutState::Receipt { tendered } => self.issue_receipt(tendered)?,
                CheckoutState::Cleared(receipt) => {
                    info!("Checkout completed, receipt {}", receipt.number);
                    return Ok(CheckoutOutcome::Completed(receipt));
                }
                CheckoutState::Aborted(reason) => {
                    info!("Checkout aborted: {:?}", reason);
                    return Ok(CheckoutOutcome::Aborted(reason));
                }
            };
        }
    }

    fn confirm(&mut self) -> Result<CheckoutState> {
        self.say("You are going to buy:")?;
        let names: Vec<String> = self.cart.items().iter().map(|item| item.name.clone()).collect();
        for name in names {
            self.say(&name)?;
        }
        let total_line = format!("Your total is: {}", format_money(self.total));
        self.say(&total_line)?;

        loop {
            let Some(answer) = self.ask("Do you want to finish? (yes/no)")? else {
                return Ok(CheckoutState::Aborted(AbortReason::InputClosed));
            };

            match answer.to_lowercase().as_str() {
                "yes" | "y" => return Ok(CheckoutState::PaymentMethod),
                "no" | "n" => {
                    self.say("Checkout cancelled, your cart has been kept.")?;
                    return Ok(CheckoutState::Aborted(AbortReason::Declined));
                }
                _ => self.say("Please answer \"yes\" or \"no\".")?,
            }
        }
    }

    fn choose_payment(&mut self) -> Result<CheckoutState> {
        loop {
            let Some(answer) = self.ask("How would you pay? (card/cash)")? else {
                return Ok(CheckoutState::Aborted(AbortReason::InputClosed));
            };

            match answer.parse::<PaymentMethod>() {
                Ok(PaymentMethod::Cash) => return Ok(CheckoutState::CashCollection),
                Ok(PaymentMethod::Card) => {
                    let message = format!(
                        "{}{}",
                        WARNING,
                        style("Card payments are not supported yet, please pay with cash.").yellow()
                    );
                    self.say(&message)?;
                }
                Err(e) => {
                    debug!("{}", e);
                    self.say("Unknown payment method, please write \"card\" or \"cash\".")?;
                }
            }
        }
    }

    fn collect_cash(&mut self) -> Result<CheckoutState> {
        loop {
            let Some(answer) = self.ask("Please enter your amount:")? else {
                return Ok(CheckoutState::Aborted(AbortReason::InputClosed));
            };

            let Some(tendered) = parse_amount(&answer) else {
                self.say("Please enter a valid amount.")?;
                continue;
            };

            match Tender::evaluate(self.total, tendered) {
                Tender::Insufficient { short } => {
                    let message = format!(
                        "{}{}",
                        CROSS,
                        style(format!(
                            "That is not enough, you are short {}. Please try again.",
                            format_money(short)
                        ))
                        .red()
                    );
                    self.say(&message)?;
                }
                Tender::Exact => {
                    let message = format!("{}{}", CHECKMARK, style("Thank you for the exact amount").green());
                    self.say(&message)?;
                    return Ok(CheckoutState::Receipt { tendered });
                }
                Tender::Change(change) => {
                    let message = format!("Your change is: {}", format_money(change));
                    self.say(&message)?;
                    return Ok(CheckoutState::Receipt { tendered });
                }
            }
        }
    }

    fn issue_receipt(&mut self, tendered: Decimal) -> Result<CheckoutState> {
        let items = self.cart.settle();
        let receipt = Receipt::new(items, self.total, tendered);

        let text = format_receipt(&receipt, self.order);
        self.say(&text)?;
        Ok(CheckoutState::Cleared(receipt))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.console
            .say(message)
            .context("Failed to write checkout output")
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.console
            .ask(prompt)
            .context("Failed to read checkout input")
    }
}

/// Accepts `50`, `50.5`, `$50.00`; rejects negatives and anything non-numeric.
fn parse_amount(input: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(input.trim().trim_start_matches('$')).ok()?;
    if amount < Decimal::ZERO {
        None
    } else {
        Some(amount)
    }
}
