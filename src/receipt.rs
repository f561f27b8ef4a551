//! Receipt

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, catalog::Inventory, pricing::Totals};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Currency code is not one the receipt can display.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Amount cannot be represented in the currency's minor units.
    #[error("amount out of range for display: {0}")]
    AmountOutOfRange(Decimal),

    /// Output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Look up a display currency by ISO code.
///
/// # Errors
///
/// Returns [`ReceiptError::UnknownCurrency`] for codes other than GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ReceiptError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(ReceiptError::UnknownCurrency(code.to_string())),
    }
}

/// Round `amount` to the currency's minor units for display.
///
/// # Errors
///
/// Returns [`ReceiptError::AmountOutOfRange`] if the amount does not fit in
/// an `i64` count of minor units.
pub fn money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, ReceiptError> {
    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or(ReceiptError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// A cart priced at a given sales tax rate, ready to print.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    cart: &'a Cart,
    totals: Totals,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Price `cart` at `sales_tax_rate`, displaying amounts in `currency`.
    pub fn new(cart: &'a Cart, sales_tax_rate: Decimal, currency: &'static Currency) -> Self {
        Self {
            cart,
            totals: cart.totals(sales_tax_rate),
            currency,
        }
    }

    /// Total breakdown for the cart.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Currency used for display.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the line table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be displayed or the output cannot
    /// be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Title", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.cart.items().iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.id.clone(),
                line.title.clone(),
                self.format(line.price)?,
                line.quantity.to_string(),
                self.format(line.line_total())?,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let totals = &self.totals;

        let mut lines = vec![("Subtotal:", self.format(totals.sub_total)?)];

        if !self.cart.coupons().is_empty() {
            let codes: Vec<&str> = self
                .cart
                .coupons()
                .iter()
                .map(|coupon| coupon.code.as_str())
                .collect();

            lines.push(("Coupons:", codes.join(", ")));
        }

        if !totals.flat_reduction.is_zero() {
            lines.push(("Flat discount:", self.format(-totals.flat_reduction)?));
        }

        if !totals.percent_reduction.is_zero() {
            lines.push(("Percent discount:", self.format(-totals.percent_reduction)?));
        }

        if !totals.savings().is_zero() {
            lines.push(("You saved:", self.format(totals.savings())?));
        }

        lines.push(("Tax:", self.format(totals.tax)?));
        lines.push(("Shipping:", self.shipping_label()?));
        lines.push(("Total:", self.format(totals.total)?));

        let label_width = lines
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let value_width = lines
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }

    fn shipping_label(&self) -> Result<String, ReceiptError> {
        match self.cart.shipping_cost() {
            Some(cost) if self.totals.shipping_charged.is_zero() && !cost.is_zero() => {
                Ok(format!("{} (waived)", self.format(Decimal::ZERO)?))
            }
            _ => self.format(self.totals.shipping_charged),
        }
    }

    fn format(&self, amount: Decimal) -> Result<String, ReceiptError> {
        Ok(money(amount, self.currency)?.to_string())
    }
}

/// Writes a table of catalog items to `out`.
///
/// # Errors
///
/// Returns an error if a price cannot be displayed or the output cannot be
/// written.
pub fn write_inventory(
    mut out: impl io::Write,
    inventory: &Inventory,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Title", "Description", "Price", "Stock"]);

    for item in inventory.iter() {
        builder.push_record([
            item.id.clone(),
            item.title.clone(),
            item.description.clone(),
            money(item.price, currency)?.to_string(),
            item.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}
