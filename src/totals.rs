//! Invoice totals engine and the line editor that keeps them current.
//!
//! Amounts are exact decimals. Prices, rates and hours are kept to cents and
//! bounded; line totals are their exact products. Only the tax is rounded to
//! cents (half away from zero), so `total == subtotal + tax` holds exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::model::{InvoiceItem, LaborCharge, Part};

/// German VAT (MwSt.).
pub const VAT_RATE: Decimal = dec!(0.19);

pub const DEFAULT_LABOR_HOURS: Decimal = dec!(1);
pub const DEFAULT_LABOR_RATE: Decimal = dec!(60);

/// Decimal places kept for prices, rates and hours.
pub const INPUT_DP: u32 = 2;
/// Largest unit price or hourly rate accepted on a line.
pub const MAX_AMOUNT: Decimal = dec!(1000000);
pub const MAX_HOURS: Decimal = dec!(1000);
pub const MAX_QUANTITY: u32 = 10_000;
/// Largest invoice subtotal. Together with the input bounds this keeps every
/// stored amount well inside the digits a JSON number carries exactly.
pub const MAX_SUBTOTAL: Decimal = dec!(1000000000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn too_large(what: &str) -> AppError {
    AppError::InvalidInput(format!("{what} is too large"))
}

pub fn item_total(quantity: u32, unit_price: Decimal) -> Result<Decimal> {
    Decimal::from(quantity)
        .checked_mul(unit_price)
        .ok_or_else(|| too_large("item total"))
}

pub fn labor_total(hours: Decimal, rate_per_hour: Decimal) -> Result<Decimal> {
    hours
        .checked_mul(rate_per_hour)
        .ok_or_else(|| too_large("labor total"))
}

pub fn compute_totals(items: &[InvoiceItem], labor: &[LaborCharge]) -> Result<Totals> {
    let subtotal = items
        .iter()
        .map(|i| i.total)
        .chain(labor.iter().map(|l| l.total))
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line))
        .filter(|subtotal| *subtotal <= MAX_SUBTOTAL)
        .ok_or_else(|| too_large("invoice subtotal"))?;
    let tax = round2(subtotal * VAT_RATE);
    Ok(Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    })
}

/// Checks a price or rate and brings it to cents.
fn money(value: Decimal, what: &str) -> Result<Decimal> {
    if value.is_sign_negative() {
        return Err(AppError::InvalidInput(format!("{what} must not be negative")));
    }
    if value > MAX_AMOUNT {
        return Err(too_large(what));
    }
    Ok(round2(value))
}

/// Editable set of invoice lines. Every mutation recomputes the touched line
/// and the invoice totals, so `totals()` is always consistent with the rows.
/// A mutation that fails leaves the draft unchanged.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDraft {
    items: Vec<InvoiceItem>,
    labor: Vec<LaborCharge>,
    totals: Totals,
    labor_rate: Decimal,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::with_labor_rate(DEFAULT_LABOR_RATE)
    }

    pub fn with_labor_rate(labor_rate: Decimal) -> Self {
        InvoiceDraft {
            labor_rate,
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn labor(&self) -> &[LaborCharge] {
        &self.labor
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.labor.is_empty()
    }

    pub fn into_lines(self) -> (Vec<InvoiceItem>, Vec<LaborCharge>, Totals) {
        (self.items, self.labor, self.totals)
    }

    fn commit(&mut self, items: Vec<InvoiceItem>, labor: Vec<LaborCharge>) -> Result<()> {
        self.totals = compute_totals(&items, &labor)?;
        self.items = items;
        self.labor = labor;
        Ok(())
    }

    fn check_item(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!("item row {index} out of range (rows: {})", self.items.len())))
        }
    }

    fn check_labor(&self, index: usize) -> Result<()> {
        if index < self.labor.len() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!("labor row {index} out of range (rows: {})", self.labor.len())))
        }
    }

    fn edit_item(&mut self, index: usize, edit: impl FnOnce(&mut InvoiceItem)) -> Result<()> {
        self.check_item(index)?;
        let mut items = self.items.clone();
        let item = &mut items[index];
        edit(item);
        item.total = item_total(item.quantity, item.unit_price)?;
        self.commit(items, self.labor.clone())
    }

    fn edit_labor(&mut self, index: usize, edit: impl FnOnce(&mut LaborCharge)) -> Result<()> {
        self.check_labor(index)?;
        let mut labor = self.labor.clone();
        let charge = &mut labor[index];
        edit(charge);
        charge.total = labor_total(charge.hours, charge.rate_per_hour)?;
        self.commit(self.items.clone(), labor)
    }

    /// Appends an empty item row and returns its index.
    pub fn add_item(&mut self) -> Result<usize> {
        let mut items = self.items.clone();
        items.push(InvoiceItem {
            part_id: String::new(),
            name: String::new(),
            quantity: 1,
            unit_price: Decimal::ZERO,
            total: Decimal::ZERO,
        });
        self.commit(items, self.labor.clone())?;
        Ok(self.items.len() - 1)
    }

    /// Links the row to a stocked part, taking over its name and price.
    pub fn select_part(&mut self, index: usize, part: &Part) -> Result<()> {
        let price = money(part.price, "part price")?;
        self.edit_item(index, |item| {
            item.part_id = part.id.clone();
            item.name = part.name.clone();
            item.unit_price = price;
        })
    }

    pub fn set_item_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.edit_item(index, |item| item.name = name)
    }

    pub fn set_item_quantity(&mut self, index: usize, quantity: u32) -> Result<()> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(AppError::InvalidInput(format!("quantity must be between 1 and {MAX_QUANTITY}")));
        }
        self.edit_item(index, |item| item.quantity = quantity)
    }

    pub fn set_item_unit_price(&mut self, index: usize, unit_price: Decimal) -> Result<()> {
        let unit_price = money(unit_price, "unit price")?;
        self.edit_item(index, |item| item.unit_price = unit_price)
    }

    pub fn remove_item(&mut self, index: usize) -> Result<InvoiceItem> {
        self.check_item(index)?;
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.commit(items, self.labor.clone())?;
        Ok(removed)
    }

    /// Appends a labor row with the default hours and rate and returns its index.
    pub fn add_labor(&mut self) -> Result<usize> {
        let rate_per_hour = money(self.labor_rate, "hourly rate")?;
        let mut labor = self.labor.clone();
        labor.push(LaborCharge {
            description: String::new(),
            hours: DEFAULT_LABOR_HOURS,
            rate_per_hour,
            total: labor_total(DEFAULT_LABOR_HOURS, rate_per_hour)?,
        });
        self.commit(self.items.clone(), labor)?;
        Ok(self.labor.len() - 1)
    }

    pub fn set_labor_description(&mut self, index: usize, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        self.edit_labor(index, |charge| charge.description = description)
    }

    pub fn set_labor_hours(&mut self, index: usize, hours: Decimal) -> Result<()> {
        let hours = round2(hours);
        if hours <= Decimal::ZERO {
            return Err(AppError::InvalidInput("hours must be positive".into()));
        }
        if hours > MAX_HOURS {
            return Err(too_large("hours"));
        }
        self.edit_labor(index, |charge| charge.hours = hours)
    }

    pub fn set_labor_rate(&mut self, index: usize, rate_per_hour: Decimal) -> Result<()> {
        let rate_per_hour = money(rate_per_hour, "hourly rate")?;
        self.edit_labor(index, |charge| charge.rate_per_hour = rate_per_hour)
    }

    pub fn remove_labor(&mut self, index: usize) -> Result<LaborCharge> {
        self.check_labor(index)?;
        let mut labor = self.labor.clone();
        let removed = labor.remove(index);
        self.commit(self.items.clone(), labor)?;
        Ok(removed)
    }
}
