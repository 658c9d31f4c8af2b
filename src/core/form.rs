//! Modern order form model.
//!
//! `FormData` is never stored independently of the script: it is the
//! left-to-right fold of every step's [`FormPatch`] up to the current step.
//! Fields a patch leaves as `None` keep whatever an earlier step set, and
//! fields no step mentions keep their zero value.

use serde::{Deserialize, Serialize};

use super::script::Step;

/// Snapshot of the order form shown in the modern UI pane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub customer_id: String,
    pub customer_name: String,
    /// Price per gallon.
    pub rack_price: f64,
    pub tax: f64,
    pub total: f64,
    /// Gallons remaining in the tank.
    pub inventory: u32,
    /// Gallons on this order.
    pub gallons: u32,
}

/// Partial update carried by a step (`uiUpdates`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormPatch {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub rack_price: Option<f64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub inventory: Option<u32>,
    pub gallons: Option<u32>,
}

impl FormPatch {
    pub fn is_empty(&self) -> bool {
        *self == FormPatch::default()
    }
}

impl FormData {
    /// Merge a patch in place; later values overwrite earlier ones.
    pub fn apply(&mut self, patch: &FormPatch) {
        if let Some(ref id) = patch.customer_id {
            self.customer_id.clone_from(id);
        }
        if let Some(ref name) = patch.customer_name {
            self.customer_name.clone_from(name);
        }
        if let Some(price) = patch.rack_price {
            self.rack_price = price;
        }
        if let Some(tax) = patch.tax {
            self.tax = tax;
        }
        if let Some(total) = patch.total {
            self.total = total;
        }
        if let Some(inventory) = patch.inventory {
            self.inventory = inventory;
        }
        if let Some(gallons) = patch.gallons {
            self.gallons = gallons;
        }
    }

    /// Fold the patches of `steps` left to right onto an all-default form.
    pub fn fold<'a>(steps: impl IntoIterator<Item = &'a Step>) -> Self {
        steps.into_iter().fold(FormData::default(), |mut form, step| {
            form.apply(&step.ui_updates);
            form
        })
    }

    /// Rack price times gallons, before tax.
    pub fn subtotal(&self) -> f64 {
        self.rack_price * f64::from(self.gallons)
    }
}

/// Format a dollar amount as `$1,234.56` (negative values as `-$1.00`).
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `10000` → `"10,000"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
