//! Line-item cost estimator.
//!
//! A flat list recomputed on every change. Prices are exact decimals rounded
//! to cents half away from zero.

use std::io;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::format::to_cents;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("margin_percent must be between 0 and 100")]
    MarginOutOfRange,

    #[error("line item amounts are too large to price")]
    Overflow,

    #[error("no line item at index {index} (estimate has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One editable estimator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub material_cost: Decimal,
    pub labor_hours: Decimal,
    pub labor_rate: Decimal,
    pub margin_percent: Decimal,
}

impl Default for CostLineItem {
    fn default() -> Self {
        Self {
            material_cost: Decimal::ZERO,
            labor_hours: Decimal::ZERO,
            labor_rate: Decimal::new(85, 0),
            margin_percent: Decimal::new(15, 0),
        }
    }
}

impl CostLineItem {
    pub fn labor_cost(&self) -> Result<Decimal, EstimateError> {
        self.labor_hours
            .checked_mul(self.labor_rate)
            .ok_or(EstimateError::Overflow)
    }

    pub fn subtotal(&self) -> Result<Decimal, EstimateError> {
        self.material_cost
            .checked_add(self.labor_cost()?)
            .ok_or(EstimateError::Overflow)
    }

    pub fn final_price(&self) -> Result<Decimal, EstimateError> {
        recompute(self)
    }

    /// The part of the final price that is margin.
    pub fn margin_amount(&self) -> Result<Decimal, EstimateError> {
        self.final_price()?
            .checked_sub(to_cents(self.subtotal()?))
            .ok_or(EstimateError::Overflow)
    }

    /// Rejects negative amounts, margins outside 0..=100 and rows whose
    /// price does not fit in a `Decimal`.
    pub fn validate(&self) -> Result<(), EstimateError> {
        for (field, value) in [
            ("material_cost", self.material_cost),
            ("labor_hours", self.labor_hours),
            ("labor_rate", self.labor_rate),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EstimateError::Negative { field });
            }
        }
        if self.margin_percent < Decimal::ZERO || self.margin_percent > Decimal::ONE_HUNDRED {
            return Err(EstimateError::MarginOutOfRange);
        }
        self.margin_amount().map(|_| ())
    }
}

/// `(material + hours * rate) * (1 + margin / 100)`, rounded to cents.
pub fn recompute(item: &CostLineItem) -> Result<Decimal, EstimateError> {
    let markup = Decimal::ONE
        .checked_add(item.margin_percent / Decimal::ONE_HUNDRED)
        .ok_or(EstimateError::Overflow)?;
    item.subtotal()?
        .checked_mul(markup)
        .map(to_cents)
        .ok_or(EstimateError::Overflow)
}

/// Running sums over an estimate, always at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimateTotals {
    pub material: Decimal,
    pub labor: Decimal,
    pub margin: Decimal,
    pub final_price: Decimal,
}

impl Default for EstimateTotals {
    fn default() -> Self {
        let zero = to_cents(Decimal::ZERO);
        Self {
            material: zero,
            labor: zero,
            margin: zero,
            final_price: zero,
        }
    }
}

impl EstimateTotals {
    fn add(self, item: &CostLineItem) -> Result<Self, EstimateError> {
        let sum = |acc: Decimal, value: Decimal| {
            acc.checked_add(value).ok_or(EstimateError::Overflow)
        };
        Ok(Self {
            material: sum(self.material, to_cents(item.material_cost))?,
            labor: sum(self.labor, to_cents(item.labor_cost()?))?,
            margin: sum(self.margin, item.margin_amount()?)?,
            final_price: sum(self.final_price, item.final_price()?)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostEstimate {
    items: Vec<CostLineItem>,
}

impl CostEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh estimate holding one default row.
    pub fn with_default_item() -> Self {
        Self {
            items: vec![CostLineItem::default()],
        }
    }

    pub fn items(&self) -> &[CostLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a default row and returns its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(CostLineItem::default());
        self.items.len() - 1
    }

    pub fn remove_all(&mut self) {
        self.items.clear();
    }

    pub fn remove_item(&mut self, index: usize) -> Result<CostLineItem, EstimateError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Replaces the row at `index` and returns its new price.
    ///
    /// The estimate is left untouched when the row is invalid or when the
    /// new totals would overflow.
    pub fn update_item(&mut self, index: usize, item: CostLineItem) -> Result<Decimal, EstimateError> {
        self.check_index(index)?;
        item.validate()?;
        let price = recompute(&item)?;

        let previous = std::mem::replace(&mut self.items[index], item);
        if let Err(e) = self.totals() {
            self.items[index] = previous;
            return Err(e);
        }
        Ok(price)
    }

    pub fn totals(&self) -> Result<EstimateTotals, EstimateError> {
        self.items
            .iter()
            .try_fold(EstimateTotals::default(), EstimateTotals::add)
    }

    fn check_index(&self, index: usize) -> Result<(), EstimateError> {
        if index >= self.items.len() {
            return Err(EstimateError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow {
    material_cost: Decimal,
    labor_hours: Decimal,
    labor_rate: Decimal,
    margin_percent: Decimal,
    final_price: String,
}

/// Header row plus one row per item; `final_price` always has two decimals.
pub fn export_csv(items: &[CostLineItem]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    if items.is_empty() {
        writer.write_record([
            "material_cost",
            "labor_hours",
            "labor_rate",
            "margin_percent",
            "final_price",
        ])?;
    }
    for item in items {
        let final_price = recompute(item)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        writer.serialize(CsvRow {
            material_cost: item.material_cost,
            labor_hours: item.labor_hours,
            labor_rate: item.labor_rate,
            margin_percent: item.margin_percent,
            final_price: final_price.to_string(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(material: i64, hours: i64, rate: i64, margin: i64) -> CostLineItem {
        CostLineItem {
            material_cost: Decimal::new(material, 0),
            labor_hours: Decimal::new(hours, 0),
            labor_rate: Decimal::new(rate, 0),
            margin_percent: Decimal::new(margin, 0),
        }
    }

    #[test]
    fn test_recompute() {
        assert_eq!(recompute(&item(100, 2, 50, 20)).unwrap().to_string(), "240.00");
        assert_eq!(recompute(&CostLineItem::default()).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_recompute_rounds_half_away_from_zero() {
        let item = CostLineItem {
            material_cost: Decimal::new(1, 2),
            labor_hours: Decimal::ZERO,
            labor_rate: Decimal::ZERO,
            margin_percent: Decimal::new(50, 0),
        };
        // 0.01 * 1.5 = 0.015
        assert_eq!(recompute(&item), Ok(Decimal::new(2, 2)));
    }

    #[test]
    fn test_validation() {
        assert!(item(100, 2, 50, 20).validate().is_ok());
        assert_eq!(
            item(-1, 0, 0, 0).validate(),
            Err(EstimateError::Negative { field: "material_cost" })
        );
        assert_eq!(item(0, 0, 0, 101).validate(), Err(EstimateError::MarginOutOfRange));
        assert_eq!(item(0, 0, 0, -1).validate(), Err(EstimateError::MarginOutOfRange));
        assert!(item(0, 0, 0, 100).validate().is_ok());
    }

    #[test]
    fn test_estimate_edits_and_totals() {
        let mut estimate = CostEstimate::with_default_item();
        assert_eq!(estimate.add_item(), 1);
        let price = estimate.update_item(1, item(100, 2, 50, 20)).unwrap();
        assert_eq!(price, Decimal::new(24000, 2));

        let totals = estimate.totals().unwrap();
        assert_eq!(totals.material, Decimal::new(100, 0));
        assert_eq!(totals.labor, Decimal::new(100, 0));
        assert_eq!(totals.margin, Decimal::new(40, 0));
        assert_eq!(totals.final_price, Decimal::new(240, 0));

        assert_eq!(
            estimate.update_item(5, CostLineItem::default()),
            Err(EstimateError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            estimate.update_item(0, item(0, -3, 0, 0)),
            Err(EstimateError::Negative { field: "labor_hours" })
        );

        estimate.remove_item(0).unwrap();
        assert_eq!(estimate.len(), 1);
        assert_eq!(estimate.items()[0], item(100, 2, 50, 20));

        estimate.remove_all();
        assert!(estimate.is_empty());
        assert_eq!(estimate.totals(), Ok(EstimateTotals::default()));
    }

    #[test]
    fn test_empty_totals_have_two_decimals() {
        let totals = CostEstimate::new().totals().unwrap();
        for value in [totals.material, totals.labor, totals.margin, totals.final_price] {
            assert_eq!(value.to_string(), "0.00");
        }
    }

    #[test]
    fn test_oversized_item_is_rejected_and_not_stored() {
        let huge = CostLineItem {
            material_cost: Decimal::ZERO,
            labor_hours: Decimal::MAX,
            labor_rate: Decimal::new(2, 0),
            margin_percent: Decimal::ZERO,
        };
        assert_eq!(huge.labor_cost(), Err(EstimateError::Overflow));
        assert_eq!(recompute(&huge), Err(EstimateError::Overflow));
        assert_eq!(huge.validate(), Err(EstimateError::Overflow));

        let mut estimate = CostEstimate::with_default_item();
        assert_eq!(estimate.update_item(0, huge), Err(EstimateError::Overflow));
        assert_eq!(estimate.items()[0], CostLineItem::default());
        assert!(estimate.totals().is_ok());
    }

    #[test]
    fn test_update_rejected_when_totals_would_overflow() {
        let big = CostLineItem {
            material_cost: Decimal::MAX,
            labor_hours: Decimal::ZERO,
            labor_rate: Decimal::ZERO,
            margin_percent: Decimal::ZERO,
        };
        assert!(big.validate().is_ok());

        let mut estimate = CostEstimate::with_default_item();
        estimate.add_item();
        estimate.update_item(0, big).unwrap();
        assert_eq!(estimate.update_item(1, big), Err(EstimateError::Overflow));
        assert_eq!(estimate.items()[1], CostLineItem::default());
        assert!(estimate.totals().is_ok());
    }

    #[test]
    fn test_export_csv_default_item() {
        let csv = export_csv(&[CostLineItem::default()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "material_cost,labor_hours,labor_rate,margin_percent,final_price");
        assert_eq!(lines[1], "0,0,85,15,0.00");
    }

    #[test]
    fn test_export_csv_matches_recompute() {
        let items = [item(100, 2, 50, 20), item(10, 1, 85, 15)];
        let csv = export_csv(&items).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let prices: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(4).unwrap().to_string())
            .collect();
        assert_eq!(prices, vec!["240.00", "109.25"]);
    }

    #[test]
    fn test_export_csv_empty_still_has_header() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "material_cost,labor_hours,labor_rate,margin_percent,final_price");
    }
}
