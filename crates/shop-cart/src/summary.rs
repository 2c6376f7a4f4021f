//! Cart totals as shown to the shopper.
//!
//! Every surface that shows a payable amount (cart page, checkout) builds a
//! [`CartSummary`] from the same state and the same [`TaxRate`], so they
//! cannot disagree.

use crate::cart::CartState;
use crate::money::Money;
use serde::Serialize;

/// A tax rate in basis points (1/100 of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaxRate {
    basis_points: u32,
}

impl TaxRate {
    /// No tax.
    pub const ZERO: TaxRate = TaxRate { basis_points: 0 };

    /// Maximum accepted rate (100%).
    const MAX_BASIS_POINTS: u32 = 10_000;

    pub fn from_basis_points(basis_points: u32) -> Option<Self> {
        (basis_points <= Self::MAX_BASIS_POINTS).then_some(Self { basis_points })
    }

    /// Build from a percentage such as `10.0`. Rejects negative, NaN and
    /// values above 100.
    pub fn from_percent(percent: f64) -> Option<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return None;
        }
        let bps = (percent * 100.0).round();
        if bps > Self::MAX_BASIS_POINTS as f64 {
            return None;
        }
        Self::from_basis_points(bps as u32)
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }

    pub fn as_percent(&self) -> f64 {
        self.basis_points as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.basis_points == 0
    }
}

/// Subtotal, tax and payable total for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl CartSummary {
    pub fn from_state(state: &CartState, tax_rate: TaxRate) -> Self {
        let subtotal = state.subtotal();
        let tax = subtotal.scale_basis_points(tax_rate.basis_points());
        Self {
            line_count: state.line_count(),
            item_count: state.item_count(),
            subtotal,
            tax_rate,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}
