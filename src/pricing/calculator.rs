use std::fmt;

use crate::catalog::Catalog;
use crate::catalog::material::{MaterialKind, MaterialOption, Pricing};
use crate::foundation::math::round_cents;
use crate::scene::model::ArtworkSpec;
use crate::scene::selection::SelectionState;

/// Integral amount in minor currency units (cents).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Money(pub i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// Amount in cents.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// Fees and surcharges. Amounts in cents, markups in whole percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Always charged.
    pub mounting_fee: i64,
    /// Charged when the artwork is float-mounted.
    pub float_mount_fee: i64,
    /// Charged for glass spacers, only together with a float mount.
    pub glass_spacer_fee: i64,
    /// Charged once when a middle or bottom mat is active.
    pub advanced_matting_fee: i64,
    /// Markup on middle/bottom mat prices for cutting and alignment.
    pub extra_mat_markup_pct: i64,
    /// Markup on the stacked moulding's perimeter price.
    pub stacked_frame_markup_pct: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            mounting_fee: 2500,
            float_mount_fee: 5000,
            glass_spacer_fee: 3500,
            advanced_matting_fee: 1500,
            extra_mat_markup_pct: 10,
            stacked_frame_markup_pct: 20,
        }
    }
}

/// One priced component.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PriceLine {
    /// Display label.
    pub label: String,
    /// Amount, already rounded to the cent.
    pub amount: Money,
}

/// Itemized price; `total` is the exact sum of the lines.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PriceBreakdown {
    /// Components in display order.
    pub lines: Vec<PriceLine>,
    /// Sum of all lines.
    pub total: Money,
}

/// Derives the price of a selection from the artwork perimeter and catalog records.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriceCalculator {
    config: PricingConfig,
}

impl PriceCalculator {
    /// Calculator with explicit fees.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Fees in use.
    pub fn config(&self) -> PricingConfig {
        self.config
    }

    /// Total price.
    pub fn price(&self, selection: &SelectionState, artwork: ArtworkSpec, catalog: &Catalog) -> Money {
        self.breakdown(selection, artwork, catalog).total
    }

    /// Itemized price.
    #[tracing::instrument(level = "trace", skip(self, selection, catalog))]
    pub fn breakdown(
        &self,
        selection: &SelectionState,
        artwork: ArtworkSpec,
        catalog: &Catalog,
    ) -> PriceBreakdown {
        let cfg = &self.config;
        let perimeter = artwork.perimeter();
        let mut lines = Vec::new();
        let mut push = |label: String, cents: f64| {
            lines.push(PriceLine {
                label,
                amount: Money(round_cents(cents.max(0.0))),
            });
        };

        let frame = catalog.get(MaterialKind::Frame, selection.frame_index);
        push(format!("Frame: {}", frame.name), material_cost(frame, perimeter));

        if let Some(i) = selection.active_stacked_frame(catalog) {
            let stacked = catalog.get(MaterialKind::Frame, i);
            push(
                format!("Stacked frame: {}", stacked.name),
                marked_up(material_cost(stacked, perimeter), cfg.stacked_frame_markup_pct),
            );
        }

        let top = catalog.get(MaterialKind::Mat, selection.mat_index);
        push(format!("Top mat: {}", top.name), material_cost(top, perimeter));

        if let Some(i) = selection.active_middle_mat(catalog) {
            let mat = catalog.get(MaterialKind::Mat, i);
            push(
                format!("Middle mat: {}", mat.name),
                marked_up(material_cost(mat, perimeter), cfg.extra_mat_markup_pct),
            );
        }
        if let Some(i) = selection.active_bottom_mat(catalog) {
            let mat = catalog.get(MaterialKind::Mat, i);
            push(
                format!("Bottom mat: {}", mat.name),
                marked_up(material_cost(mat, perimeter), cfg.extra_mat_markup_pct),
            );
        }

        if let Some(i) = selection.glass_index {
            let glass = catalog.get(MaterialKind::Glass, i);
            push(format!("Glass: {}", glass.name), material_cost(glass, perimeter));
        }

        push("Mounting".to_owned(), cfg.mounting_fee as f64);
        if selection.use_middle_mat || selection.use_bottom_mat {
            push("Advanced matting".to_owned(), cfg.advanced_matting_fee as f64);
        }
        if selection.use_float_mount {
            push("Float mount".to_owned(), cfg.float_mount_fee as f64);
            if selection.use_glass_spacer {
                push("Glass spacers".to_owned(), cfg.glass_spacer_fee as f64);
            }
        }

        let total = lines.iter().map(|l| l.amount).sum();
        PriceBreakdown { lines, total }
    }
}

fn material_cost(option: &MaterialOption, perimeter: f64) -> f64 {
    match option.pricing {
        Pricing::PerInch(rate) => rate as f64 * perimeter,
        Pricing::Flat(cents) => cents as f64,
    }
}

fn marked_up(cents: f64, pct: i64) -> f64 {
    cents * (100 + pct) as f64 / 100.0
}

#[cfg(test)]
#[path = "../../tests/unit/pricing/calculator.rs"]
mod tests;
