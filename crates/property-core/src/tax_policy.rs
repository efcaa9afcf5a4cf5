//! Transfer Tax Policy
//!
//! Colombian property-transfer tax computed over three brackets expressed in
//! UVT (Unidad de Valor Tributario). All arithmetic is exact decimal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// UVT value for policy year 2024
pub const UVT_2024: Decimal = dec!(49700);

/// Bracket a transaction value falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxBracket {
    /// Below the low threshold, no tax
    Exempt,
    /// Between the thresholds (inclusive of the high one), rate on the excess
    Mid,
    /// Above the high threshold, rate on the excess plus a fixed surcharge
    High,
}

impl std::fmt::Display for TaxBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxBracket::Exempt => write!(f, "exempt"),
            TaxBracket::Mid => write!(f, "mid"),
            TaxBracket::High => write!(f, "high"),
        }
    }
}

/// Bracket schedule for the transfer tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Monetary worth of one UVT for the policy year
    pub unit_value: Decimal,
    /// Start of the mid bracket, in UVT
    pub low_threshold_units: Decimal,
    /// Start of the high bracket, in UVT
    pub high_threshold_units: Decimal,
    /// Rate applied to the excess over the low threshold
    pub mid_rate: Decimal,
    /// Rate applied to the excess over the high threshold
    pub high_rate: Decimal,
    /// Fixed amount added in the high bracket, in UVT
    pub fixed_surcharge_units: Decimal,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::colombia_2024()
    }
}

impl TaxPolicy {
    /// Schedule in effect for 2024
    pub fn colombia_2024() -> Self {
        Self {
            unit_value: UVT_2024,
            low_threshold_units: dec!(20000),
            high_threshold_units: dec!(50000),
            mid_rate: dec!(0.015),
            high_rate: dec!(0.03),
            fixed_surcharge_units: dec!(450),
        }
    }

    /// Same brackets, different UVT (another policy year)
    pub fn with_unit_value(unit_value: Decimal) -> Self {
        Self {
            unit_value,
            ..Self::colombia_2024()
        }
    }

    /// Low threshold in monetary units
    pub fn low_threshold(&self) -> Decimal {
        self.low_threshold_units * self.unit_value
    }

    /// High threshold in monetary units
    pub fn high_threshold(&self) -> Decimal {
        self.high_threshold_units * self.unit_value
    }

    /// Fixed surcharge of the high bracket in monetary units
    pub fn fixed_surcharge(&self) -> Decimal {
        self.fixed_surcharge_units * self.unit_value
    }

    /// Classify a value. The low threshold belongs to the mid bracket and so
    /// does the high threshold.
    pub fn bracket(&self, value: Decimal) -> TaxBracket {
        if value < self.low_threshold() {
            TaxBracket::Exempt
        } else if value <= self.high_threshold() {
            TaxBracket::Mid
        } else {
            TaxBracket::High
        }
    }

    /// Transfer tax owed on a sale of `value`.
    ///
    /// Negative values land in the exempt bracket and yield zero.
    pub fn compute_tax(&self, value: Decimal) -> Decimal {
        match self.bracket(value) {
            TaxBracket::Exempt => Decimal::ZERO,
            TaxBracket::Mid => (value - self.low_threshold()) * self.mid_rate,
            TaxBracket::High => {
                (value - self.high_threshold()) * self.high_rate + self.fixed_surcharge()
            }
        }
    }
}

/// Transfer tax under the 2024 schedule
pub fn compute_tax(value: Decimal) -> Decimal {
    TaxPolicy::colombia_2024().compute_tax(value)
}
