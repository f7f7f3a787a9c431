//! Mortgage amortization and floor-area conversions.

use serde::{Deserialize, Serialize};

/// Square feet to square meters, used when displaying floor area
pub const SQFT_TO_SQM: f64 = 0.092903;

/// Square meters per square foot, used when reading agent input.
///
/// Differs from [`SQFT_TO_SQM`] in the fourth significant digit, so a
/// sqft -> sqm -> sqft round trip drifts by roughly 0.003%.
pub const SQM_PER_SQFT_INPUT: f64 = 0.0929;

pub const DEFAULT_DOWN_PAYMENT_SHARE: f64 = 0.2;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 6.5;
pub const DEFAULT_TERM_YEARS: u32 = 30;
/// Longest loan term the calculator accepts
pub const MAX_TERM_YEARS: u32 = 100;

/// Inputs to a fixed-rate mortgage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParams {
    pub price: f64,
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl LoanParams {
    /// Defaults shown on a listing page: 20% down, 6.5%, 30 years
    pub fn for_price(price: f64) -> Self {
        Self {
            price,
            down_payment: price * DEFAULT_DOWN_PAYMENT_SHARE,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
        }
    }

    pub fn principal(&self) -> f64 {
        self.price - self.down_payment
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    pub fn payment_count(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(
            self.price,
            self.down_payment,
            self.annual_rate_percent,
            self.term_years,
        )
    }

    pub fn quote(&self) -> LoanQuote {
        let monthly_payment = self.monthly_payment();
        let payment_count = self.payment_count();
        let total_paid = finite_or_zero(monthly_payment * f64::from(payment_count));
        let total_interest = if total_paid > 0.0 {
            finite_or_zero(total_paid - self.principal())
        } else {
            0.0
        };

        LoanQuote {
            params: *self,
            principal: self.principal(),
            monthly_payment,
            payment_count,
            total_paid,
            total_interest,
        }
    }
}

/// Computed repayment figures for a [`LoanParams`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub params: LoanParams,
    pub principal: f64,
    pub monthly_payment: f64,
    pub payment_count: u32,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Standard amortized monthly payment.
///
/// Returns 0 when the price is not positive or the formula does not produce
/// a finite number (a zero rate divides 0 by 0).
pub fn monthly_payment(
    price: f64,
    down_payment: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }

    let principal = price - down_payment;
    let rate = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + rate).powf(f64::from(term_years) * 12.0);
    let payment = principal * (rate * growth) / (growth - 1.0);

    finite_or_zero(payment)
}

pub fn sqft_to_sqm(sqft: f64) -> f64 {
    (sqft * SQFT_TO_SQM).round()
}

pub fn sqm_to_sqft(sqm: f64) -> f64 {
    sqm / SQM_PER_SQFT_INPUT
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_year_mortgage_matches_reference_tables() {
        let payment = monthly_payment(300_000.0, 60_000.0, 6.5, 30);
        assert!((payment - 1516.96).abs() < 0.01, "got {}", payment);
    }

    #[test]
    fn fully_paid_down_is_zero() {
        assert_eq!(monthly_payment(450_000.0, 450_000.0, 7.25, 15), 0.0);
    }

    #[test]
    fn zero_rate_does_not_leak_nan() {
        assert_eq!(monthly_payment(300_000.0, 60_000.0, 0.0, 30), 0.0);
    }

    #[test]
    fn zero_term_does_not_leak_nan() {
        assert_eq!(monthly_payment(300_000.0, 60_000.0, 6.5, 0), 0.0);
    }

    #[test]
    fn non_positive_price_is_zero() {
        assert_eq!(monthly_payment(0.0, 0.0, 6.5, 30), 0.0);
        assert_eq!(monthly_payment(-10.0, 0.0, 6.5, 30), 0.0);
    }

    #[test]
    fn listing_defaults() {
        let params = LoanParams::for_price(1_000_000.0);
        assert_eq!(params.down_payment, 200_000.0);
        assert_eq!(params.principal(), 800_000.0);
        assert_eq!(params.payment_count(), 360);
        assert!((params.monthly_rate() - 0.065 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn quote_totals_are_consistent() {
        let quote = LoanParams {
            price: 300_000.0,
            down_payment: 60_000.0,
            annual_rate_percent: 6.5,
            term_years: 30,
        }
        .quote();

        assert_eq!(quote.principal, 240_000.0);
        assert!((quote.total_paid - quote.monthly_payment * 360.0).abs() < 1e-6);
        assert!((quote.total_interest - (quote.total_paid - 240_000.0)).abs() < 1e-6);
    }

    #[test]
    fn absurd_term_neither_panics_nor_leaks_nan() {
        let quote = LoanParams {
            price: 300_000.0,
            down_payment: 0.0,
            annual_rate_percent: 6.5,
            term_years: 400_000_000,
        }
        .quote();
        assert_eq!(quote.payment_count, u32::MAX);
        assert!(quote.monthly_payment.is_finite());
        assert!(quote.total_paid.is_finite());
    }

    #[test]
    fn quote_with_zero_rate_reports_zero_totals() {
        let quote = LoanParams {
            price: 100_000.0,
            down_payment: 0.0,
            annual_rate_percent: 0.0,
            term_years: 10,
        }
        .quote();
        assert_eq!(quote.monthly_payment, 0.0);
        assert_eq!(quote.total_paid, 0.0);
        assert_eq!(quote.total_interest, 0.0);
    }

    #[test]
    fn converts_floor_area() {
        assert_eq!(sqft_to_sqm(6500.0), 604.0);
        assert_eq!(sqft_to_sqm(0.0), 0.0);
    }

    #[test]
    fn round_trip_drift_stays_small() {
        for sqft in [500.0, 1_400.0, 6_500.0, 25_000.0] {
            let back = sqm_to_sqft(sqft_to_sqm(sqft));
            let drift = (back - sqft).abs() / sqft;
            // rounding to whole sqm dominates for small areas
            assert!(drift < 0.01, "{} sqft came back as {}", sqft, back);
        }
    }
}
