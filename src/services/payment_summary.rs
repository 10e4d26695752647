use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub base_total: Decimal,
    pub points_to_use: u64,
    pub final_price: Decimal,
}

impl PaymentSummary {
    /// Ticket price times quantity. Fails instead of overflowing.
    pub fn base_total(price: Decimal, quantity: u32) -> Result<Decimal, AppError> {
        price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| AppError::invalid_field("total_price", "Total price is too large"))
    }

    /// Points cover at most the whole base total and never more than the
    /// balance; the remainder is what the customer transfers.
    pub fn compute(
        base_total: Decimal,
        use_points: bool,
        available_points: u64,
        voucher_code: Option<&str>,
    ) -> Result<Self, AppError> {
        check_voucher(voucher_code)?;

        if base_total < Decimal::ZERO {
            return Err(AppError::invalid_field(
                "total_price",
                "Total price cannot be negative",
            ));
        }
        if !base_total.fract().is_zero() {
            return Err(AppError::invalid_field(
                "total_price",
                "Total price must be a whole amount",
            ));
        }
        let whole_total = base_total
            .to_u64()
            .ok_or_else(|| AppError::invalid_field("total_price", "Total price is too large"))?;

        let points_to_use = if use_points {
            available_points.min(whole_total)
        } else {
            0
        };

        Ok(Self {
            base_total,
            points_to_use,
            final_price: base_total - Decimal::from(points_to_use),
        })
    }
}

/// No voucher store exists, so any code that is actually entered fails.
pub fn check_voucher(code: Option<&str>) -> Result<(), AppError> {
    match code.map(str::trim) {
        None | Some("") => Ok(()),
        Some(code) => {
            tracing::debug!(voucher_code = %code, "Voucher rejected");
            Err(AppError::VoucherInvalid)
        }
    }
}
