use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvestorStateError;
use crate::types::{Money, Rate};
use crate::InvestorStateResult;

/// Period index assigned to the first element of a cash-flow series.
///
/// LROMA books the capital outlay at t = 0 (undiscounted) while FMIP
/// discounts every flow starting at t = 1. The two conventions give
/// different results for the same series and must stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodOrigin {
    /// First flow sits at t = 0 and is not discounted
    Outlay,
    /// First flow sits at t = 1
    FirstPeriod,
}

impl PeriodOrigin {
    pub fn first_period(self) -> u32 {
        match self {
            PeriodOrigin::Outlay => 0,
            PeriodOrigin::FirstPeriod => 1,
        }
    }
}

/// Present value of a series: sum of `cf_i / (1 + rate)^(i + origin)`.
///
/// An empty series is worth zero. A rate of exactly -100% makes every
/// discount factor zero and is rejected; rates below that discount with
/// alternating sign.
pub fn present_value(
    rate: Rate,
    cash_flows: &[Money],
    origin: PeriodOrigin,
) -> InvestorStateResult<Money> {
    present_value_of(rate, cash_flows.iter().copied(), origin)
}

/// [`present_value`] over a lazily produced series.
pub fn present_value_of<I>(
    rate: Rate,
    cash_flows: I,
    origin: PeriodOrigin,
) -> InvestorStateResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    if rate == dec!(-1) {
        return Err(InvestorStateError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate of -100% gives a zero discount factor".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut discount = match origin {
        PeriodOrigin::Outlay => Decimal::ONE,
        PeriodOrigin::FirstPeriod => one_plus_r,
    };
    let mut result = Decimal::ZERO;

    for (i, cf) in cash_flows.into_iter().enumerate() {
        let t = i as u64 + u64::from(origin.first_period());
        if i > 0 {
            discount = discount
                .checked_mul(one_plus_r)
                .ok_or_else(|| out_of_range(t))?;
        }
        let discounted = cf.checked_div(discount).ok_or_else(|| out_of_range(t))?;
        result = result
            .checked_add(discounted)
            .ok_or_else(|| out_of_range(t))?;
    }

    Ok(result)
}

/// Net Present Value with the first flow at t = 0
pub fn npv(rate: Rate, cash_flows: &[Money]) -> InvestorStateResult<Money> {
    present_value(rate, cash_flows, PeriodOrigin::Outlay)
}

fn out_of_range(t: u64) -> InvestorStateError {
    InvestorStateError::InvalidInput {
        field: "rate".into(),
        reason: format!("Discount factor out of decimal range at period {t}"),
    }
}
