use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::InvestorStateError;
use crate::types::Money;
use crate::InvestorStateResult;

/// Fiscal return per unit of public investment.
///
/// `Infinite` marks a positive return on zero discounted investment.
/// Serialized as a decimal string, or `"inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmipRatio {
    Finite(Decimal),
    Infinite,
}

impl FmipRatio {
    /// `total_fiscal_return / pv_public_investment`, with zero investment
    /// mapped to `Infinite` for a positive return and to zero otherwise.
    pub fn from_present_values(
        total_fiscal_return: Money,
        pv_public_investment: Money,
    ) -> InvestorStateResult<Self> {
        if pv_public_investment.is_zero() {
            return Ok(if total_fiscal_return > Decimal::ZERO {
                FmipRatio::Infinite
            } else {
                FmipRatio::Finite(Decimal::ZERO)
            });
        }
        total_fiscal_return
            .checked_div(pv_public_investment)
            .map(FmipRatio::Finite)
            .ok_or_else(|| InvestorStateError::InvalidInput {
                field: "public_investment_cashflows".into(),
                reason: "FMIP ratio out of decimal range".into(),
            })
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, FmipRatio::Infinite)
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            FmipRatio::Finite(v) => Some(*v),
            FmipRatio::Infinite => None,
        }
    }

    /// Lossy float view, with `Infinite` as `f64::INFINITY`.
    pub fn to_f64(&self) -> f64 {
        match self {
            FmipRatio::Finite(v) => v.to_f64().unwrap_or(f64::NAN),
            FmipRatio::Infinite => f64::INFINITY,
        }
    }
}

impl fmt::Display for FmipRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmipRatio::Finite(v) => write!(f, "{v}"),
            FmipRatio::Infinite => f.write_str("inf"),
        }
    }
}

impl Serialize for FmipRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FmipRatio::Finite(v) => Serialize::serialize(v, serializer),
            FmipRatio::Infinite => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for FmipRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) if matches!(s.as_str(), "inf" | "+inf" | "infinity" | "Infinity") => {
                Ok(FmipRatio::Infinite)
            }
            Raw::Text(s) => Decimal::from_str(&s)
                .map(FmipRatio::Finite)
                .map_err(serde::de::Error::custom),
            Raw::Number(v) => Ok(FmipRatio::Finite(v)),
        }
    }
}
