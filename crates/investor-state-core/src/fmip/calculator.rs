use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ratio::FmipRatio;
use crate::error::InvestorStateError;
use crate::time_value::{present_value, PeriodOrigin};
use crate::types::*;
use crate::InvestorStateResult;

/// Scenario evaluated when the caller does not name one.
pub const DEFAULT_SCENARIO: &str = "base_case";

/// Suffix marking a field as a cash-flow series.
pub(crate) const CASHFLOW_SUFFIX: &str = "_cashflows";

/// Public investment and fiscal return series for one policy scenario.
///
/// The three series share `social_discount_rate` but need not have the
/// same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_investment_cashflows: Option<CashFlowSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_revenue_cashflows: Option<CashFlowSeries>,
    /// Public spending avoided because of the policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_avoidance_cashflows: Option<CashFlowSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_discount_rate: Option<Rate>,
}

impl Scenario {
    fn series(&self, field: &str) -> Option<&Option<CashFlowSeries>> {
        match field {
            "public_investment_cashflows" => Some(&self.public_investment_cashflows),
            "tax_revenue_cashflows" => Some(&self.tax_revenue_cashflows),
            "fiscal_avoidance_cashflows" => Some(&self.fiscal_avoidance_cashflows),
            _ => None,
        }
    }

    fn series_mut(&mut self, field: &str) -> Option<&mut Option<CashFlowSeries>> {
        match field {
            "public_investment_cashflows" => Some(&mut self.public_investment_cashflows),
            "tax_revenue_cashflows" => Some(&mut self.tax_revenue_cashflows),
            "fiscal_avoidance_cashflows" => Some(&mut self.fiscal_avoidance_cashflows),
            _ => None,
        }
    }

    /// Copy of this scenario with one parameter perturbed.
    ///
    /// Fields ending in `_cashflows` are scaled element-wise by `value`;
    /// any other field is overwritten with `value`.
    pub fn with_variation(&self, parameter: &str, value: Decimal) -> InvestorStateResult<Self> {
        let mut modified = self.clone();

        if parameter.ends_with(CASHFLOW_SUFFIX) {
            let series = modified
                .series_mut(parameter)
                .ok_or_else(|| unknown_parameter(parameter))?
                .as_mut()
                .ok_or_else(|| InvestorStateError::missing("sensitivity base scenario", parameter))?;
            for cf in series.iter_mut() {
                *cf = cf
                    .checked_mul(value)
                    .ok_or_else(|| InvestorStateError::InvalidInput {
                        field: parameter.to_string(),
                        reason: format!("Scaling by {value} is out of decimal range"),
                    })?;
            }
        } else {
            match parameter {
                "social_discount_rate" => modified.social_discount_rate = Some(value),
                other => return Err(unknown_parameter(other)),
            }
        }

        Ok(modified)
    }
}

fn unknown_parameter(parameter: &str) -> InvestorStateError {
    InvestorStateError::InvalidInput {
        field: parameter.to_string(),
        reason: "Unknown scenario parameter. Expected social_discount_rate or one of \
                 public_investment_cashflows, tax_revenue_cashflows, fiscal_avoidance_cashflows"
            .into(),
    }
}

fn required_series<'a>(
    params: &'a Scenario,
    context: &str,
    field: &str,
) -> InvestorStateResult<&'a CashFlowSeries> {
    params
        .series(field)
        .and_then(Option::as_ref)
        .ok_or_else(|| InvestorStateError::missing(context, field))
}

/// Present values and multiplier for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmipResult {
    pub fmip: FmipRatio,
    pub pv_public_investment: Money,
    pub pv_tax_revenues: Money,
    pub pv_fiscal_avoidance: Money,
    pub total_fiscal_return: Money,
    pub scenario: String,
}

/// FMIP calculator over a read-only set of named scenarios.
#[derive(Debug, Clone, Default)]
pub struct FmipCalculator {
    scenarios: IndexMap<String, Scenario>,
}

impl FmipCalculator {
    pub fn new(scenarios: IndexMap<String, Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &IndexMap<String, Scenario> {
        &self.scenarios
    }

    pub(crate) fn lookup(&self, name: &str) -> InvestorStateResult<&Scenario> {
        self.scenarios
            .get(name)
            .ok_or_else(|| InvestorStateError::ScenarioNotFound {
                scenario: name.to_string(),
                available: self.scenarios.keys().cloned().collect(),
            })
    }

    /// Fiscal multiplier for a named scenario.
    ///
    /// Every series is discounted from t = 1. Zero discounted investment
    /// does not fail: see [`FmipRatio::from_present_values`].
    pub fn calculate_fmip(&self, scenario: &str) -> InvestorStateResult<FmipResult> {
        let params = self.lookup(scenario)?;
        let context = format!("scenario '{scenario}'");

        let investment = required_series(params, &context, "public_investment_cashflows")?;
        let rate = params
            .social_discount_rate
            .ok_or_else(|| InvestorStateError::missing(context.as_str(), "social_discount_rate"))?;
        let tax = required_series(params, &context, "tax_revenue_cashflows")?;
        let avoidance = required_series(params, &context, "fiscal_avoidance_cashflows")?;

        let pv_public_investment = present_value(rate, investment, PeriodOrigin::FirstPeriod)?;
        let pv_tax_revenues = present_value(rate, tax, PeriodOrigin::FirstPeriod)?;
        let pv_fiscal_avoidance = present_value(rate, avoidance, PeriodOrigin::FirstPeriod)?;

        let total_fiscal_return = pv_tax_revenues
            .checked_add(pv_fiscal_avoidance)
            .ok_or_else(|| InvestorStateError::InvalidInput {
                field: "tax_revenue_cashflows".into(),
                reason: "Total fiscal return out of decimal range".into(),
            })?;
        let fmip = FmipRatio::from_present_values(total_fiscal_return, pv_public_investment)?;
        debug!(scenario, %fmip, %pv_public_investment, %total_fiscal_return, "computed FMIP");

        Ok(FmipResult {
            fmip,
            pv_public_investment,
            pv_tax_revenues,
            pv_fiscal_avoidance,
            total_fiscal_return,
            scenario: scenario.to_string(),
        })
    }
}
