// Fixed-term, fixed-rate deal arithmetic: the downstream consumer of the
// forecast. Closed-form only, no iteration.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.0;
const MIN_SYMBOL_LEN: usize = 3;

/// Terms of a proposed deal, validated before any computation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DealParameters {
    /// Invested amount, in quote currency.
    pub amount: f64,
    /// Annual rate in percent (e.g. 57 for 57%).
    pub annual_rate_pct: f64,
    /// Term of the deal in days.
    pub term_days: u32,
    /// Negotiated execution price, also the forecast target.
    pub deal_price: f64,
    pub symbol: String,
}

impl DealParameters {
    /// Reject out-of-range parameters, naming the field that failed.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= 0.0 {
            bail!("investment amount must be positive, got {}", self.amount);
        }
        if self.annual_rate_pct <= 0.0 {
            bail!("annual rate must be positive, got {}", self.annual_rate_pct);
        }
        if self.term_days == 0 {
            bail!("term must be at least one day");
        }
        if self.deal_price <= 0.0 {
            bail!("deal price must be positive, got {}", self.deal_price);
        }
        if self.symbol.len() < MIN_SYMBOL_LEN {
            bail!(
                "symbol must be at least {} characters, got {:?}",
                MIN_SYMBOL_LEN,
                self.symbol
            );
        }
        Ok(())
    }

    /// The annual rate scaled down to the deal's term.
    pub fn rate_for_term(&self) -> f64 {
        self.annual_rate_pct / 100.0 * self.term_days as f64 / DAYS_PER_YEAR
    }

    /// How much history the analysis looks at for this deal: twice the term.
    pub fn analysis_lookback_days(&self) -> u32 {
        self.term_days * 2
    }
}

/// Derived outcome of a deal under the forecast's base-case price.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetGainResult {
    /// Interest accrued over the term.
    pub interest: f64,
    /// Price below which interest no longer covers the effective entry cost.
    pub breakeven_price: f64,
    pub predicted_price: f64,
    /// Capital at risk when the deal executes below the forecast; zero when
    /// the predicted price clears the deal price (the deal is presumed not
    /// to execute).
    pub purchase_loss: f64,
    pub net_gain: f64,
}

/// Interest, breakeven and net gain for a validated deal, given the
/// forecast's base-case predicted price.
pub fn evaluate_deal(params: &DealParameters, predicted_price: f64) -> Result<NetGainResult> {
    params.validate()?;

    let rate = params.rate_for_term();
    let interest = params.amount * rate;
    let breakeven_price = params.deal_price * (1.0 - rate);

    let purchase_loss = if predicted_price <= params.deal_price {
        params.amount * (1.0 - predicted_price / params.deal_price)
    } else {
        0.0
    };

    Ok(NetGainResult {
        interest,
        breakeven_price,
        predicted_price,
        purchase_loss,
        net_gain: interest - purchase_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DealParameters {
        DealParameters {
            amount: 1000.0,
            annual_rate_pct: 57.0,
            term_days: 3,
            deal_price: 1800.0,
            symbol: "ETH-USD".to_string(),
        }
    }

    #[test]
    fn test_three_day_deal_arithmetic() {
        let result = evaluate_deal(&params(), 1750.0).unwrap();

        let expected_rate: f64 = 0.57 * 3.0 / 365.0;
        assert!((expected_rate - 0.004685).abs() < 1e-6);
        assert!((result.interest - 1000.0 * expected_rate).abs() < 1e-9);
        assert!((result.breakeven_price - 1800.0 * (1.0 - expected_rate)).abs() < 1e-9);
        assert!((result.breakeven_price - 1791.57).abs() < 0.01);

        // Predicted below the deal price: the purchase executes at a loss.
        assert!((result.purchase_loss - 27.7778).abs() < 1e-3);
        assert!((result.net_gain - (-23.09)).abs() < 0.01);
    }

    #[test]
    fn test_prediction_above_deal_price_means_no_purchase() {
        let result = evaluate_deal(&params(), 1900.0).unwrap();
        assert_eq!(result.purchase_loss, 0.0);
        assert_eq!(result.net_gain, result.interest);
    }

    #[test]
    fn test_each_parameter_is_validated_independently() {
        let mut p = params();
        p.amount = 0.0;
        assert!(p.validate().unwrap_err().to_string().contains("amount"));

        let mut p = params();
        p.annual_rate_pct = 0.0;
        assert!(p.validate().unwrap_err().to_string().contains("rate"));

        let mut p = params();
        p.term_days = 0;
        assert!(p.validate().unwrap_err().to_string().contains("term"));

        let mut p = params();
        p.deal_price = 0.0;
        assert!(p.validate().unwrap_err().to_string().contains("deal price"));

        let mut p = params();
        p.symbol = "XX".to_string();
        assert!(p.validate().unwrap_err().to_string().contains("symbol"));

        assert!(params().validate().is_ok());
    }

    #[test]
    fn test_lookback_doubles_the_term() {
        assert_eq!(params().analysis_lookback_days(), 6);
    }
}
