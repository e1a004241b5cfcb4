use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use deal_sniper::config::ANALYSIS;
use deal_sniper::utils::time_utils::epoch_ms_to_utc_string;
use deal_sniper::{
    Cli, DealParameters, JsonFileSource, MarketDataSource, evaluate_deal, run_analysis,
    score_report,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = DealParameters {
        amount: cli.amount,
        annual_rate_pct: cli.rate,
        term_days: cli.term_days,
        deal_price: cli.deal_price,
        symbol: cli.symbol.clone(),
    };
    params.validate()?;

    let source = JsonFileSource::new(&cli.bars);
    let series = source.fetch_series(
        &params.symbol,
        cli.interval_ms,
        params.analysis_lookback_days(),
    )?;
    log::info!(
        "Loaded {} bars for {} covering {} .. {}",
        series.len(),
        series.pair_interval,
        epoch_ms_to_utc_string(series.first_bar_timestamp_ms),
        epoch_ms_to_utc_string(series.last_bar_timestamp_ms()),
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = run_analysis(&series, params.deal_price, &ANALYSIS, &mut rng)?;
    log::debug!(
        "analysis report: {}",
        serde_json::to_string_pretty(&report)?
    );

    let decision = score_report(&report, cli.current_price);
    let result = evaluate_deal(&params, report.forecast.base)?;

    println!("=== Deal evaluation: {} ===", params.symbol);
    println!("Amount:            {:.2}", params.amount);
    println!(
        "Rate:              {:.2}% over {} days",
        params.annual_rate_pct, params.term_days
    );
    println!("Deal price:        {:.2}", params.deal_price);
    println!("---");
    println!("Interest earned:   {:.2}", result.interest);
    println!("Breakeven price:   {:.2}", result.breakeven_price);
    println!("Predicted price:   {:.2}", result.predicted_price);
    println!("Purchase loss:     {:.2}", result.purchase_loss);
    println!("Net gain:          {:.2}", result.net_gain);
    println!("---");
    println!(
        "Forecast scenarios: bear {:.2} / base {:.2} / bull {:.2} (daily vol {:.2}%)",
        report.forecast.bear,
        report.forecast.base,
        report.forecast.bull,
        report.forecast.daily_volatility * 100.0
    );
    println!(
        "Technical score:   {:.2}/{:.0}",
        decision.score, decision.max_score
    );
    for warning in &decision.warnings {
        println!("  ! {}", warning);
    }
    println!("Feedback:          {}", decision.feedback);
    println!("Suggested action:  {}", decision.suggested_action);

    Ok(())
}
