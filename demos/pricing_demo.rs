// demos/pricing_demo.rs

//! Demonstration of Black-Scholes pricing, Greeks and implied volatility
//!
//! This example shows how to:
//! 1. Build validated option parameters
//! 2. Print the summary report for a call and a put
//! 3. Value a strike ladder in one pass per option
//! 4. Recover the volatility from the computed prices

use anyhow::Result;
use bsm_lib::{
    default_configs, implied_volatility, summarize, value_both_sides, OptionKind,
    OptionParameters,
};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    let config = default_configs::standard();
    let params = config.example.to_params()?;

    println!("\nStep 1: Reference contract");
    println!(
        "  S={} K={} r={} sigma={} T={}",
        params.spot(),
        params.strike(),
        params.rate(),
        params.volatility(),
        params.maturity()
    );

    for kind in [OptionKind::Call, OptionKind::Put] {
        println!("\n{}", summarize(&params, kind)?);
    }

    println!("\nStep 2: Strike ladder");
    println!(
        "{:<8} {:<12} {:<12} {:<10} {:<10}",
        "Strike", "Call", "Put", "Call Δ", "Gamma"
    );
    println!("{}", "-".repeat(56));

    let strikes = [80.0, 90.0, 100.0, 105.0, 110.0, 120.0];
    let mut ladder = Vec::with_capacity(strikes.len());
    for strike in strikes {
        let p = OptionParameters::new(100.0, strike, 0.05, 0.2, 1.0)?;
        let (call, put) = value_both_sides(&p)?;
        println!(
            "{:<8.0} {:<12.4} {:<12.4} {:<10.4} {:<10.5}",
            strike, call.price, put.price, call.delta, call.gamma
        );
        ladder.push((strike, call.price));
    }

    println!("\nStep 3: Implied volatility round trip");
    for (strike, call_price) in ladder {
        let iv = implied_volatility(
            100.0,
            strike,
            0.05,
            1.0,
            OptionKind::Call,
            call_price,
            &config.implied_vol,
        )?;
        println!("  K={:<6.0} price={:<10.4} implied sigma={:.8}", strike, call_price, iv);
    }

    Ok(())
}
