//! Calculate command: side-by-side pricing model comparison

use anyhow::Result;

use pinpoint_core::{
    compute_fees, parse_dollar_input, FeeSchedule, MerchantConfig, PricingResult, TerminalModel,
};

/// Compute and print agent economics under both pricing models
pub fn cmd_calculate(
    volume: &str,
    terminal: &str,
    terminals: u32,
    stand: bool,
    mobile: u32,
    json: bool,
) -> Result<()> {
    let terminal_model: TerminalModel = terminal
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let config = MerchantConfig {
        monthly_volume: parse_dollar_input(volume),
        terminal_model,
        terminal_count: terminals,
        has_stand: stand,
        mobile_device_count: mobile,
    };

    let schedule = FeeSchedule::default();
    let result = compute_fees(&config, &schedule);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("💳 Agent Commission Forecast");
    println!(
        "   Volume: ${:.2}/mo | Terminal: {} x{} | Mobile devices: {}\n",
        config.monthly_volume,
        terminal_model.display_name(),
        terminals,
        mobile
    );

    print_card("Dual Pricing (3.99%)", &result.dual, mobile);
    println!();
    print_card("Flat Rate (2.95% + $0.30)", &result.flat, mobile);

    println!();
    println!(
        "Estimates only. BIN mix and method of processing (Card Not Present, \
         Swipe, MOTO) can all change the exact profit for any merchant."
    );

    Ok(())
}

fn print_card(title: &str, result: &PricingResult, mobile_devices: u32) {
    println!("── {} ──", title);
    println!("  Gross profit (processor, monthly):  ${:>10.2}", result.gross_profit);
    println!("  Agent share (50%, monthly):         ${:>10.2}", result.agent_commission);

    let monthly = &result.monthly_fees;
    println!("  Monthly fees (total):               ${:>10.2}", monthly.total);
    println!("    - Account on file (bank):         ${:>10.2}", monthly.account_on_file);
    println!("    - Dejavoo gateway:                ${:>10.2}", monthly.gateway);
    println!("    - First terminal:                 ${:>10.2}", monthly.first_terminal);
    if monthly.additional_terminals > 0.0 {
        println!("    - Additional terminals:           ${:>10.2}", monthly.additional_terminals);
    }
    if monthly.mobile_devices > 0.0 {
        println!("    - Mobile devices:                 ${:>10.2}", monthly.mobile_devices);
    }

    println!("  Net to agent (passing fees):        ${:>10.2} /mo", result.agent_commission);
    println!("  Net to agent (absorbing fees):      ${:>10.2} /mo", result.net_after_absorbing_fees);
    println!("  Yearly net (passing fees):          ${:>10.2}", result.annual_pass_through);
    println!("  Yearly net (absorbing fees):        ${:>10.2}", result.annual_absorbed);

    let one_time = &result.one_time_fees;
    println!("  One-time setup fees:                ${:>10.2}", one_time.total);
    if one_time.terminal_hardware > 0.0 {
        println!("    - Terminal hardware:              ${:>10.2}", one_time.terminal_hardware);
    }
    if one_time.stand > 0.0 {
        println!("    - Dejavoo P8 stand:               ${:>10.2}", one_time.stand);
    }
    if one_time.mobile_app_downloads > 0.0 {
        println!(
            "    - Mobile app download ({} device(s)): ${:>7.2}",
            mobile_devices, one_time.mobile_app_downloads
        );
    }
    if one_time.compliance > 0.0 {
        println!("    - Dual Pricing compliance fee:    ${:>10.2}", one_time.compliance);
    }
}
