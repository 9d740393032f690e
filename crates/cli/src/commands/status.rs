//! `splitpay status`: Show the effective configuration.

use splitpay_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("SplitPay Status");
    println!("===============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Language:     {}", config.language);
    println!(
        "  Legal text:   {}",
        if config.force_localized_legal { "always localized" } else { "supplied, else localized" }
    );
    println!("  HTTP timeout: {}s", config.http.timeout_secs);
    println!("  Tier sources:");
    for (i, location) in config.sources.tiers.iter().enumerate() {
        println!("    {}. {}", i + 1, location);
    }
    println!("  Legacy:       {}", config.sources.legacy);

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `splitpay onboard` first");
    }

    Ok(())
}
