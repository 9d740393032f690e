//! `splitpay tiers`: load the rule documents and list the tiers.

use splitpay_config::AppConfig;
use splitpay_core::{Months, Range, Tier};
use splitpay_loader::RuleLoader;
use splitpay_rules::{locale, select_column};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let loader = RuleLoader::from_config(&config)?;
    let rules = loader.load().await?;

    let locations = loader.locations();
    println!("Sources: {} tier document(s), legacy {}", locations.tiers.len(), locations.legacy);

    if rules.is_empty() {
        println!("Rule set is empty.");
        return Ok(());
    }

    println!("Tiers ({}):\n", rules.len());
    for (i, tier) in rules.tiers().iter().enumerate() {
        let label = tier.label_for(config.language.code()).unwrap_or(tier.id.as_str());
        println!("  {}. {} [{}]", i + 1, label, tier.id);
        println!("     range:    {}", describe_range(&tier.range));
        println!("     schedule: {}", describe_schedule(tier));
        println!(
            "     rates:    TIN {} %, TAE {} %, fee {} %/month",
            locale::format_percent(tier.meta.apr_nominal, config.language),
            locale::format_percent(tier.meta.apr_representative, config.language),
            locale::format_percent(tier.meta.open_fee_monthly, config.language),
        );
        if tier.legal.is_some() {
            println!("     legal:    supplied");
        }
    }
    Ok(())
}

fn describe_range(range: &Range) -> String {
    let min = range.min.map_or_else(|| "-∞".to_string(), |v| format!("{v:.2}"));
    let max = range.max.map_or_else(|| "∞".to_string(), |v| format!("{v:.2}"));
    format!("[{min}, {max}]")
}

fn describe_schedule(tier: &Tier) -> String {
    if !tier.bands.is_empty() {
        return tier
            .bands
            .iter()
            .map(|b| match b.months {
                Months::Count(n) => format!("{n}×{:.2}", b.amount),
                Months::Final => format!("{:.2} until repaid", b.amount),
            })
            .collect::<Vec<_>>()
            .join(", ");
    }
    match select_column(&tier.columns) {
        Some(column) => format!(
            "legacy column (purchase {:.2}), {} runs",
            column.purchase,
            column.rle.len()
        ),
        None => "none".into(),
    }
}
