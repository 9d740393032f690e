//! `splitpay quote`: compute the repayment schedule for a purchase total.

use splitpay_config::AppConfig;
use splitpay_core::{Error, Language, Result};
use splitpay_loader::{RuleLoader, RuleSession};
use splitpay_rules::{LegalOptions, Quote, QuoteOutcome};

pub async fn run(
    total: f64,
    lang: Option<&str>,
    force_localized: bool,
    json: bool,
) -> Result<()> {
    let mut config = AppConfig::load().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;
    if let Some(code) = lang {
        config.language = code
            .parse::<Language>()
            .map_err(|message| Error::Config { message })?;
    }
    if force_localized {
        config.force_localized_legal = true;
    }

    let options = LegalOptions {
        language: config.language,
        force_localized: config.force_localized_legal,
    };
    let session = RuleSession::new(RuleLoader::from_config(&config)?, options);
    let today = chrono::Local::now().date_naive();

    let outcome = match session.quote(total, today).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Rules could not be loaded");
            eprintln!("{}", unavailable_message(config.language));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match (&outcome, outcome_message(&outcome, config.language)) {
        (QuoteOutcome::Quoted(quote), _) => print_quote(quote),
        (_, Some(message)) => println!("{message}"),
        (_, None) => {}
    }
    Ok(())
}

/// The message shown in place of a schedule, if the outcome has one.
fn outcome_message(outcome: &QuoteOutcome, lang: Language) -> Option<&'static str> {
    match outcome {
        QuoteOutcome::EmptyCart => Some(empty_cart_message(lang)),
        QuoteOutcome::CeilingExceeded { .. } => Some(ceiling_message(lang)),
        QuoteOutcome::Quoted(_) => None,
    }
}

fn print_quote(quote: &Quote) {
    println!("{} [{}] — {:.2} €", quote.tier.label, quote.tier.id, quote.total);
    println!("─────────────────────────────");
    println!("Month  Amount");
    for entry in &quote.schedule {
        println!("{entry}");
    }
    println!("─────────────────────────────");
    println!(
        "{} payments, {:.2} € in total",
        quote.months(),
        quote.schedule_total()
    );
    if !quote.legal.is_empty() {
        println!("\n{}", quote.legal);
    }
}

fn empty_cart_message(lang: Language) -> &'static str {
    match lang {
        Language::Es => "Tu carrito está vacío.",
        Language::En => "Your cart is empty.",
        Language::De => "Ihr Warenkorb ist leer.",
    }
}

fn ceiling_message(lang: Language) -> &'static str {
    match lang {
        Language::Es => "El importe supera el límite de financiación disponible.",
        Language::En => "The amount exceeds the available financing limit.",
        Language::De => "Der Betrag übersteigt das verfügbare Finanzierungslimit.",
    }
}

fn unavailable_message(lang: Language) -> &'static str {
    match lang {
        Language::Es => "La financiación no está disponible temporalmente.",
        Language::En => "Financing is temporarily unavailable.",
        Language::De => "Die Finanzierung ist vorübergehend nicht verfügbar.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitpay_core::SelectedTier;

    fn quoted() -> QuoteOutcome {
        QuoteOutcome::Quoted(Quote {
            total: 350.0,
            tier_index: 0,
            tier: SelectedTier {
                id: "small".into(),
                label: "Compras pequeñas".into(),
                range: Default::default(),
            },
            schedule: Vec::new(),
            legal: String::new(),
        })
    }

    #[test]
    fn empty_cart_message_per_language() {
        let outcome = QuoteOutcome::EmptyCart;
        assert_eq!(
            outcome_message(&outcome, Language::Es),
            Some("Tu carrito está vacío.")
        );
        assert_eq!(
            outcome_message(&outcome, Language::En),
            Some("Your cart is empty.")
        );
        assert_eq!(
            outcome_message(&outcome, Language::De),
            Some("Ihr Warenkorb ist leer.")
        );
    }

    #[test]
    fn ceiling_message_per_language() {
        let outcome = QuoteOutcome::CeilingExceeded { total: 9000.0 };
        for lang in Language::ALL {
            let message = outcome_message(&outcome, lang).unwrap();
            assert_eq!(message, ceiling_message(lang));
            assert_ne!(message, empty_cart_message(lang));
        }
        assert!(ceiling_message(Language::En).contains("financing limit"));
    }

    #[test]
    fn quoted_outcome_has_no_message() {
        for lang in Language::ALL {
            assert_eq!(outcome_message(&quoted(), lang), None);
        }
    }

    #[test]
    fn unavailable_message_per_language() {
        assert_eq!(
            unavailable_message(Language::Es),
            "La financiación no está disponible temporalmente."
        );
        assert_eq!(
            unavailable_message(Language::En),
            "Financing is temporarily unavailable."
        );
        assert!(unavailable_message(Language::De).contains("vorübergehend"));
    }
}
