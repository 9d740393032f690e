//! Per-language number, currency and date formatting, plus the static
//! text tables (positional tier labels and legal templates).

use chrono::{Datelike, NaiveDate};
use splitpay_core::Language;

/// Legal text templates for one language.
///
/// Placeholders: `{min}`, `{max}`, `{tin}`, `{tae}`, `{fee}`, `{date}`.
/// Spans wrapped in `[[...]]` are emphasized after substitution.
#[derive(Debug, Clone, Copy)]
pub struct LegalTemplates {
    /// Both bounds known: "between min and max".
    pub between: &'static str,
    /// Only an upper bound: "up to max".
    pub single: &'static str,
    /// Only a lower bound: "min or more".
    pub min: &'static str,
}

const ES_TEMPLATES: LegalTemplates = LegalTemplates {
    between: "Financiación para compras entre [[{min}]] y [[{max}]]. TIN [[{tin} %]], TAE [[{tae} %]], comisión mensual de la tarjeta [[{fee} %]]. Condiciones vigentes a {date}.",
    single: "Financiación para compras de hasta [[{max}]]. TIN [[{tin} %]], TAE [[{tae} %]], comisión mensual de la tarjeta [[{fee} %]]. Condiciones vigentes a {date}.",
    min: "Financiación para compras a partir de [[{min}]]. TIN [[{tin} %]], TAE [[{tae} %]], comisión mensual de la tarjeta [[{fee} %]]. Condiciones vigentes a {date}.",
};

const EN_TEMPLATES: LegalTemplates = LegalTemplates {
    between: "Financing for purchases between [[{min}]] and [[{max}]]. Nominal rate [[{tin}%]], APR [[{tae}%]], monthly card fee [[{fee}%]]. Terms valid as of {date}.",
    single: "Financing for purchases up to [[{max}]]. Nominal rate [[{tin}%]], APR [[{tae}%]], monthly card fee [[{fee}%]]. Terms valid as of {date}.",
    min: "Financing for purchases of [[{min}]] or more. Nominal rate [[{tin}%]], APR [[{tae}%]], monthly card fee [[{fee}%]]. Terms valid as of {date}.",
};

const DE_TEMPLATES: LegalTemplates = LegalTemplates {
    between: "Finanzierung für Einkäufe zwischen [[{min}]] und [[{max}]]. Sollzins [[{tin} %]], effektiver Jahreszins [[{tae} %]], monatliche Kartengebühr [[{fee} %]]. Konditionen gültig ab {date}.",
    single: "Finanzierung für Einkäufe bis [[{max}]]. Sollzins [[{tin} %]], effektiver Jahreszins [[{tae} %]], monatliche Kartengebühr [[{fee} %]]. Konditionen gültig ab {date}.",
    min: "Finanzierung für Einkäufe ab [[{min}]]. Sollzins [[{tin} %]], effektiver Jahreszins [[{tae} %]], monatliche Kartengebühr [[{fee} %]]. Konditionen gültig ab {date}.",
};

pub fn legal_templates(lang: Language) -> &'static LegalTemplates {
    match lang {
        Language::Es => &ES_TEMPLATES,
        Language::En => &EN_TEMPLATES,
        Language::De => &DE_TEMPLATES,
    }
}

/// Number of positional tier slots.
pub const TIER_SLOTS: usize = 3;

/// Default id for each positional slot.
pub const SLOT_IDS: [&str; TIER_SLOTS] = ["small", "medium", "large"];

/// Fallback label for a positional tier slot.
pub fn slot_label(slot: usize, lang: Language) -> &'static str {
    const ES: [&str; TIER_SLOTS] = ["Compras pequeñas", "Compras medianas", "Compras grandes"];
    const EN: [&str; TIER_SLOTS] = ["Small purchases", "Medium purchases", "Large purchases"];
    const DE: [&str; TIER_SLOTS] = ["Kleine Einkäufe", "Mittlere Einkäufe", "Große Einkäufe"];
    let table = match lang {
        Language::Es => &ES,
        Language::En => &EN,
        Language::De => &DE,
    };
    table[slot.min(TIER_SLOTS - 1)]
}

fn decimal_separator(lang: Language) -> char {
    match lang {
        Language::En => '.',
        Language::Es | Language::De => ',',
    }
}

fn thousands_separator(lang: Language) -> char {
    match lang {
        Language::En => ',',
        Language::Es | Language::De => '.',
    }
}

fn date_separator(lang: Language) -> char {
    match lang {
        Language::Es | Language::En => '/',
        Language::De => '.',
    }
}

/// Format a rate fraction as a percentage with two decimals
/// (`0.2168` → `21,68` in Spanish).
pub fn format_percent(fraction: f64, lang: Language) -> String {
    let fixed = format!("{:.2}", fraction * 100.0);
    fixed.replace('.', &decimal_separator(lang).to_string())
}

/// Format an amount as a whole-euro currency string
/// (`1250.0` → `1.250 €` in Spanish, `€1,250` in English).
pub fn format_currency(amount: f64, lang: Language) -> String {
    let grouped = group_thousands(amount.round() as i64, thousands_separator(lang));
    match lang {
        Language::En => format!("€{grouped}"),
        Language::Es | Language::De => format!("{grouped} €"),
    }
}

/// Format a date as day/month/year with the language's separator.
pub fn format_date(date: NaiveDate, lang: Language) -> String {
    let sep = date_separator(lang);
    format!("{:02}{sep}{:02}{sep}{}", date.day(), date.month(), date.year())
}

fn group_thousands(value: i64, sep: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
