//! Display formatters for table output.

use geckogate_core::Supply;

const NOT_AVAILABLE: &str = "N/A";
const UNBOUNDED: &str = "∞";

/// USD price with precision chosen by magnitude, or `N/A` when unknown.
///
/// Sub-cent prices keep 6 decimals and sub-dollar prices keep 4; everything
/// else is shown with thousands separators and 2 decimals.
pub fn price(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), usd_price)
}

fn usd_price(value: f64) -> String {
    if value > 0.0 && value < 0.01 {
        format!("${value:.6}")
    } else if (0.01..1.0).contains(&value) {
        format!("${value:.4}")
    } else {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}${}", grouped(value.abs()))
    }
}

/// USD market cap scaled to K, M, B or T.
pub fn market_cap(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("${}", scaled(v, true)))
}

pub fn percentage(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v:.2}%"))
}

/// Circulating or total supply; absent values print as `N/A`.
pub fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| scaled(v, false))
}

pub fn supply(value: Supply) -> String {
    match value {
        Supply::Limited(limit) => scaled(limit, false),
        Supply::Unbounded => UNBOUNDED.to_owned(),
    }
}

fn scaled(value: f64, with_trillions: bool) -> String {
    const TRILLION: f64 = 1_000_000_000_000.0;
    const BILLION: f64 = 1_000_000_000.0;
    const MILLION: f64 = 1_000_000.0;
    const THOUSAND: f64 = 1_000.0;

    if with_trillions && value >= TRILLION {
        format!("{:.2}T", value / TRILLION)
    } else if value >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else if with_trillions || value >= THOUSAND {
        // market caps below a million are still shown in thousands
        format!("{:.2}K", value / THOUSAND)
    } else {
        format!("{value:.2}")
    }
}

fn grouped(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out.push('.');
    out.push_str(fraction);
    out
}
