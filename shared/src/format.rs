//! pt-BR presentation helpers.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Avatar fallback when the user's name is unknown.
pub const DEFAULT_INITIALS: &str = "SA";

/// `dd/MM/yyyy`
pub fn date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `HH:mm`
pub fn time_br(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn weekday_long(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "domingo",
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
    }
}

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "dom.",
        Weekday::Mon => "seg.",
        Weekday::Tue => "ter.",
        Weekday::Wed => "qua.",
        Weekday::Thu => "qui.",
        Weekday::Fri => "sex.",
        Weekday::Sat => "sáb.",
    }
}

/// Column headers of the date picker, Sunday first.
pub const WEEKDAY_INITIALS: [&str; 7] = ["D", "S", "T", "Q", "Q", "S", "S"];

/// `ter., 10/06/2025`
pub fn date_with_weekday(date: NaiveDate) -> String {
    format!("{}, {}", weekday_short(date.weekday()), date_br(date))
}

/// `terça-feira, 10 de junho de 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_long(date.weekday()),
        date.day(),
        month_name(date.month()).to_lowercase(),
        date.year()
    )
}

/// 1-based month; out-of-range months yield an empty string.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// `R$ 1.234,50`
pub fn currency_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, fraction)
}

/// Option label for a service picker: `Corte (30 min) · R$ 45,50`
pub fn service_label(name: &str, duration_min: u32, price: Decimal) -> String {
    format!("{} ({} min) · {}", name, duration_min, currency_brl(price))
}

/// First letter of up to two words of the name, uppercased.
pub fn initials(name: Option<&str>) -> String {
    let initials: String = name
        .unwrap_or("")
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

/// Years offered by the agenda filter.
pub fn agenda_years(current: i32) -> [i32; 3] {
    [current - 1, current, current + 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_dates() {
        assert_eq!(date_br(d(2025, 6, 10)), "10/06/2025");
        assert_eq!(date_with_weekday(d(2025, 6, 10)), "ter., 10/06/2025");
        assert_eq!(long_date(d(2025, 6, 10)), "terça-feira, 10 de junho de 2025");
        assert_eq!(long_date(d(2025, 3, 1)), "sábado, 1 de março de 2025");
    }

    #[test]
    fn test_time() {
        assert_eq!(time_br(NaiveTime::from_hms_opt(8, 5, 0).unwrap()), "08:05");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "Janeiro");
        assert_eq!(month_name(12), "Dezembro");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency_brl(Decimal::new(4550, 2)), "R$ 45,50");
        assert_eq!(currency_brl(Decimal::new(123450, 2)), "R$ 1.234,50");
        assert_eq!(currency_brl(Decimal::from(1_000_000)), "R$ 1.000.000,00");
        assert_eq!(currency_brl(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn test_service_label_shows_price() {
        assert_eq!(
            service_label("Corte", 30, Decimal::new(4550, 2)),
            "Corte (30 min) · R$ 45,50"
        );
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials(Some("ana clara souza")), "AC");
        assert_eq!(initials(Some("Bruno")), "B");
        assert_eq!(initials(Some("   ")), "SA");
        assert_eq!(initials(None), "SA");
    }

    #[test]
    fn test_agenda_years() {
        assert_eq!(agenda_years(2025), [2024, 2025, 2026]);
    }
}
