use rust_decimal::Decimal;
use rusty_money::{Formatter, LocalFormat, Locale, Money, Params, Position, iso};

/// Formats an amount in Brazilian reais, e.g. `R$6.999,00`.
///
/// rusty-money files BRL under the US locale, so the separators come from
/// the `EnEu` format (`.` for thousands, `,` for cents).
pub fn format_brl(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);

    let format = LocalFormat::from_locale(Locale::EnEu);
    let params = Params {
        digit_separator: format.digit_separator,
        exponent_separator: format.exponent_separator,
        separator_pattern: format.digit_separator_pattern(),
        positions: vec![Position::Sign, Position::Symbol, Position::Amount],
        symbol: Some("R$"),
        code: Some("BRL"),
        ..Default::default()
    };

    Formatter::money(&Money::from_decimal(amount, iso::BRL), params)
}
