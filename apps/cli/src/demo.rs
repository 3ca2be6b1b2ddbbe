use bullboard_core::utils::time_utils::fixtures::iphone_launched_at;
use bullboard_core::{Amount, Event};
use chrono::Duration;
use rust_decimal_macros::dec;

/// A small history of buys, prices and a dividend across two currencies.
pub fn demo_events() -> Vec<Event> {
    let start = iphone_launched_at();
    let day = |n: i64| start + Duration::days(n);

    vec![
        Event::new_stocks_bought(day(0), dec!(10), Amount::new(dec!(150), "USD"), "AAPL"),
        Event::new_price_obtained(day(30), Amount::new(dec!(170), "USD"), "AAPL"),
        Event::new_stocks_bought(day(60), dec!(5), Amount::new(dec!(160), "USD"), "AAPL"),
        Event::new_price_obtained(day(90), Amount::new(dec!(160), "USD"), "AAPL"),
        Event::new_stocks_bought(day(100), dec!(4), Amount::new(dec!(13.37), "EUR"), "ASR.AS"),
        Event::new_price_obtained(day(120), Amount::new(dec!(14.20), "EUR"), "ASR.AS"),
        Event::new_stocks_bought(day(150), dec!(8), Amount::new(dec!(100), "USD"), "MSFT"),
        Event::new_price_obtained(day(160), Amount::new(dec!(110), "USD"), "MSFT"),
        Event::new_dividend_paid(day(200), Amount::new(dec!(0.50), "USD"), "AAPL"),
    ]
}
