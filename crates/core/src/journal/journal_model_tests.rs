#[cfg(test)]
mod tests {
    use crate::errors::{CalculatorError, Error};
    use crate::events::Event;
    use crate::journal::*;
    use crate::money::{Amount, Ticker};
    use crate::utils::time_utils::fixtures::iphone_launched_at;
    use rust_decimal_macros::dec;

    fn bought(amount: rust_decimal::Decimal, price: &str) -> Event {
        Event::new_stocks_bought(iphone_launched_at(), amount, price.parse().unwrap(), "AAPL")
    }

    #[test]
    fn journal_from_stocks_bought_events() {
        let journal = Journal::new(&[bought(dec!(10), "100.00 USD"), bought(dec!(20), "200.00 USD")])
            .unwrap();

        assert_eq!(
            journal.rows,
            vec![
                JournalRow {
                    date: iphone_launched_at().date(),
                    row_type: JournalRowType::Buy,
                    ticker: Ticker::from("AAPL"),
                    amount: dec!(10),
                    price: Amount::new(dec!(100.00), "USD"),
                    total: Amount::new(dec!(1000.00), "USD"),
                },
                JournalRow {
                    date: iphone_launched_at().date(),
                    row_type: JournalRowType::Buy,
                    ticker: Ticker::from("AAPL"),
                    amount: dec!(20),
                    price: Amount::new(dec!(200.00), "USD"),
                    total: Amount::new(dec!(4000.00), "USD"),
                },
            ]
        );
    }

    #[test]
    fn journal_dividend_uses_shares_held() {
        let journal = Journal::new(&[
            bought(dec!(10), "100.00 USD"),
            bought(dec!(5), "100.00 USD"),
            Event::new_dividend_paid(iphone_launched_at(), "0.50 USD".parse().unwrap(), "AAPL"),
        ])
        .unwrap();

        let dividend = &journal.rows[2];
        assert_eq!(dividend.row_type, JournalRowType::Dividend);
        assert_eq!(dividend.amount, dec!(15));
        assert_eq!(dividend.total, Amount::new(dec!(7.50), "USD"));
    }

    #[test]
    fn journal_skips_price_obtained_events() {
        let journal = Journal::new(&[Event::new_price_obtained(
            iphone_launched_at(),
            "100.00 USD".parse().unwrap(),
            "AAPL",
        )])
        .unwrap();

        assert!(journal.is_empty());
    }

    #[test]
    fn journal_render() {
        let journal = Journal::new(&[bought(dec!(10), "100.00 USD")]).unwrap();
        let expected = [
            "",
            "My Journal",
            "     Date       Type    Ticker    Amount      Price          Total    ",
            "  2007-01-09    Buy     AAPL          10    100.00 USD    1000.00 USD ",
            "",
        ]
        .join("\n");

        assert_eq!(journal.to_string(), expected);
    }

    #[test]
    fn journal_reports_overflowing_share_count() {
        let result = Journal::new(&[
            bought(rust_decimal::Decimal::MAX, "1 USD"),
            bought(rust_decimal::Decimal::MAX, "1 USD"),
        ]);

        assert!(matches!(
            result,
            Err(Error::Calculation(CalculatorError::Overflow { .. }))
        ));
    }
}
