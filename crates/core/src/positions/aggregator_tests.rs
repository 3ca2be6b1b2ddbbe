//! Tests for grouping transactions into positions.

#[cfg(test)]
mod tests {
    use crate::errors::{CalculatorError, Error};
    use crate::money::{Currency, Ticker};
    use crate::positions::*;
    use crate::transactions::Transaction;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_by_ticker_preserves_input_order() {
        let transactions = vec![
            Transaction::new("AAPL", "USD", 1, 10),
            Transaction::new("GOOG", "USD", 1, 20),
            Transaction::new("AAPL", "USD", 2, 30),
        ];
        let groups = group_by_ticker(&transactions);

        let aapl = &groups[&Ticker::from("AAPL")];
        assert_eq!(groups.len(), 2);
        assert_eq!(aapl.len(), 2);
        assert_eq!(aapl[0].price, 10);
        assert_eq!(aapl[1].price, 30);
    }

    #[test]
    fn test_empty_batch_yields_no_positions() {
        assert!(aggregate_transactions(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_transaction() {
        let positions =
            aggregate_transactions(&[Transaction::new("AAPL", "USD", 2, 150)]).unwrap();

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].total_buying_price(), dec!(300));
    }

    #[test]
    fn test_two_tickers_do_not_contaminate_each_other() {
        let transactions = vec![
            Transaction::new("AAPL", "USD", 2, 150),
            Transaction::new("GOOG", "USD", 1, 100),
            Transaction::new("AAPL", "USD", 1, 50),
        ];
        let positions = aggregate_transactions(&transactions).unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].ticker, Ticker::from("AAPL"));
        assert_eq!(positions[0].total_buying_price(), dec!(350));
        assert_eq!(positions[1].ticker, Ticker::from("GOOG"));
        assert_eq!(positions[1].total_buying_price(), dec!(100));
    }

    #[test]
    fn test_mixed_currency_rejected_by_default() {
        let transactions = vec![
            Transaction::new("AAPL", "USD", 2, 150),
            Transaction::new("AAPL", "EUR", 1, 100),
        ];
        let err = aggregate_transactions(&transactions).unwrap_err();

        match err {
            Error::Calculation(CalculatorError::MixedCurrency {
                ticker,
                position_currency,
                transaction_currency,
            }) => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(position_currency, "USD");
                assert_eq!(transaction_currency, "EUR");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_first_seen_policy_keeps_first_currency() {
        let aggregator = PositionAggregator::new(AggregatorConfig {
            currency_policy: CurrencyPolicy::FirstSeen,
            ..Default::default()
        });
        let transactions = vec![
            Transaction::new("AAPL", "USD", 2, 150),
            Transaction::new("AAPL", "EUR", 1, 100),
        ];
        let positions = aggregator.aggregate(&transactions).unwrap();

        assert_eq!(positions[0].currency, Currency::from("USD"));
        assert_eq!(positions[0].total_buying_price(), dec!(400));
    }

    #[test]
    fn test_parallel_fold_matches_sequential() {
        let transactions: Vec<Transaction> = (0..50)
            .flat_map(|i| {
                let ticker = format!("T{:02}", i);
                vec![
                    Transaction::new(ticker.as_str(), "USD", i, 3),
                    Transaction::new(ticker.as_str(), "USD", 1, i),
                ]
            })
            .collect();

        let sequential = aggregate_transactions(&transactions).unwrap();
        let parallel = PositionAggregator::new(AggregatorConfig {
            parallel_threshold: 0,
            ..Default::default()
        })
        .aggregate(&transactions)
        .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_currency_policy_from_str() {
        assert_eq!("reject".parse::<CurrencyPolicy>().unwrap(), CurrencyPolicy::Reject);
        assert_eq!(
            "First-Seen".parse::<CurrencyPolicy>().unwrap(),
            CurrencyPolicy::FirstSeen
        );
        assert!("loose".parse::<CurrencyPolicy>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AggregatorConfig =
            serde_json::from_str(r#"{"currencyPolicy":"first-seen"}"#).unwrap();

        assert_eq!(config.currency_policy, CurrencyPolicy::FirstSeen);
        assert_eq!(config.parallel_threshold, AggregatorConfig::default().parallel_threshold);
    }
}
