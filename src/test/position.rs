#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    use crate::models::{Position, ProfitLossSource, QuantityCheck, Record, retain_held};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn held_filter() {
        let records = vec![
            record(json!({"symbol": "ZERO", "quantity": "0"})),
            record(json!({"symbol": "NA", "quantity": "N/A"})),
            record(json!({"symbol": "POS", "position": 3})),
            record(json!({"symbol": "NEG", "qty": "-1"})),
            record(json!({"symbol": "NONE"})),
            record(json!({"symbol": "EMPTY", "qty": ""})),
            record(json!({"symbol": "SCI", "qty": "1E+1"})),
        ];

        let held: Vec<String> = retain_held(records)
            .iter()
            .map(|rec| rec["symbol"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(held, vec!["NA", "POS", "SCI"]);
    }

    #[test]
    fn quantity_check() {
        assert_eq!(QuantityCheck::of(Some(&json!("0.5"))), QuantityCheck::Positive);
        assert_eq!(QuantityCheck::of(Some(&json!(0))), QuantityCheck::NotPositive);
        assert_eq!(QuantityCheck::of(None), QuantityCheck::NotPositive);
        assert_eq!(QuantityCheck::of(Some(&json!("abc"))), QuantityCheck::Unparsable);
        assert!(QuantityCheck::Unparsable.is_held());
    }

    #[test]
    fn builds_from_reconciled_fields() {
        let position = Position::from_record(&record(json!({
            "ticker": {"symbol": "AAPL", "name": "Apple Inc."},
            "position": "10",
            "costPrice": "150",
            "last_price": 160.5,
            "instrumentId": 913256135
        })));

        assert_eq!(position.symbol(), "AAPL");
        assert_eq!(position.name().as_deref(), Some("Apple Inc."));
        assert_eq!(position.currency(), "USD");
        assert_eq!(position.instrument_id().as_deref(), Some("913256135"));
        assert_eq!(position.quantity_value().unwrap(), dec!(10));
        assert_eq!(position.market_value_value().unwrap(), dec!(0));
    }

    #[test]
    fn reported_profit_loss_takes_priority() {
        let position = Position::from_record(&record(json!({
            "symbol": "TSLA",
            "quantity": 2,
            "cost_price": "100",
            "last_price": "120",
            "unrealizedProfitLoss": "-5.5",
            "unrealized_profit_loss_rate": "-0.025"
        })));

        let profit_loss = position.profit_loss().unwrap().unwrap();
        assert_eq!(*profit_loss.source(), ProfitLossSource::Reported);
        assert_eq!(*profit_loss.amount(), dec!(-5.5));
        assert_eq!(*profit_loss.percent(), dec!(-2.5));
    }

    #[test]
    fn computed_profit_loss() {
        let position = Position::from_record(&record(json!({
            "symbol": "NVDA",
            "qty": "4",
            "cost": "50",
            "lastPrice": "55"
        })));

        let profit_loss = position.profit_loss().unwrap().unwrap();
        assert_eq!(*profit_loss.source(), ProfitLossSource::Computed);
        assert_eq!(*profit_loss.amount(), dec!(20));
        assert_eq!(*profit_loss.percent(), dec!(10));
    }

    #[test]
    fn no_profit_loss_without_prices() {
        let position = Position::from_record(&record(json!({"symbol": "X", "qty": "4", "cost_price": "0"})));
        assert!(position.profit_loss().unwrap().is_none());
    }

    #[test]
    fn bad_price_is_an_error() {
        let position = Position::from_record(&record(json!({"symbol": "X", "qty": "4", "cost_price": "n/a"})));
        assert!(position.profit_loss().is_err());
        assert!(position.valuation().is_err());
    }

    #[test]
    fn valuation_with_zero_cost() {
        let position = Position::from_record(&record(json!({
            "symbol": "GIFT",
            "qty": "3",
            "last_price": "10",
            "currency": "JPY"
        })));

        let valuation = position.valuation().unwrap();
        assert_eq!(*valuation.market_value(), dec!(30));
        assert_eq!(*valuation.profit_loss(), dec!(30));
        assert_eq!(*valuation.profit_loss_percent(), dec!(0));
        assert_eq!(position.currency(), "JPY");
    }
}
