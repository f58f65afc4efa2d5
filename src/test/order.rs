#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use strum::IntoEnumIterator;

    use crate::models::{Code, Label, Order, OrderSide, OrderStatus, OrderType, Record};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn codes_map_to_japanese_labels() {
        assert_eq!(Code::<OrderSide>::parse("BUY").label(), "買");
        assert_eq!(Code::<OrderType>::parse("STOP_LIMIT").label(), "逆指値(指値)");
        assert_eq!(Code::<OrderStatus>::parse("PartialFilled").label(), "一部約定");
        assert_eq!(
            Code::<OrderStatus>::parse("Expired"),
            Code::Unknown(String::from("Expired"))
        );
        assert_eq!(Code::<OrderStatus>::parse("Expired").to_string(), "Expired");
    }

    #[test]
    fn every_status_has_a_label() {
        for status in OrderStatus::iter() {
            assert!(!status.label().is_empty());
        }
    }

    #[test]
    fn decodes_leniently() {
        let order = Order::from_record(&record(json!({
            "symbol": "AAPL",
            "instrument_name": "Apple",
            "side": "SELL",
            "order_type": "LIMIT",
            "status": "Filled",
            "qty": "5",
            "filled_qty": "5",
            "limit_price": "190.5",
            "currency": "USD",
            "create_time": "2025-01-15T14:30:00Z",
            "client_order_id": "c-1"
        })));

        assert_eq!(*order.side(), Code::Known(OrderSide::Sell));
        assert!(order.is_limit());
        assert_eq!(*order.limit_price(), Some(dec!(190.5)));
        assert_eq!(*order.avg_filled_price(), None);
        assert_eq!(order.created_at_display().as_deref(), Some("2025-01-15 14:30:00"));
        assert_eq!(order.client_order_id(), "c-1");
    }

    #[test]
    fn defaults_for_missing_fields() {
        let order = Order::from_record(&record(json!({})));
        assert_eq!(order.symbol(), "N/A");
        assert_eq!(order.currency(), "USD");
        assert_eq!(order.side().label(), "N/A");
        assert!(order.created_at_display().is_none());
        assert_eq!(order.create_time_key(), "");
    }

    #[test]
    fn unparsable_time_is_shown_verbatim() {
        let order = Order::from_record(&record(json!({"create_time": "yesterday"})));
        assert_eq!(order.created_at_display().as_deref(), Some("yesterday"));

        let naive = Order::from_record(&record(json!({"create_time": "2025-01-15T09:05:01.250"})));
        assert_eq!(naive.created_at_display().as_deref(), Some("2025-01-15 09:05:01"));
    }
}
