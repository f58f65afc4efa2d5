#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::{PositionsPayload, normalize_records};

    #[test]
    fn array_yields_each_record() {
        let records = normalize_records(json!([{"symbol": "AAPL"}, {"symbol": "TSLA"}, {"symbol": "NVDA"}]));
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["symbol"], json!("TSLA"));
    }

    #[test]
    fn positions_key_wins_over_data_key() {
        let value = json!({
            "positions": [{"symbol": "AAPL"}, {"symbol": "TSLA"}],
            "data": [{"symbol": "IGNORED"}]
        });
        assert!(matches!(PositionsPayload::from(value.clone()), PositionsPayload::Positions(_)));

        let records = normalize_records(value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["symbol"], json!("AAPL"));
    }

    #[test]
    fn data_key_is_unwrapped() {
        let records = normalize_records(json!({"data": [{"a": 1}, {"a": 2}], "total": 2}));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn bare_object_is_one_record() {
        let records = normalize_records(json!({"symbol": "AAPL", "quantity": "3"}));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["quantity"], json!("3"));
    }

    #[test]
    fn empty_and_odd_payloads() {
        assert!(normalize_records(json!([])).is_empty());
        assert!(normalize_records(json!({"positions": []})).is_empty());
        assert!(normalize_records(json!({"data": null})).is_empty());
        assert!(normalize_records(json!(null)).is_empty());
        assert!(normalize_records(json!("oops")).is_empty());
    }

    #[test]
    fn non_object_items_are_skipped() {
        let records = normalize_records(json!([{"a": 1}, 7, "x", {"a": 2}]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["a"], json!(2));
    }
}
