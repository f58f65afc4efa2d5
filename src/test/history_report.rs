#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::{
        report::{Aborted, Reporter, history},
        test::fake_api::FakeApi,
    };

    fn reporter() -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), "show_his.md")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn has(lines: &[String], expected: &str) -> bool {
        lines.iter().any(|line| line == expected)
    }

    fn position_of(lines: &[String], expected: &str) -> usize {
        lines.iter().position(|line| line == expected).unwrap()
    }

    #[tokio::test]
    async fn orders_sorted_newest_first_with_statistics() {
        let api = FakeApi::new()
            .subscriptions(200, json!([{"account_id": "ACCT12345678"}]))
            .orders(
                200,
                json!({"data": [
                    {
                        "symbol": "AAPL",
                        "instrument_name": "Apple",
                        "side": "BUY",
                        "order_type": "LIMIT",
                        "status": "Filled",
                        "qty": "5",
                        "filled_qty": "5",
                        "limit_price": "190.5",
                        "avg_filled_price": "190.25",
                        "currency": "USD",
                        "create_time": "2025-01-15T09:00:00Z",
                        "client_order_id": "early"
                    },
                    {
                        "symbol": "7203",
                        "instrument_name": "Toyota",
                        "side": "SELL",
                        "order_type": "MARKET",
                        "status": "Working",
                        "qty": "100",
                        "filled_qty": "0",
                        "currency": "JPY",
                        "create_time": "2025-01-15T10:30:00Z",
                        "client_order_id": "late"
                    },
                    {
                        "symbol": "TSLA",
                        "side": "BUY",
                        "order_type": "STOP",
                        "status": "Expired",
                        "qty": 1,
                        "create_time": "2025-01-15T08:00:00Z",
                        "client_order_id": "earliest"
                    }
                ]}),
            );
        let mut reporter = reporter();

        history::render_history(&api, &mut reporter, today()).await.unwrap();

        let lines = reporter.lines();
        assert!(has(lines, "- **取得件数**: 3件"));
        assert!(has(lines, "- **対象日**: 2025年01月15日"));
        assert!(position_of(lines, "- **注文ID**: `late`") < position_of(lines, "- **注文ID**: `early`"));
        assert!(position_of(lines, "- **注文ID**: `early`") < position_of(lines, "- **注文ID**: `earliest`"));

        assert!(has(lines, "- **銘柄**: AAPL (Apple)"));
        assert!(has(lines, "- **売買**: 買"));
        assert!(has(lines, "- **注文種別**: 指値"));
        assert!(has(lines, "- **ステータス**: 約定"));
        assert!(has(lines, "- **約定数量**: 5"));
        assert!(has(lines, "- **指値価格**: USD 190.50"));
        assert!(has(lines, "- **平均約定価格**: USD 190.25"));
        assert!(has(lines, "- **注文日時**: 2025-01-15 09:00:00"));
        assert!(has(lines, "- **銘柄**: TSLA (N/A)"));
        assert!(has(lines, "- **ステータス**: Expired"));

        assert!(has(lines, "- **Expired**: 1件"));
        assert!(has(lines, "- **約定**: 1件"));
        assert!(has(lines, "- **処理中**: 1件"));
        assert!(has(lines, "- **買注文**: 2件"));
        assert!(has(lines, "- **売注文**: 1件"));
        assert!(has(lines, "## 注意事項"));
    }

    #[tokio::test]
    async fn progress_lines_stay_off_the_file() {
        let api = FakeApi::new()
            .subscriptions(200, json!([{"account_id": "ACCT12345678"}]))
            .orders(200, json!({"data": []}));
        let mut reporter = reporter();

        history::render_history(&api, &mut reporter, today()).await.unwrap();

        let lines = reporter.lines();
        assert!(has(lines, "当日の注文履歴はありません。"));
        assert!(!lines.iter().any(|line| line.contains("ACCT1234")));
        assert!(!lines.iter().any(|line| line.starts_with("✓")));

        let console = String::from_utf8(reporter.into_console()).unwrap();
        assert!(console.contains("✓ アカウントID: ACCT1234..."));
        assert!(!console.contains("ACCT12345678"));
        assert!(console.contains("✓ 0件の注文を取得しました"));
    }

    #[tokio::test]
    async fn missing_account_writes_an_error_section() {
        let api = FakeApi::new().subscriptions(200, json!([]));
        let mut reporter = reporter();

        let err = history::render_history(&api, &mut reporter, today()).await.unwrap_err();

        assert!(err.is::<Aborted>());
        assert!(has(reporter.lines(), "## エラー"));
        assert!(has(reporter.lines(), "アカウントIDの取得に失敗しました。"));
        assert_eq!(api.calls(), vec!["subscriptions"]);
    }

    #[tokio::test]
    async fn order_failure_writes_an_error_section() {
        let api = FakeApi::new()
            .subscriptions(200, json!([{"account_id": "A1"}]))
            .orders(500, json!({"msg": "boom"}));
        let mut reporter = reporter();

        let err = history::render_history(&api, &mut reporter, today()).await.unwrap_err();

        assert!(err.is::<Aborted>());
        assert!(has(reporter.lines(), "注文履歴の取得に失敗しました。"));
    }
}
