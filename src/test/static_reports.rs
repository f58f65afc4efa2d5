#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        api::webull::paths,
        report::{
            Reporter,
            endpoints::{self, CATALOGUE},
            symbols::{self, Market},
        },
    };

    fn reporter(name: &str) -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), name)
    }

    fn has(lines: &[String], expected: &str) -> bool {
        lines.iter().any(|line| line == expected)
    }

    #[test]
    fn catalogue_counts() {
        let (total, available) = endpoints::counts(CATALOGUE);
        assert_eq!(CATALOGUE.len(), 6);
        assert_eq!(total, 19);
        assert_eq!(available, 16);
    }

    #[test]
    fn catalogue_points_at_the_client_paths() {
        let implemented: Vec<&str> = CATALOGUE
            .iter()
            .flat_map(|category| category.endpoints)
            .filter(|endpoint| endpoint.client_method.is_some())
            .map(|endpoint| endpoint.path)
            .collect();

        assert_eq!(
            implemented,
            vec![
                paths::SUBSCRIPTIONS,
                paths::ACCOUNT_BALANCE,
                paths::ACCOUNT_POSITIONS,
                paths::TODAY_ORDERS,
            ]
        );
    }

    #[test]
    fn catalogue_rendering() {
        let mut reporter = reporter("show_api_endpoint.md");
        let now = NaiveDate::from_ymd_opt(2025, 11, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        endpoints::render_catalogue(&mut reporter, CATALOGUE, now);

        let lines = reporter.lines();
        assert!(has(lines, "生成日時: 2025-11-19 12:00:00"));
        assert!(has(lines, "1. 口座管理 (Account Management)"));
        assert!(has(lines, "  [1-1] 口座購読情報の取得"));
        assert!(has(lines, "  パラメータ     : なし"));
        assert!(has(lines, "  頻度制限       : 60回/分"));
        assert!(has(lines, "  ステータス     : ❌ 未実装"));
        assert!(has(lines, "総エンドポイント数        : 19"));
        assert!(has(lines, "未実装エンドポイント数    : 3"));
    }

    #[test]
    fn symbol_report_header_goes_to_the_file_only() {
        let mut reporter = reporter("show_symbol_us.md");
        let now = NaiveDate::from_ymd_opt(2025, 11, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        symbols::render_report(Market::Us, true, &mut reporter, now);

        let lines = reporter.lines().to_vec();
        assert_eq!(lines[0], "# 米国株銘柄一覧取得スクリプト実行結果");
        assert!(has(&lines, "実行日時: 2025年11月19日 08:00:00"));
        assert!(has(&lines, "### ✓ APIキーの設定を確認しました"));
        assert!(has(&lines, "### ❌ 実装不可能"));

        let console = String::from_utf8(reporter.into_console()).unwrap();
        assert!(!console.contains("# 米国株銘柄一覧取得スクリプト実行結果"));
        assert!(console.contains("米国株銘柄一覧取得スクリプト - 実行可否調査"));
    }

    #[test]
    fn symbol_report_warns_without_credentials() {
        let mut reporter = reporter("show_symbol_jp.md");
        let now = NaiveDate::from_ymd_opt(2025, 11, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        symbols::render_report(Market::Jp, false, &mut reporter, now);

        let lines = reporter.lines();
        assert_eq!(lines[0], "# 日本株銘柄取得スクリプト実行結果");
        assert!(has(lines, "### ⚠️ APIキーが設定されていません"));
        assert!(has(lines, "WEBULL_APP_KEY=your_app_key_here"));
        assert!(lines.iter().any(|line| line.contains("JPX")));
    }
}
