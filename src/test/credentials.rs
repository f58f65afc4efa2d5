#[cfg(test)]
mod tests {
    use std::{collections::HashMap, fs};

    use tempfile::tempdir;

    use crate::config::{
        ConfigError, EnvFile, Settings,
        settings::{APP_KEY_VAR, APP_SECRET_VAR, DEFAULT_ENDPOINT, ENDPOINT_VAR},
    };

    fn env_file(content: &str) -> EnvFile {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();
        EnvFile::load(&path).unwrap()
    }

    fn environment(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn parses_comments_quotes_and_blank_lines() {
        let file = env_file(
            "# credentials\n\nWEBULL_APP_KEY=\"quoted-key\"\nWEBULL_APP_SECRET='single'\nEMPTY=\n",
        );

        assert_eq!(file.file_value(APP_KEY_VAR), Some("quoted-key"));
        assert_eq!(file.file_value(APP_SECRET_VAR), Some("single"));
        assert_eq!(file.file_value("EMPTY"), None);
        assert_eq!(file.len(), 2);
    }

    #[test]
    fn values_are_kept_literally() {
        let file = env_file(
            "WEBULL_APP_SECRET=ab$cd\nWEBULL_APP_KEY=with\\back\nSPACED = a b \nHASH=x #y\nURL=https://h/?a=1&b=2\n",
        );

        assert_eq!(file.file_value(APP_SECRET_VAR), Some("ab$cd"));
        assert_eq!(file.file_value(APP_KEY_VAR), Some("with\\back"));
        assert_eq!(file.file_value("SPACED"), Some("a b"));
        assert_eq!(file.file_value("HASH"), Some("x #y"));
        assert_eq!(file.file_value("URL"), Some("https://h/?a=1&b=2"));
    }

    #[test]
    fn skips_lines_without_key_or_separator() {
        let file = env_file("  # indented comment\nNOSEPARATOR\n=orphan\nQUOTED=\"\"\nMIXED=\"a'\n");

        assert_eq!(file.file_value("MIXED"), Some("\"a'"));
        assert_eq!(file.file_value("QUOTED"), None);
        assert_eq!(file.len(), 1);
    }

    #[test]
    fn environment_is_never_overridden() {
        let file = env_file("WEBULL_APP_KEY=from-file\nWEBULL_APP_SECRET=file-secret\n");
        let env = environment(&[(APP_KEY_VAR, "from-env")]);
        let lookup = |key: &str| env.get(key).cloned();

        assert_eq!(file.resolve_with(APP_KEY_VAR, lookup).as_deref(), Some("from-env"));
        assert_eq!(
            file.resolve_with(APP_SECRET_VAR, lookup).as_deref(),
            Some("file-secret")
        );
    }

    #[test]
    fn empty_environment_value_counts_as_unset() {
        let file = env_file("WEBULL_APP_KEY=from-file\n");
        let env = environment(&[(APP_KEY_VAR, "")]);

        assert_eq!(
            file.resolve_with(APP_KEY_VAR, |key| env.get(key).cloned()).as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn first_definition_wins() {
        let file = env_file("WEBULL_APP_KEY=first\nWEBULL_APP_KEY=second\n");
        assert_eq!(file.file_value(APP_KEY_VAR), Some("first"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let file = EnvFile::load(&dir.path().join("absent.env")).unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn settings_require_key_and_secret() {
        let env = environment(&[(APP_KEY_VAR, "abcdefghijklmnop")]);
        let err = Settings::resolve(|key| env.get(key).cloned()).unwrap_err();
        let ConfigError::MissingCredentials { missing } = err;
        assert_eq!(missing, vec![APP_SECRET_VAR]);

        let none = Settings::resolve(|_| None).unwrap_err();
        assert_eq!(
            none.to_string(),
            format!("Missing credentials: {}, {}", APP_KEY_VAR, APP_SECRET_VAR)
        );
    }

    #[test]
    fn settings_defaults_and_masking() {
        let env = environment(&[(APP_KEY_VAR, "abcdefghijklmnop"), (APP_SECRET_VAR, "s3cret")]);
        let settings = Settings::resolve(|key| env.get(key).cloned()).unwrap();

        assert_eq!(settings.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(settings.masked_app_key(), "abcdefgh...");
        assert!(!format!("{:?}", settings).contains("s3cret"));

        let custom = environment(&[
            (APP_KEY_VAR, "k"),
            (APP_SECRET_VAR, "s"),
            (ENDPOINT_VAR, "api.sandbox.example"),
        ]);
        let settings = Settings::resolve(|key| custom.get(key).cloned()).unwrap();
        assert_eq!(settings.endpoint(), "api.sandbox.example");
    }

    #[test]
    fn settings_from_file() {
        let file = env_file("WEBULL_APP_KEY=file-key\nWEBULL_APP_SECRET=file-secret\n");
        let settings = Settings::resolve(|key| file.file_value(key).map(str::to_string)).unwrap();
        assert_eq!(settings.app_key(), "file-key");
    }
}
