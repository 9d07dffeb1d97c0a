use forex::AppCommand;
use forex::cli::convert::ConvertArgs;
use std::fs;
use tempfile::TempDir;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const RATES_JSON: &str = r#"[
        {"RateId": 1, "Code": "USD", "TaxRate": 1.0, "Name": "US Dollar"},
        {"RateId": 2, "Code": "EUR", "TaxRate": 0.9, "Name": "Euro"},
        {"RateId": 3, "Code": "COP", "TaxRate": 2987.35, "Name": "Colombian Peso"}
    ]"#;

    pub async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/Rates"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    /// Writes a config pointing at `base_url` with its cache inside `dir`.
    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
api:
  base_url: "{}"
  path: "/api/Rates"
  timeout_secs: 5
  retries: 0
data_path: "{}"
"#,
            base_url,
            dir.join("data").display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

fn convert_args(amount: &str, from: &str, to: &str) -> ConvertArgs {
    ConvertArgs {
        amount: amount.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        swap: false,
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_with_remote_rates() {
    let mock_server = test_utils::create_mock_server(200, test_utils::RATES_JSON).await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result = forex::run_command(
        AppCommand::Convert(convert_args("100", "USD", "EUR")),
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
    assert!(dir.path().join("data").join("cache").exists());
}

#[test_log::test(tokio::test)]
async fn test_rates_with_remote_rates() {
    let mock_server = test_utils::create_mock_server(200, test_utils::RATES_JSON).await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result =
        forex::run_command(AppCommand::Rates, Some(config_path.to_str().unwrap())).await;

    assert!(result.is_ok(), "Rates failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_code_fails() {
    let mock_server = test_utils::create_mock_server(200, test_utils::RATES_JSON).await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result = forex::run_command(
        AppCommand::Convert(convert_args("100", "USD", "XYZ")),
        Some(config_path.to_str().unwrap()),
    )
    .await;

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Unknown currency code XYZ"));
    assert!(message.contains("USD, EUR, COP"));
}

#[test_log::test(tokio::test)]
async fn test_non_numeric_amount_fails() {
    let mock_server = test_utils::create_mock_server(200, test_utils::RATES_JSON).await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result = forex::run_command(
        AppCommand::Convert(convert_args("ten", "USD", "EUR")),
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_service_error_without_cache_is_unavailable() {
    let mock_server = test_utils::create_mock_server(500, "boom").await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let result =
        forex::run_command(AppCommand::Rates, Some(config_path.to_str().unwrap())).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "No internet connection and no previously loaded rates."
    );
}

#[test_log::test(tokio::test)]
async fn test_unreachable_service_without_cache_is_unavailable() {
    let dir = TempDir::new().unwrap();
    // Nothing listens on the discard port
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:9");

    let result = forex::run_command(
        AppCommand::Convert(convert_args("1", "USD", "EUR")),
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "No internet connection and no previously loaded rates."
    );
}

#[test_log::test(tokio::test)]
async fn test_offline_run_uses_persisted_cache() {
    let mock_server = test_utils::create_mock_server(200, test_utils::RATES_JSON).await;
    let dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri());

    let online = forex::run_command(
        AppCommand::Convert(convert_args("100", "USD", "EUR")),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(online.is_ok(), "Online convert failed with: {:?}", online.err());

    // Same data directory, but the service is gone
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:9");
    let offline = forex::run_command(
        AppCommand::Convert(convert_args("100", "EUR", "COP")),
        Some(config_path.to_str().unwrap()),
    )
    .await;

    assert!(offline.is_ok(), "Offline convert failed with: {:?}", offline.err());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(!missing.exists());

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let result = runtime.block_on(forex::run_command(
        AppCommand::Rates,
        Some(missing.to_str().unwrap()),
    ));

    assert!(result.is_err());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
