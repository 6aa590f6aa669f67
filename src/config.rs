use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub recognition: RecognitionConfig,
    pub analysis: AnalysisConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionConfig {
    pub nats_url: String,
    pub stream_id: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_interim_results")]
    pub interim_results: bool,
    /// Delay before restarting capture after the recognizer stops on its own
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryConfig {
    pub endpoint: String,
}

fn default_language() -> String {
    "pt-BR".to_string()
}

fn default_interim_results() -> bool {
    true
}

fn default_restart_delay_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[service]
name = "call-assist"
[service.http]
bind = "0.0.0.0"
port = 9000

[recognition]
nats_url = "nats://stt:4222"
stream_id = "desk-1"
language = "en-US"
interim_results = false
restart_delay_ms = 150

[analysis]
endpoint = "http://analysis/api/analyze-conversation"
timeout_secs = 5

[directory]
endpoint = "http://crm/api/clients"
"#
        )
        .unwrap();

        let cfg = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.service.name, "call-assist");
        assert_eq!(cfg.service.http.port, 9000);
        assert_eq!(cfg.recognition.stream_id, "desk-1");
        assert_eq!(cfg.recognition.language, "en-US");
        assert!(!cfg.recognition.interim_results);
        assert_eq!(cfg.recognition.restart_delay_ms, 150);
        assert_eq!(cfg.analysis.timeout_secs, 5);
        assert_eq!(cfg.directory.endpoint, "http://crm/api/clients");
    }

    #[test]
    fn test_recognition_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[service]
name = "call-assist"
[service.http]
bind = "127.0.0.1"
port = 8088

[recognition]
nats_url = "nats://localhost:4222"
stream_id = "agent-desk"

[analysis]
endpoint = "http://localhost:8001/api/analyze-conversation"

[directory]
endpoint = "http://localhost:8001/api/clients"
"#
        )
        .unwrap();

        let cfg = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.recognition.language, "pt-BR");
        assert!(cfg.recognition.interim_results);
        assert_eq!(cfg.recognition.restart_delay_ms, 100);
        assert_eq!(cfg.analysis.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::load("/nonexistent/call-assist-config").is_err());
    }
}
