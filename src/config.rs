use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV export of the drama dataset
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,

    /// Local CSV file; takes precedence over `dataset_url` when set
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// Countries listed by the showcase endpoint, comma separated
    #[serde(default = "default_showcase_countries")]
    pub showcase_countries: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_url() -> String {
    "https://docs.google.com/spreadsheets/d/1-bHukazIbC7jwghhwUuQO50rtEqGA27JgLfl5jK03jk/export?format=csv"
        .to_string()
}

fn default_showcase_countries() -> String {
    "South Korea,Thailand,Japan".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Showcase countries, trimmed, blanks dropped
    pub fn showcase_countries(&self) -> Vec<String> {
        self.showcase_countries
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: Vec<(&str, &str)>) -> Config {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter::<_, Config>(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(vec![]);
        assert!(config.dataset_url.ends_with("export?format=csv"));
        assert_eq!(config.dataset_path, None);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(
            config.showcase_countries(),
            vec!["South Korea", "Thailand", "Japan"]
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(vec![
            ("DATASET_PATH", "/data/dramas.csv"),
            ("PORT", "8080"),
            ("SHOWCASE_COUNTRIES", " Taiwan , ,China"),
        ]);
        assert_eq!(config.dataset_path.as_deref(), Some("/data/dramas.csv"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.showcase_countries(), vec!["Taiwan", "China"]);
    }
}
