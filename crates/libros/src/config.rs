use std::env;

pub const DEFAULT_TABLE_NAME: &str = "Libros";
pub const DEFAULT_AWS_REGION: &str = "us-east-2";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table holding the books (default: "Libros")
    pub table_name: String,
    /// AWS region of the table (default: "us-east-2")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_region: String,
    /// Endpoint override, e.g. DynamoDB Local
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LIBROS_TABLE_NAME` - Table name (default: "Libros")
    /// - `AWS_REGION` - AWS region (default: "us-east-2")
    /// - `AWS_ENDPOINT_URL` - Optional endpoint override
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            table_name: var("LIBROS_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            aws_region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            aws_endpoint_url: var("AWS_ENDPOINT_URL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.table_name, "Libros");
        assert_eq!(config.aws_region, "us-east-2");
        assert_eq!(config.aws_endpoint_url, None);
    }

    #[test]
    fn test_values_from_variables() {
        let config = config_from(&[
            ("LIBROS_TABLE_NAME", "LibrosTest"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
        ]);

        assert_eq!(config.table_name, "LibrosTest");
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(
            config.aws_endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("LIBROS_TABLE_NAME", "  "), ("AWS_ENDPOINT_URL", "")]);

        assert_eq!(config.table_name, "Libros");
        assert_eq!(config.aws_endpoint_url, None);
    }
}
