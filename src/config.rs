use crate::fixtures::{FixtureConfig, FixtureCounts};
use chrono::{Local, NaiveDate};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

/// 运行时配置：.env + 环境变量
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub fixture: FixtureConfig,
    pub page_size: usize,
    /// 模拟 API 调用的延迟
    pub api_latency_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// 读取逻辑与来源分离，方便测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let seed = parse_or(get("ERP_SEED"), "ERP_SEED", 42u64)?;
        let anchor = match get("ERP_ANCHOR_DATE") {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                ConfigError::Invalid {
                    key: "ERP_ANCHOR_DATE",
                    value: raw.clone(),
                }
            })?,
            None => Local::now().date_naive(),
        };
        let tax_rate = parse_or(get("ERP_TAX_RATE"), "ERP_TAX_RATE", 8.0f64)?;
        if !(0.0..=100.0).contains(&tax_rate) {
            return Err(ConfigError::Invalid {
                key: "ERP_TAX_RATE",
                value: tax_rate.to_string(),
            });
        }
        let page_size = parse_or(get("ERP_PAGE_SIZE"), "ERP_PAGE_SIZE", 15usize)?;
        if page_size == 0 {
            return Err(ConfigError::Zero {
                key: "ERP_PAGE_SIZE",
            });
        }
        let api_latency_ms = parse_or(get("ERP_API_LATENCY_MS"), "ERP_API_LATENCY_MS", 300u64)?;

        let defaults = FixtureCounts::default();
        let counts = FixtureCounts {
            employees: parse_or(get("ERP_EMPLOYEES"), "ERP_EMPLOYEES", defaults.employees)?,
            customers: parse_or(get("ERP_CUSTOMERS"), "ERP_CUSTOMERS", defaults.customers)?,
            products: parse_or(get("ERP_PRODUCTS"), "ERP_PRODUCTS", defaults.products)?,
            ..defaults
        };

        Ok(Self {
            fixture: FixtureConfig {
                seed,
                anchor,
                tax_rate,
                counts,
            },
            page_size,
            api_latency_ms,
        })
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.fixture.seed, 42);
        assert_eq!(cfg.fixture.tax_rate, 8.0);
        assert_eq!(cfg.page_size, 15);
        assert_eq!(cfg.api_latency_ms, 300);
        assert_eq!(cfg.fixture.counts, FixtureCounts::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("ERP_SEED", "7"),
            ("ERP_ANCHOR_DATE", "2026-01-31"),
            ("ERP_TAX_RATE", "10.5"),
            ("ERP_EMPLOYEES", " 12 "),
            ("ERP_API_LATENCY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.fixture.seed, 7);
        assert_eq!(
            cfg.fixture.anchor,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        assert_eq!(cfg.fixture.tax_rate, 10.5);
        assert_eq!(cfg.fixture.counts.employees, 12);
        assert_eq!(cfg.api_latency_ms, 0);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("ERP_SEED", "abc")])).unwrap_err(),
            ConfigError::Invalid {
                key: "ERP_SEED",
                value: "abc".to_string()
            }
        );
        assert!(AppConfig::from_lookup(lookup(&[("ERP_ANCHOR_DATE", "16/10/2026")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("ERP_TAX_RATE", "150")])).is_err());
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("ERP_PAGE_SIZE", "0")])).unwrap_err(),
            ConfigError::Zero {
                key: "ERP_PAGE_SIZE"
            }
        );
    }

    #[test]
    fn test_blank_uses_default() {
        let cfg = AppConfig::from_lookup(lookup(&[("ERP_SEED", "   ")])).unwrap();
        assert_eq!(cfg.fixture.seed, 42);
    }
}
