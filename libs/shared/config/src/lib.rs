use std::env;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub matching_max_results: usize,
    pub analytics_window_days: u32,
    pub analytics_peak_window_hours: u32,
    pub analytics_cluster_gap_minutes: i64,
    pub workload_overload_gap_minutes: f64,
    pub workload_underutilized_gap_minutes: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            matching_max_results: 5,
            analytics_window_days: 30,
            analytics_peak_window_hours: 3,
            analytics_cluster_gap_minutes: 30,
            workload_overload_gap_minutes: 15.0,
            workload_underutilized_gap_minutes: 120.0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    debug!("SERVER_HOST not set, using {}", defaults.server_host);
                    defaults.server_host.clone()
                }),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            matching_max_results: parse_var("MATCHING_MAX_RESULTS", defaults.matching_max_results),
            analytics_window_days: parse_var("ANALYTICS_WINDOW_DAYS", defaults.analytics_window_days),
            analytics_peak_window_hours: parse_var(
                "ANALYTICS_PEAK_WINDOW_HOURS",
                defaults.analytics_peak_window_hours,
            ),
            analytics_cluster_gap_minutes: parse_var(
                "ANALYTICS_CLUSTER_GAP_MINUTES",
                defaults.analytics_cluster_gap_minutes,
            ),
            workload_overload_gap_minutes: parse_var(
                "WORKLOAD_OVERLOAD_GAP_MINUTES",
                defaults.workload_overload_gap_minutes,
            ),
            workload_underutilized_gap_minutes: parse_var(
                "WORKLOAD_UNDERUTILIZED_GAP_MINUTES",
                defaults.workload_underutilized_gap_minutes,
            ),
        };

        if !config.is_consistent() {
            warn!("Workload thresholds are inverted - overload gap is not below the underutilized gap");
        }

        config
    }

    /// Address the API server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn is_consistent(&self) -> bool {
        self.workload_overload_gap_minutes < self.workload_underutilized_gap_minutes
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            debug!("{} not set, using default {}", name, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();

        assert_eq!(config.matching_max_results, 5);
        assert_eq!(config.analytics_window_days, 30);
        assert_eq!(config.analytics_peak_window_hours, 3);
        assert_eq!(config.analytics_cluster_gap_minutes, 30);
        assert!(config.is_consistent());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_var_falls_back_on_missing() {
        let value: u32 = parse_var("TELECLINIC_TEST_SURELY_UNSET_VARIABLE", 42);
        assert_eq!(value, 42);
    }
}
