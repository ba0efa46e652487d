use std::str::FromStr;

use anyhow::anyhow;
use dotenvy::{dotenv, from_filename, var};
use tracing::{info, warn};

pub fn check_for_env_variables() {
    match get_env_variable("OPENING_BALANCE_833") {
        Some(value) => info!("Opening balance (8.33%) set to {} ✅", value),
        None => info!("OPENING_BALANCE_833 not set, using the default opening balance"),
    };
    match get_env_variable("OPENING_BALANCE_116") {
        Some(value) => info!("Opening balance (1.16%) set to {} ✅", value),
        None => info!("OPENING_BALANCE_116 not set, using the default opening balance"),
    };
    match get_env_variable("ANNUAL_RATE") {
        Some(value) => info!("Annual interest rate set to {}% ✅", value),
        None => info!("ANNUAL_RATE not set, using the default rate"),
    };
    if get_env_variable("NUMBER_LOCALE").is_none() {
        warn!("NUMBER_LOCALE not set, amounts will use the `en` thousands separator ⚠️");
    }
}

fn env_file_for(environment: &str) -> Option<&'static str> {
    match environment {
        "development" => Some(".env.dev"),
        "production" => Some(".env.prod"),
        _ => None,
    }
}

/// Looks a variable up after loading the env file for `RUST_ENV`. Blank
/// values count as unset.
pub fn get_env_variable(variable_to_get: &str) -> Option<String> {
    let environment = var("RUST_ENV").unwrap_or_else(|_| "development".into());

    match env_file_for(&environment) {
        Some(file_name) => from_filename(file_name).ok(),
        None => dotenv().ok(),
    };
    var(variable_to_get)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Reads and parses a variable, falling back to `default` when it is unset.
pub fn parse_env_variable<T>(variable_to_get: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_variable(variable_to_get) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value {:?} for {}: {}", raw, variable_to_get, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_env_file_per_environment() {
        assert_eq!(env_file_for("development"), Some(".env.dev"));
        assert_eq!(env_file_for("production"), Some(".env.prod"));
        assert_eq!(env_file_for("staging"), None);
    }

    #[test]
    fn parses_set_variables_and_defaults_unset_ones() {
        std::env::set_var("PENSION_CALCULATOR_TEST_PORT", "9000");
        std::env::set_var("PENSION_CALCULATOR_TEST_BLANK", "  ");

        assert_eq!(parse_env_variable("PENSION_CALCULATOR_TEST_PORT", 8084u16).unwrap(), 9000);
        assert_eq!(parse_env_variable("PENSION_CALCULATOR_TEST_BLANK", 8084u16).unwrap(), 8084);
        assert_eq!(parse_env_variable("PENSION_CALCULATOR_TEST_UNSET", 8084u16).unwrap(), 8084);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        std::env::set_var("PENSION_CALCULATOR_TEST_RATE", "eight");

        let err = parse_env_variable("PENSION_CALCULATOR_TEST_RATE", 0u16).unwrap_err();

        assert!(err.to_string().contains("PENSION_CALCULATOR_TEST_RATE"));
    }
}
