use num_format::Locale;
use rust_decimal::Decimal;

use super::{
    calculator::ScheduleConfig,
    shared::{
        constants::{DEFAULT_NUMBER_LOCALE, DEFAULT_PORT},
        env::{get_env_variable, parse_env_variable},
        format::parse_locale,
    },
};

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub schedule: ScheduleConfig,
    pub locale: Locale,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            schedule: ScheduleConfig::default(),
            locale: Locale::en,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            opening_balance_833: parse_env_variable::<Decimal>(
                "OPENING_BALANCE_833",
                defaults.opening_balance_833,
            )?,
            opening_balance_116: parse_env_variable::<Decimal>(
                "OPENING_BALANCE_116",
                defaults.opening_balance_116,
            )?,
            annual_rate_percent: parse_env_variable::<Decimal>(
                "ANNUAL_RATE",
                defaults.annual_rate_percent,
            )?,
        };

        schedule.ensure_representable()?;

        let locale_name =
            get_env_variable("NUMBER_LOCALE").unwrap_or_else(|| DEFAULT_NUMBER_LOCALE.to_string());

        Ok(AppConfig {
            schedule,
            locale: parse_locale(&locale_name)?,
            port: parse_env_variable("PORT", DEFAULT_PORT)?,
        })
    }
}
