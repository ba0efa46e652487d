pub const SESSION_STATE_KEY: &str = "calculator_state";
pub const SESSION_INACTIVITY_MINUTES: i64 = 60;

pub const DEFAULT_PORT: u16 = 8084;
pub const DEFAULT_NUMBER_LOCALE: &str = "en";

pub const DEFAULT_OPENING_BALANCE_833: i64 = 346110;
pub const DEFAULT_OPENING_BALANCE_116: i64 = 12527;
// 8.25 % p.a.
pub const DEFAULT_ANNUAL_RATE_BPS: i64 = 825;

pub const PAYMENT_DATE_FORMAT: &str = "%d-%m-%Y";
