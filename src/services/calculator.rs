use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::shared::constants::{
    DEFAULT_ANNUAL_RATE_BPS, DEFAULT_OPENING_BALANCE_116, DEFAULT_OPENING_BALANCE_833,
    PAYMENT_DATE_FORMAT,
};

// twelve months times the percent scale
const RATE_MONTH_DIVISOR: Decimal = dec!(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDefinition {
    pub date: NaiveDate,
    pub month_number: u32,
}

/// A run of consecutive month-end payment dates. `first_month_number` is the
/// interest multiplier of the first period and grows by one per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualWindow {
    pub start_year: i32,
    pub start_month: u32,
    pub first_month_number: u32,
    pub len: u32,
}

/// March 2024 up to and including March 2025.
pub const OPENING_WINDOW: AccrualWindow = AccrualWindow {
    start_year: 2024,
    start_month: 3,
    first_month_number: 0,
    len: 13,
};

/// April 2025 to July 2025, accruing on the opening window's closing total.
pub const CARRY_FORWARD_WINDOW: AccrualWindow = AccrualWindow {
    start_year: 2025,
    start_month: 4,
    first_month_number: 1,
    len: 4,
};

impl AccrualWindow {
    pub fn periods(&self) -> Vec<PeriodDefinition> {
        let Some(first_of_month) = NaiveDate::from_ymd_opt(self.start_year, self.start_month, 1)
        else {
            return vec![];
        };

        (0..self.len)
            .filter_map(|offset| {
                let date = first_of_month
                    .checked_add_months(Months::new(offset + 1))?
                    .pred_opt()?;
                Some(PeriodDefinition {
                    date,
                    month_number: self.first_month_number + offset,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub payment_date: NaiveDate,
    pub opening_balance: Decimal,
    pub interest: Decimal,
    pub total_payable: Decimal,
}

impl ScheduleRow {
    pub fn payment_label(&self) -> String {
        self.payment_date.format(PAYMENT_DATE_FORMAT).to_string()
    }
}

pub type Schedule = Vec<ScheduleRow>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionTables {
    #[serde(rename = "table833")]
    pub table_833: Schedule,
    #[serde(rename = "table116")]
    pub table_116: Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub opening_balance_833: Decimal,
    pub opening_balance_116: Decimal,
    pub annual_rate_percent: Decimal,
}

impl ScheduleConfig {
    /// Fails when either schedule would leave the `Decimal` range. Interest
    /// grows with the month number, so the last period of each window bounds it.
    pub fn ensure_representable(&self) -> anyhow::Result<()> {
        for (name, opening_balance) in [
            ("OPENING_BALANCE_833", self.opening_balance_833),
            ("OPENING_BALANCE_116", self.opening_balance_116),
        ] {
            let closing_balance = window_closing_balance(
                opening_balance,
                &OPENING_WINDOW,
                self.annual_rate_percent,
            )
            .and_then(|closing| {
                window_closing_balance(closing, &CARRY_FORWARD_WINDOW, self.annual_rate_percent)
            });
            if closing_balance.is_none() {
                anyhow::bail!(
                    "{} of {} at {}% p.a. is too large to calculate",
                    name,
                    opening_balance,
                    self.annual_rate_percent
                );
            }
        }
        Ok(())
    }
}

fn window_closing_balance(
    opening_balance: Decimal,
    window: &AccrualWindow,
    annual_rate_percent: Decimal,
) -> Option<Decimal> {
    let last_month_number = window.first_month_number + window.len.saturating_sub(1);
    let interest =
        checked_monthly_interest(opening_balance, last_month_number, annual_rate_percent)?;
    opening_balance.checked_add(interest)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            opening_balance_833: Decimal::from(DEFAULT_OPENING_BALANCE_833),
            opening_balance_116: Decimal::from(DEFAULT_OPENING_BALANCE_116),
            annual_rate_percent: Decimal::new(DEFAULT_ANNUAL_RATE_BPS, 2),
        }
    }
}

/// Simple interest for `month_number` months, rounded to whole units with
/// halves going up (`floor(x + 0.5)`). Saturates at the `Decimal` bounds.
pub fn compute_monthly_interest(
    opening_balance: Decimal,
    month_number: u32,
    annual_rate_percent: Decimal,
) -> Decimal {
    let accrued = opening_balance
        .saturating_mul(annual_rate_percent)
        .saturating_mul(Decimal::from(month_number))
        / RATE_MONTH_DIVISOR;
    accrued.saturating_add(dec!(0.5)).floor()
}

/// Like [`compute_monthly_interest`], but `None` once the result leaves the
/// `Decimal` range.
pub fn checked_monthly_interest(
    opening_balance: Decimal,
    month_number: u32,
    annual_rate_percent: Decimal,
) -> Option<Decimal> {
    let accrued = opening_balance
        .checked_mul(annual_rate_percent)?
        .checked_mul(Decimal::from(month_number))?
        .checked_div(RATE_MONTH_DIVISOR)?;
    Some(accrued.checked_add(dec!(0.5))?.floor())
}

/// One row per period, all accruing on the same opening balance.
pub fn compute_year_table(
    opening_balance: Decimal,
    periods: &[PeriodDefinition],
    annual_rate_percent: Decimal,
) -> Schedule {
    periods
        .iter()
        .map(|period| {
            let interest =
                compute_monthly_interest(opening_balance, period.month_number, annual_rate_percent);
            ScheduleRow {
                payment_date: period.date,
                opening_balance,
                interest,
                total_payable: opening_balance.saturating_add(interest),
            }
        })
        .collect()
}

pub fn compute_full_schedule(opening_balance: Decimal, annual_rate_percent: Decimal) -> Schedule {
    let mut schedule = compute_year_table(
        opening_balance,
        &OPENING_WINDOW.periods(),
        annual_rate_percent,
    );

    let closing_balance = schedule
        .last()
        .map(|row| row.total_payable)
        .unwrap_or(opening_balance);

    schedule.extend(compute_year_table(
        closing_balance,
        &CARRY_FORWARD_WINDOW.periods(),
        annual_rate_percent,
    ));
    schedule
}

pub fn calculate_pension_tables(config: &ScheduleConfig) -> PensionTables {
    PensionTables {
        table_833: compute_full_schedule(config.opening_balance_833, config.annual_rate_percent),
        table_116: compute_full_schedule(config.opening_balance_116, config.annual_rate_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: Decimal = dec!(8.25);

    #[test]
    fn month_zero_accrues_nothing() {
        assert_eq!(compute_monthly_interest(dec!(346110), 0, RATE), dec!(0));
        assert_eq!(compute_monthly_interest(dec!(-5000), 0, dec!(12)), dec!(0));
        assert_eq!(compute_monthly_interest(dec!(0), 0, dec!(0)), dec!(0));
    }

    #[test]
    fn first_month_interest_is_rounded_to_whole_units() {
        // 346110 * 8.25 / 1200 = 2379.50625
        assert_eq!(compute_monthly_interest(dec!(346110), 1, RATE), dec!(2380));
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(compute_monthly_interest(dec!(1200), 1, dec!(0.5)), dec!(1));
        assert_eq!(compute_monthly_interest(dec!(-1200), 1, dec!(0.5)), dec!(0));
        assert_eq!(compute_monthly_interest(dec!(-3600), 1, dec!(0.5)), dec!(-1));
    }

    #[test]
    fn year_table_does_not_compound_within_a_window() {
        let periods = OPENING_WINDOW.periods();
        let table = compute_year_table(dec!(346110), &periods, RATE);

        assert_eq!(table.len(), 13);
        assert!(table.iter().all(|row| row.opening_balance == dec!(346110)));
        assert_eq!(table[0].interest, dec!(0));
        assert_eq!(table[0].total_payable, dec!(346110));
        assert_eq!(table[1].total_payable, dec!(348490));
        assert_eq!(table[12].interest, dec!(28554));
        assert_eq!(table[12].total_payable, dec!(374664));
    }

    #[test]
    fn year_table_of_no_periods_is_empty() {
        assert!(compute_year_table(dec!(1000), &[], RATE).is_empty());
    }

    #[test]
    fn windows_cover_the_month_ends() {
        let labels: Vec<String> = OPENING_WINDOW
            .periods()
            .iter()
            .chain(CARRY_FORWARD_WINDOW.periods().iter())
            .map(|period| period.date.format(PAYMENT_DATE_FORMAT).to_string())
            .collect();

        assert_eq!(
            labels,
            vec![
                "31-03-2024",
                "30-04-2024",
                "31-05-2024",
                "30-06-2024",
                "31-07-2024",
                "31-08-2024",
                "30-09-2024",
                "31-10-2024",
                "30-11-2024",
                "31-12-2024",
                "31-01-2025",
                "28-02-2025",
                "31-03-2025",
                "30-04-2025",
                "31-05-2025",
                "30-06-2025",
                "31-07-2025",
            ]
        );
    }

    #[test]
    fn window_month_numbers() {
        let opening: Vec<u32> = OPENING_WINDOW.periods().iter().map(|p| p.month_number).collect();
        let carry: Vec<u32> = CARRY_FORWARD_WINDOW
            .periods()
            .iter()
            .map(|p| p.month_number)
            .collect();

        assert_eq!(opening, (0..=12).collect::<Vec<u32>>());
        assert_eq!(carry, vec![1, 2, 3, 4]);
    }

    #[test]
    fn full_schedule_chains_the_closing_balance() {
        let schedule = compute_full_schedule(dec!(346110), RATE);

        assert_eq!(schedule.len(), 17);
        assert_eq!(schedule[13].opening_balance, schedule[12].total_payable);
        assert_eq!(schedule[13].opening_balance, dec!(374664));
        // 374664 * 8.25 / 1200 = 2575.815
        assert_eq!(schedule[13].interest, dec!(2576));
        assert_eq!(schedule[13].total_payable, dec!(377240));
        assert_eq!(schedule[16].interest, dec!(10303));
        assert_eq!(schedule[16].total_payable, dec!(384967));
    }

    #[test]
    fn full_schedule_accepts_zero_and_negative_balances() {
        let zero = compute_full_schedule(dec!(0), RATE);
        assert_eq!(zero.len(), 17);
        assert!(zero.iter().all(|row| row.total_payable == dec!(0)));

        let negative = compute_full_schedule(dec!(-12000), dec!(10));
        assert_eq!(negative.len(), 17);
        assert_eq!(negative[12].total_payable, dec!(-13200));
        assert_eq!(negative[13].opening_balance, dec!(-13200));
    }

    #[test]
    fn oversized_balances_saturate_instead_of_panicking() {
        let huge = Decimal::from_str_exact("1000000000000000000000000000").unwrap();

        let schedule = compute_full_schedule(huge, RATE);

        assert_eq!(schedule.len(), 17);
        assert_eq!(checked_monthly_interest(huge, 12, RATE), None);
        assert_eq!(
            checked_monthly_interest(dec!(346110), 1, RATE),
            Some(compute_monthly_interest(dec!(346110), 1, RATE))
        );
    }

    #[test]
    fn unrepresentable_configs_are_rejected() {
        assert!(ScheduleConfig::default().ensure_representable().is_ok());

        let config = ScheduleConfig {
            opening_balance_833: Decimal::from_str_exact("1000000000000000000000000000").unwrap(),
            ..ScheduleConfig::default()
        };
        let err = config.ensure_representable().unwrap_err();

        assert!(err.to_string().starts_with("OPENING_BALANCE_833"));
    }

    #[test]
    fn full_schedule_is_deterministic() {
        assert_eq!(
            compute_full_schedule(dec!(12527), RATE),
            compute_full_schedule(dec!(12527), RATE)
        );
    }

    #[test]
    fn pension_tables_use_both_opening_balances() {
        let tables = calculate_pension_tables(&ScheduleConfig::default());

        assert_eq!(tables.table_833.len(), 17);
        assert_eq!(tables.table_116.len(), 17);
        assert_eq!(tables.table_833[0].opening_balance, dec!(346110));
        assert_eq!(tables.table_116[0].opening_balance, dec!(12527));
        assert_eq!(tables.table_116[1].interest, dec!(86));
        assert_eq!(tables.table_116[12].total_payable, dec!(13560));
        assert_eq!(tables.table_116[13].interest, dec!(93));
    }

    #[test]
    fn rows_serialize_with_camel_case_keys() {
        let tables = calculate_pension_tables(&ScheduleConfig::default());
        let json = serde_json::to_value(&tables).unwrap();

        let first = &json["table833"][0];
        assert_eq!(first["paymentDate"], "2024-03-31");
        assert_eq!(first["openingBalance"], "346110");
        assert_eq!(first["totalPayable"], "346110");
        assert_eq!(json["table116"].as_array().unwrap().len(), 17);
    }
}
