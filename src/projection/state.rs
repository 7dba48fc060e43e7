//! Accumulation state for a single savings track

/// State of one account at a point in time during projection
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub projection_month: u32,

    /// Unrounded running balance
    pub balance: f64,

    /// Deposit made at the end of every month
    pub monthly_contribution: f64,

    /// Monthly compounding rate as a decimal
    pub monthly_rate: f64,
}

impl AccountState {
    /// Start an empty account
    pub fn new(monthly_contribution: f64, annual_rate_percent: f64) -> Self {
        Self {
            projection_month: 0,
            balance: 0.0,
            monthly_contribution,
            monthly_rate: monthly_rate(annual_rate_percent),
        }
    }

    /// Grow the balance by one month of interest, then deposit
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.balance = self.balance * (1.0 + self.monthly_rate) + self.monthly_contribution;
    }

    /// True on the last month of each year (12, 24, ...)
    pub fn is_year_end(&self) -> bool {
        self.projection_month > 0 && self.projection_month % 12 == 0
    }

    /// Number of full years elapsed
    pub fn completed_years(&self) -> u32 {
        self.projection_month / 12
    }

    /// Total deposited so far
    pub fn cumulative_deposit(&self) -> f64 {
        self.monthly_contribution * self.projection_month as f64
    }
}

/// Convert an annual percentage rate into a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Round to whole cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
