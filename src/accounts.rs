//! Reference information about Canadian registered savings accounts

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountKind {
    /// Tax-Free Savings Account
    Tfsa,
    /// Registered Retirement Savings Plan
    Rrsp,
    /// First Home Savings Account
    Fhsa,
    /// Registered Education Savings Plan
    Resp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub kind: AccountKind,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

static CATALOG: [AccountInfo; 4] = [
    AccountInfo {
        kind: AccountKind::Tfsa,
        title: "TFSA - Tax-Free Savings Account",
        description: "A flexible investment account where your money grows tax-free and withdrawals are not taxed.",
        url: "https://www.canada.ca/en/revenue-agency/services/tax/individuals/topics/tax-free-savings-account.html",
    },
    AccountInfo {
        kind: AccountKind::Rrsp,
        title: "RRSP - Registered Retirement Savings Plan",
        description: "Contributions are tax-deductible, and funds grow tax-deferred until withdrawal (usually at retirement).",
        url: "https://www.canada.ca/en/revenue-agency/services/tax/individuals/topics/registered-retirement-savings-plan-rrsp.html",
    },
    AccountInfo {
        kind: AccountKind::Fhsa,
        title: "FHSA - First Home Savings Account",
        description: "Helps first-time home buyers save for a home tax-free, combining benefits of both TFSA and RRSP.",
        url: "https://www.canada.ca/en/revenue-agency/services/tax/individuals/topics/first-home-savings-account.html",
    },
    AccountInfo {
        kind: AccountKind::Resp,
        title: "RESP - Registered Education Savings Plan",
        description: "Designed for saving for a child's post-secondary education, with government grants available.",
        url: "https://www.canada.ca/en/services/benefits/education/education-savings.html",
    },
];

/// All account types, in display order
pub fn catalog() -> &'static [AccountInfo] {
    &CATALOG
}

impl AccountKind {
    pub fn info(&self) -> &'static AccountInfo {
        match self {
            AccountKind::Tfsa => &CATALOG[0],
            AccountKind::Rrsp => &CATALOG[1],
            AccountKind::Fhsa => &CATALOG[2],
            AccountKind::Resp => &CATALOG[3],
        }
    }

    /// Short code, e.g. "TFSA"
    pub fn code(&self) -> &'static str {
        match self {
            AccountKind::Tfsa => "TFSA",
            AccountKind::Rrsp => "RRSP",
            AccountKind::Fhsa => "FHSA",
            AccountKind::Resp => "RESP",
        }
    }
}
