//! Sample identities and accounts for the demo pages. Display-only data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub profession: &'static str,
    pub location: &'static str,
    pub created_at: &'static str,
    pub accounts_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: u32,
    pub website_name: &'static str,
    pub website_url: &'static str,
    pub identity_used: &'static str,
    pub is_active: bool,
    pub signup_completed: bool,
    pub created_at: &'static str,
    pub last_login: &'static str,
    pub automation_success: bool,
    pub notes: &'static str,
}

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub identities: u32,
    pub accounts: u32,
    pub success_rate_percent: u32,
}

pub const DASHBOARD_STATS: DashboardStats = DashboardStats {
    identities: 2,
    accounts: 2,
    success_rate_percent: 95,
};

pub const IDENTITIES: &[Identity] = &[
    Identity {
        id: 1,
        name: "Professional Identity",
        description: "For business and professional accounts",
        first_name: "Alex",
        last_name: "Johnson",
        email: "alex.johnson.pro@email.com",
        profession: "Software Developer",
        location: "San Francisco, CA",
        created_at: "2024-01-15",
        accounts_count: 5,
    },
    Identity {
        id: 2,
        name: "Personal Identity",
        description: "For social media and personal accounts",
        first_name: "Alex",
        last_name: "J",
        email: "alexj.personal@email.com",
        profession: "Tech Enthusiast",
        location: "California, USA",
        created_at: "2024-01-20",
        accounts_count: 3,
    },
];

pub const ACCOUNTS: &[Account] = &[
    Account {
        id: 1,
        website_name: "GitHub",
        website_url: "https://github.com",
        identity_used: "Professional Identity",
        is_active: true,
        signup_completed: true,
        created_at: "2024-01-20",
        last_login: "2024-01-25",
        automation_success: true,
        notes: "Used for software development projects",
    },
    Account {
        id: 2,
        website_name: "LinkedIn",
        website_url: "https://linkedin.com",
        identity_used: "Professional Identity",
        is_active: true,
        signup_completed: true,
        created_at: "2024-01-22",
        last_login: "2024-01-24",
        automation_success: true,
        notes: "Professional networking account",
    },
    Account {
        id: 3,
        website_name: "Twitter",
        website_url: "https://twitter.com",
        identity_used: "Personal Identity",
        is_active: true,
        signup_completed: false,
        created_at: "2024-01-23",
        last_login: "Never",
        automation_success: false,
        notes: "Email verification pending",
    },
    Account {
        id: 4,
        website_name: "Reddit",
        website_url: "https://reddit.com",
        identity_used: "Personal Identity",
        is_active: true,
        signup_completed: true,
        created_at: "2024-01-21",
        last_login: "2024-01-25",
        automation_success: true,
        notes: "Community discussions and tech news",
    },
    Account {
        id: 5,
        website_name: "StackOverflow",
        website_url: "https://stackoverflow.com",
        identity_used: "Professional Identity",
        is_active: true,
        signup_completed: true,
        created_at: "2024-01-19",
        last_login: "2024-01-24",
        automation_success: true,
        notes: "Technical Q&A and problem solving",
    },
];

// ── Account filter ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountFilter {
    #[default]
    All,
    Active,
    Completed,
    Pending,
}

impl AccountFilter {
    pub fn matches(self, account: &Account) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Active => account.is_active,
            AccountFilter::Completed => account.signup_completed,
            AccountFilter::Pending => !account.signup_completed,
        }
    }

    /// Next filter in toggle order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            AccountFilter::All => AccountFilter::Active,
            AccountFilter::Active => AccountFilter::Completed,
            AccountFilter::Completed => AccountFilter::Pending,
            AccountFilter::Pending => AccountFilter::All,
        }
    }
}

impl std::fmt::Display for AccountFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountFilter::All => write!(f, "all"),
            AccountFilter::Active => write!(f, "active"),
            AccountFilter::Completed => write!(f, "completed"),
            AccountFilter::Pending => write!(f, "pending"),
        }
    }
}

pub fn filter_accounts(accounts: &[Account], filter: AccountFilter) -> Vec<&Account> {
    accounts.iter().filter(|a| filter.matches(a)).collect()
}

/// Status badge label for an account row. An unfinished signup reads as
/// "Pending" whether or not the account is active.
pub fn account_status(account: &Account) -> &'static str {
    if !account.signup_completed {
        "Pending"
    } else if account.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Summary row shown above the account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Share of accounts whose automation succeeded, rounded to a whole percent
    pub success_rate_percent: u32,
}

pub fn account_stats(accounts: &[Account]) -> AccountStats {
    let total = accounts.len();
    let completed = accounts.iter().filter(|a| a.signup_completed).count();
    let automated = accounts.iter().filter(|a| a.automation_success).count();
    let success_rate_percent = if total == 0 {
        0
    } else {
        ((automated * 100 + total / 2) / total) as u32
    };
    AccountStats {
        total,
        completed,
        pending: total - completed,
        success_rate_percent,
    }
}
