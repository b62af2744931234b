//! Projection preferences and the household member directory.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::amortization::{
    AmortizationSchedule, DEFAULT_HORIZON_MONTHS, MAX_PROJECTION_MONTHS, project_debt,
};
use crate::clock::Clock;
use crate::model::{Debt, SavingsAccount};
use crate::rate::RateConvention;
use crate::savings::{SavingsProjection, project_savings_growth};

/// A person sharing the household's finances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: String,
    pub display_name: String,
    /// Sign-in addresses that identify this member.
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Stores user-configurable projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Months of payoff schedule to project before reporting "beyond horizon".
    pub amortization_horizon_months: u32,
    pub savings_horizon_months: u32,
    pub savings_rate_convention: RateConvention,
    pub household: Vec<HouseholdMember>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            amortization_horizon_months: DEFAULT_HORIZON_MONTHS,
            savings_horizon_months: 12,
            savings_rate_convention: RateConvention::Nominal,
            household: Vec::new(),
        }
    }
}

impl ProjectionConfig {
    /// Reads the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no projection config found, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading projection config {}", path.display()))?;
        let config = Self::from_json_str(&data)
            .with_context(|| format!("parsing projection config {}", path.display()))?;
        info!(
            path = %path.display(),
            members = config.household.len(),
            "projection config loaded"
        );
        Ok(config)
    }

    pub fn from_json_str(data: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.check()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing projection config {}", path.display()))?;
        Ok(())
    }

    /// Payoff schedule for `debt` from today over the configured horizon.
    pub fn debt_schedule(&self, debt: &Debt, clock: &dyn Clock) -> AmortizationSchedule {
        project_debt(debt, clock, self.amortization_horizon_months)
    }

    /// Growth of `account` over the configured horizon and rate convention.
    pub fn savings_projection(&self, account: &SavingsAccount) -> SavingsProjection {
        project_savings_growth(account.balance, account.aer, self.savings_horizon_months)
            .with_convention(self.savings_rate_convention)
    }

    /// The member that signs in with `email`, compared case-insensitively.
    pub fn member_for_email(&self, email: &str) -> Option<&HouseholdMember> {
        let wanted = email.trim();
        self.household.iter().find(|member| {
            member
                .emails
                .iter()
                .any(|known| known.eq_ignore_ascii_case(wanted))
        })
    }

    pub fn is_authorized_email(&self, email: &str) -> bool {
        self.member_for_email(email).is_some()
    }

    fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=MAX_PROJECTION_MONTHS).contains(&self.amortization_horizon_months),
            "amortization_horizon_months must be between 1 and {MAX_PROJECTION_MONTHS}"
        );
        anyhow::ensure!(
            self.savings_horizon_months <= MAX_PROJECTION_MONTHS,
            "savings_horizon_months must be at most {MAX_PROJECTION_MONTHS}"
        );
        let mut ids: Vec<&str> = self.household.iter().map(|member| member.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            anyhow::bail!("household member `{}` is listed twice", pair[0]);
        }
        Ok(())
    }
}
