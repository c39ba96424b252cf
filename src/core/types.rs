use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BucketId(pub i64);

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Extra mortgage payment source; a different id space from `BucketId`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AllocationId(pub i64);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub allocation: f64,
    pub return_rate: f64,
    pub reinvest: bool,
}

impl Strategy {
    pub fn fallback() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            allocation: 100.0,
            return_rate: 5.0,
            reinvest: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: BucketId,
    pub name: String,
    pub annual_amount: f64,
    #[serde(default)]
    pub starting_balance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAllocation {
    pub id: AllocationId,
    pub monthly_amount: f64,
}

fn default_appreciation_rate() -> f64 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub interest_rate: f64,
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: f64,
    pub monthly_payment: f64,
    #[serde(default)]
    pub linked_bucket_id: Option<AllocationId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub mortgage_balance: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub rent: f64,
    pub expense_ratio: f64,
    #[serde(default)]
    pub linked_bucket_id: Option<AllocationId>,
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRequest {
    pub mortgage_balance: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    #[serde(default)]
    pub extra_principal_monthly: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub contributions: Vec<Bucket>,
    #[serde(default)]
    pub strategies: HashMap<String, Vec<Strategy>>,
    pub projection_years: Vec<i64>,
    #[serde(default)]
    pub home_data: Option<HomeData>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub bucket_allocations: Vec<BucketAllocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint<V = f64> {
    pub x: u32,
    pub baseline: V,
    pub accelerated: V,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub name: String,
    pub portfolio_value: i64,
    pub base_value: i64,
    pub total_cash_flow: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub year: i64,
    pub buckets: BTreeMap<String, SnapshotEntry>,
    pub baseline_value: i64,
    pub total_value: i64,
}

impl Snapshot {
    pub fn empty(year: i64) -> Self {
        Self {
            year,
            buckets: BTreeMap::new(),
            baseline_value: 0,
            total_value: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub snapshots: Vec<Snapshot>,
    pub chart_data: Vec<ChartPoint<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCashFlow {
    pub id: i64,
    pub name: String,
    pub rent: f64,
    pub expenses: f64,
    pub monthly_payment: f64,
    pub net_cash_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCashFlowSummary {
    pub rentals: Vec<RentalCashFlow>,
    pub total_net_cash_flow: f64,
}
