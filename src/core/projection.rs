use tracing::debug;

use super::payment::{apply_monthly_payment, monthly_rate};
use super::types::{
    AllocationId, Bucket, BucketAllocation, ChartPoint, HomeData, ProjectionRequest,
    ProjectionResult, Rental, Snapshot, SnapshotEntry, Strategy,
};

pub const HORIZON_YEARS: u32 = 25;
const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug)]
struct StrategyState {
    strategy: Strategy,
    principal: f64,
    base_principal: f64,
    total_cash_flow: f64,
}

impl StrategyState {
    fn seed(strategy: Strategy, starting_balance: f64) -> Self {
        let seeded = starting_balance * strategy.allocation / 100.0;
        Self {
            strategy,
            principal: seeded,
            base_principal: seeded,
            total_cash_flow: 0.0,
        }
    }

    // Contribution lands on the live track before returns are applied.
    fn advance_year(&mut self, annual_amount: f64) {
        let rate = self.strategy.return_rate / 100.0;
        self.principal += annual_amount * self.strategy.allocation / 100.0;

        let growth = self.principal * rate;
        let base_growth = self.base_principal * rate;
        if self.strategy.reinvest {
            self.principal += growth;
            self.base_principal += base_growth;
        } else {
            self.total_cash_flow += growth;
        }
    }
}

#[derive(Debug)]
struct BucketState<'a> {
    bucket: &'a Bucket,
    strategies: Vec<StrategyState>,
}

impl<'a> BucketState<'a> {
    fn new(bucket: &'a Bucket, strategies: Vec<Strategy>) -> Self {
        let starting_balance = bucket.starting_balance.unwrap_or(0.0);
        Self {
            bucket,
            strategies: strategies
                .into_iter()
                .map(|s| StrategyState::seed(s, starting_balance))
                .collect(),
        }
    }

    fn advance_year(&mut self) {
        for strategy in &mut self.strategies {
            strategy.advance_year(self.bucket.annual_amount);
        }
    }

    fn principal(&self) -> f64 {
        self.strategies.iter().map(|s| s.principal).sum()
    }

    fn base_principal(&self) -> f64 {
        self.strategies.iter().map(|s| s.base_principal).sum()
    }

    fn total_cash_flow(&self) -> f64 {
        self.strategies.iter().map(|s| s.total_cash_flow).sum()
    }

    fn snapshot_entry(&self) -> SnapshotEntry {
        SnapshotEntry {
            name: self.bucket.name.clone(),
            portfolio_value: round_whole(self.principal()),
            base_value: round_whole(self.base_principal()),
            total_cash_flow: round_whole(self.total_cash_flow()),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PropertyKind {
    PrimaryHome,
    Rental(i64),
}

impl PropertyKind {
    fn snapshot_key(self) -> String {
        match self {
            PropertyKind::PrimaryHome => "primary-home".to_string(),
            PropertyKind::Rental(id) => format!("rental-{id}"),
        }
    }
}

#[derive(Debug)]
struct PropertyState {
    kind: PropertyKind,
    display_name: String,
    value: f64,
    base_value: f64,
    debt: f64,
    base_debt: f64,
    interest_rate: f64,
    appreciation_rate: f64,
    monthly_payment: f64,
    linked_allocation: Option<AllocationId>,
}

impl PropertyState {
    fn from_home(home: &HomeData) -> Self {
        Self {
            kind: PropertyKind::PrimaryHome,
            display_name: "Primary Home Equity".to_string(),
            value: home.home_value,
            base_value: home.home_value,
            debt: home.mortgage_balance,
            base_debt: home.mortgage_balance,
            interest_rate: home.interest_rate,
            appreciation_rate: home.appreciation_rate,
            monthly_payment: home.monthly_payment,
            linked_allocation: home.linked_bucket_id,
        }
    }

    fn from_rental(rental: &Rental) -> Self {
        Self {
            kind: PropertyKind::Rental(rental.id),
            display_name: format!("{} (Equity)", rental.name),
            value: rental.value,
            base_value: rental.value,
            debt: rental.mortgage_balance,
            base_debt: rental.mortgage_balance,
            interest_rate: rental.interest_rate,
            appreciation_rate: rental.appreciation_rate,
            monthly_payment: rental.monthly_payment,
            linked_allocation: rental.linked_bucket_id,
        }
    }

    // `extra` only reaches the live debt.
    fn advance_year(&mut self, extra: f64) {
        let r = monthly_rate(self.interest_rate);
        let appreciation = 1.0 + self.appreciation_rate / 100.0;
        self.value *= appreciation;
        self.base_value *= appreciation;

        for _ in 0..MONTHS_PER_YEAR {
            if self.debt > 0.0 {
                self.debt = apply_monthly_payment(self.debt, r, self.monthly_payment + extra);
            }
            if self.base_debt > 0.0 {
                self.base_debt = apply_monthly_payment(self.base_debt, r, self.monthly_payment);
            }
        }
    }

    fn net_value(&self) -> f64 {
        self.value - self.debt
    }

    fn equity(&self) -> f64 {
        (self.value - self.debt).max(0.0)
    }

    fn base_equity(&self) -> f64 {
        (self.base_value - self.base_debt).max(0.0)
    }

    fn snapshot_entry(&self) -> SnapshotEntry {
        SnapshotEntry {
            name: self.display_name.clone(),
            portfolio_value: round_whole(self.equity()),
            base_value: round_whole(self.base_equity()),
            total_cash_flow: 0,
        }
    }
}

fn resolve_strategies(request: &ProjectionRequest, bucket: &Bucket) -> Vec<Strategy> {
    match request.strategies.get(&bucket.id.to_string()) {
        Some(strategies) if !strategies.is_empty() => strategies.clone(),
        _ => vec![Strategy::fallback()],
    }
}

fn extra_monthly_payment(allocations: &[BucketAllocation], linked: Option<AllocationId>) -> f64 {
    let Some(linked) = linked else {
        return 0.0;
    };
    allocations
        .iter()
        .find(|allocation| allocation.id == linked)
        .map_or(0.0, |allocation| allocation.monthly_amount)
}

fn build_properties(request: &ProjectionRequest) -> Vec<PropertyState> {
    request
        .home_data
        .iter()
        .map(PropertyState::from_home)
        .chain(request.rentals.iter().map(PropertyState::from_rental))
        .collect()
}

// One per distinct year, first occurrence wins.
fn empty_snapshots(years: &[i64]) -> Vec<Snapshot> {
    let mut snapshots: Vec<Snapshot> = Vec::with_capacity(years.len());
    for &year in years {
        if !snapshots.iter().any(|s| s.year == year) {
            snapshots.push(Snapshot::empty(year));
        }
    }
    snapshots
}

fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

pub fn run_projection(request: &ProjectionRequest) -> ProjectionResult {
    let mut buckets: Vec<BucketState<'_>> = request
        .contributions
        .iter()
        .map(|bucket| BucketState::new(bucket, resolve_strategies(request, bucket)))
        .collect();
    let mut properties = build_properties(request);
    let mut snapshots = empty_snapshots(&request.projection_years);

    let initial_net_worth: f64 = request
        .contributions
        .iter()
        .map(|b| b.starting_balance.unwrap_or(0.0))
        .sum::<f64>()
        + properties.iter().map(PropertyState::net_value).sum::<f64>();

    let mut chart_data = Vec::with_capacity(HORIZON_YEARS as usize + 1);
    chart_data.push(ChartPoint {
        x: 0,
        baseline: round_whole(initial_net_worth),
        accelerated: round_whole(initial_net_worth),
    });

    for year in 1..=HORIZON_YEARS {
        let mut yearly_total = 0.0;
        let mut yearly_base = 0.0;

        for bucket in &mut buckets {
            bucket.advance_year();
            yearly_total += bucket.principal();
            yearly_base += bucket.base_principal();
        }

        for property in &mut properties {
            let extra =
                extra_monthly_payment(&request.bucket_allocations, property.linked_allocation);
            property.advance_year(extra);
            yearly_total += property.equity();
            yearly_base += property.base_equity();
        }

        chart_data.push(ChartPoint {
            x: year,
            baseline: round_whole(yearly_base),
            accelerated: round_whole(yearly_total),
        });

        if let Some(snapshot) = snapshots.iter_mut().find(|s| s.year == i64::from(year)) {
            snapshot.total_value = round_whole(yearly_total);
            snapshot.baseline_value = round_whole(yearly_base);
            for bucket in &buckets {
                snapshot
                    .buckets
                    .insert(bucket.bucket.id.to_string(), bucket.snapshot_entry());
            }
            for property in &properties {
                snapshot
                    .buckets
                    .insert(property.kind.snapshot_key(), property.snapshot_entry());
            }
        }
    }

    debug!(
        buckets = buckets.len(),
        properties = properties.len(),
        snapshots = snapshots.len(),
        "projection computed"
    );

    ProjectionResult {
        snapshots,
        chart_data,
    }
}
