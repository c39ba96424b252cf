mod amortization;
mod cash_flow;
mod payment;
mod projection;
mod types;

pub use amortization::{MAX_MONTHS, SAMPLE_INTERVAL_MONTHS, run_amortization_schedule};
pub use cash_flow::summarize_rental_cash_flow;
pub use payment::{monthly_payment, monthly_rate};
pub use projection::{HORIZON_YEARS, run_projection};
pub use types::{
    AllocationId, AmortizationRequest, Bucket, BucketAllocation, BucketId, ChartPoint, HomeData,
    ProjectionRequest, ProjectionResult, Rental, RentalCashFlow, RentalCashFlowSummary, Snapshot,
    SnapshotEntry, Strategy,
};
