pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: i64) -> f64 {
    if principal == 0.0 || annual_rate_percent == 0.0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_percent);
    // Month count stays in f64 so huge terms cannot overflow an integer exponent.
    let months = years as f64 * 12.0;
    let discount = (1.0 + r).powf(-months);
    principal * r / (1.0 - discount)
}

pub(crate) fn apply_monthly_payment(balance: f64, monthly_rate: f64, payment: f64) -> f64 {
    let interest = balance * monthly_rate;
    let principal_paid = payment - interest;
    (balance - principal_paid).max(0.0)
}
