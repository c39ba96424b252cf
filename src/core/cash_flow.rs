use super::types::{Rental, RentalCashFlow, RentalCashFlowSummary};

impl Rental {
    pub fn monthly_expenses(&self) -> f64 {
        self.rent * self.expense_ratio / 100.0
    }

    pub fn monthly_net_cash_flow(&self) -> f64 {
        self.rent - self.monthly_expenses() - self.monthly_payment
    }
}

pub fn summarize_rental_cash_flow(rentals: &[Rental]) -> RentalCashFlowSummary {
    let rentals: Vec<RentalCashFlow> = rentals
        .iter()
        .map(|rental| RentalCashFlow {
            id: rental.id,
            name: rental.name.clone(),
            rent: rental.rent,
            expenses: rental.monthly_expenses(),
            monthly_payment: rental.monthly_payment,
            net_cash_flow: rental.monthly_net_cash_flow(),
        })
        .collect();
    let total_net_cash_flow = rentals.iter().map(|r| r.net_cash_flow).sum();

    RentalCashFlowSummary {
        rentals,
        total_net_cash_flow,
    }
}
