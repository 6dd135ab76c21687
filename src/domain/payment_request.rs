/// A payment request with both the processor token and the amount present.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub token: String,
    pub amount: f64,
}

impl PaymentRequest {
    /// Amount in the smallest currency unit, as payment processors expect it.
    pub fn amount_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }
}
