use pos_types::domain::payment::PaymentMethod;

/// Parse a raw amount-received entry. Non-numeric input counts as zero;
/// fractional rupiah are rounded.
pub fn parse_amount(raw: &str) -> i64 {
    raw.trim()
        .parse::<f64>()
        .map(|v| v.round() as i64)
        .unwrap_or(0)
}

/// One checkout attempt. Created when the payment dialog opens, discarded on
/// close or on a successful submit. The grand total is snapshotted at open
/// time and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    method: PaymentMethod,
    amount_received: i64,
    grand_total: i64,
}

impl CheckoutSession {
    /// Fresh session: cash selected, nothing received, confirm disabled.
    pub fn open(grand_total: i64) -> Self {
        Self {
            method: PaymentMethod::Cash,
            amount_received: 0,
            grand_total,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn grand_total(&self) -> i64 {
        self.grand_total
    }

    pub fn amount_received(&self) -> i64 {
        self.amount_received
    }

    /// Switch payment method. Qris pins the received amount to the exact
    /// grand total; switching back to cash clears it for manual entry.
    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
        self.amount_received = match method {
            PaymentMethod::Cash => 0,
            PaymentMethod::Qris => self.grand_total,
        };
    }

    /// Record a cash entry. Ignored under qris, where the amount is pinned.
    pub fn enter_amount(&mut self, raw: &str) {
        if self.method == PaymentMethod::Qris {
            return;
        }
        self.amount_received = parse_amount(raw);
    }

    /// received − total; negative means the cash tendered is short.
    pub fn change(&self) -> i64 {
        self.amount_received - self.grand_total
    }

    /// Qris is trusted as exact payment and bypasses the change check.
    pub fn confirm_enabled(&self) -> bool {
        self.method == PaymentMethod::Qris || self.change() >= 0
    }
}

/// Checkout lifecycle: `Closed → Open ⇄ Open → Submitting → Closed`.
/// `Submitting` keeps the session so a failed submit reopens it unchanged,
/// and blocks a second submit while one is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Closed,
    Open(CheckoutSession),
    Submitting(CheckoutSession),
}

impl CheckoutState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_on_cash_with_confirm_disabled() {
        let s = CheckoutSession::open(22_000);
        assert_eq!(s.method(), PaymentMethod::Cash);
        assert_eq!(s.amount_received(), 0);
        assert!(!s.confirm_enabled());
    }

    #[test]
    fn qris_pins_amount_and_enables_confirm() {
        let mut s = CheckoutSession::open(22_000);
        s.select_method(PaymentMethod::Qris);
        assert_eq!(s.amount_received(), 22_000);
        assert_eq!(s.change(), 0);
        assert!(s.confirm_enabled());
    }

    #[test]
    fn switching_back_to_cash_clears_and_disables() {
        let mut s = CheckoutSession::open(22_000);
        s.select_method(PaymentMethod::Qris);
        s.select_method(PaymentMethod::Cash);
        assert_eq!(s.amount_received(), 0);
        assert!(!s.confirm_enabled());
    }

    #[test]
    fn change_boundaries_drive_confirm() {
        let mut s = CheckoutSession::open(22_000);
        s.enter_amount("21999");
        assert_eq!(s.change(), -1);
        assert!(!s.confirm_enabled());

        s.enter_amount("22000");
        assert_eq!(s.change(), 0);
        assert!(s.confirm_enabled());

        s.enter_amount("25000");
        assert_eq!(s.change(), 3_000);
        assert!(s.confirm_enabled());
    }

    #[test]
    fn non_numeric_amount_counts_as_zero() {
        let mut s = CheckoutSession::open(10_000);
        s.enter_amount("abc");
        assert_eq!(s.amount_received(), 0);
        s.enter_amount("");
        assert_eq!(s.amount_received(), 0);
        s.enter_amount("  15000 ");
        assert_eq!(s.amount_received(), 15_000);
    }

    #[test]
    fn amount_entry_is_ignored_under_qris() {
        let mut s = CheckoutSession::open(10_000);
        s.select_method(PaymentMethod::Qris);
        s.enter_amount("1");
        assert_eq!(s.amount_received(), 10_000);
    }

    #[test]
    fn fractional_entry_rounds() {
        assert_eq!(parse_amount("100.4"), 100);
        assert_eq!(parse_amount("100.5"), 101);
    }
}
