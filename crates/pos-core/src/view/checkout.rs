use pos_types::domain::cart::format_idr;
use pos_types::domain::payment::PaymentMethod;

use crate::application::checkout::CheckoutState;

/// Payment dialog data. `visible == false` leaves the rest at display
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub visible: bool,
    pub method: Option<PaymentMethod>,
    pub total_display: String,
    pub amount_received: String,
    /// Never negative on screen; short payments show zero change plus the
    /// validation message.
    pub change_display: String,
    pub confirm_enabled: bool,
    pub validation_visible: bool,
    pub submitting: bool,
}

pub fn checkout_view(state: &CheckoutState) -> CheckoutView {
    let (session, submitting) = match state {
        CheckoutState::Closed => {
            return CheckoutView {
                visible: false,
                method: None,
                total_display: format_idr(0),
                amount_received: format_idr(0),
                change_display: format_idr(0),
                confirm_enabled: false,
                validation_visible: false,
                submitting: false,
            }
        }
        CheckoutState::Open(s) => (s, false),
        CheckoutState::Submitting(s) => (s, true),
    };

    let change = session.change();
    CheckoutView {
        visible: true,
        method: Some(session.method()),
        total_display: format_idr(session.grand_total()),
        amount_received: format_idr(session.amount_received()),
        change_display: format_idr(change.max(0)),
        confirm_enabled: session.confirm_enabled() && !submitting,
        validation_visible: session.method() == PaymentMethod::Cash && change < 0,
        submitting,
    }
}
