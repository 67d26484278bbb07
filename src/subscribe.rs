//! Non-authenticated card charges, billing keys and scheduled payments
//!
//! Charges (`pay_*`) are validated after the call: the provider must report
//! the payment as `paid` for exactly the requested amount, otherwise the
//! call fails with a validation error carrying the provider's
//! `fail_reason`. `amount` must be sent as a JSON number; a string amount
//! never validates, even when the provider charges it.

use crate::client::{segment, Iamport, RequestSpec};
use crate::types::IamportResponse;
use crate::validation::{into_params, require_params, validate_payment, Params};
use crate::Result;
use serde_json::Value;

impl Iamport {
    async fn charge(&self, path: &str, params: Params) -> Result<IamportResponse> {
        let amount = params.get("amount").cloned().unwrap_or(Value::Null);
        let response = self
            .authorized(RequestSpec::post(path).with_body(params))
            .await?;

        validate_payment(&amount, response)
    }

    /// One-time charge with raw card data.
    ///
    /// `POST /subscribe/payments/onetime`, requires `merchant_uid`,
    /// `amount`, `card_number`, `expiry` and `birth`. Passing
    /// `customer_uid` also stores the card as a billing key.
    pub async fn pay_onetime(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(
            &params,
            &["merchant_uid", "amount", "card_number", "expiry", "birth"],
        )?;

        self.charge("/subscribe/payments/onetime", params).await
    }

    /// Charge a stored billing key.
    ///
    /// `POST /subscribe/payments/again`, requires `customer_uid`,
    /// `merchant_uid` and `amount`
    pub async fn pay_subscription(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["customer_uid", "merchant_uid", "amount"])?;

        self.charge("/subscribe/payments/again", params).await
    }

    /// Charge a card issued abroad.
    ///
    /// `POST /subscribe/payments/foreign`, requires `merchant_uid`,
    /// `amount`, `card_number` and `expiry`
    pub async fn pay_foreign(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["merchant_uid", "amount", "card_number", "expiry"])?;

        self.charge("/subscribe/payments/foreign", params).await
    }

    /// Schedule future charges against a billing key.
    ///
    /// `POST /subscribe/payments/schedule`, requires `customer_uid` and
    /// `schedules` (a list of `merchant_uid`/`schedule_at`/`amount`)
    pub async fn schedule_subscription(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["customer_uid", "schedules"])?;

        self.authorized(RequestSpec::post("/subscribe/payments/schedule").with_body(params))
            .await
    }

    /// Cancel scheduled charges; all of them unless `merchant_uid` narrows it.
    ///
    /// `POST /subscribe/payments/unschedule`, requires `customer_uid`
    pub async fn unschedule_subscription(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["customer_uid"])?;

        self.authorized(RequestSpec::post("/subscribe/payments/unschedule").with_body(params))
            .await
    }

    /// Issue a billing key for a card.
    ///
    /// `POST /subscribe/customers/{customer_uid}`, requires `customer_uid`,
    /// `card_number`, `expiry` and `birth`
    pub async fn create_subscription(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["customer_uid", "card_number", "expiry", "birth"])?;

        let customer_uid = match &params["customer_uid"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let path = format!("/subscribe/customers/{}", segment(&customer_uid));

        self.authorized(RequestSpec::post(path).with_body(params))
            .await
    }

    /// Fetch a billing key.
    ///
    /// `GET /subscribe/customers/{customer_uid}`
    pub async fn get_subscription(&self, customer_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::get(format!(
            "/subscribe/customers/{}",
            segment(customer_uid)
        )))
        .await
    }

    /// Delete a billing key.
    ///
    /// `DELETE /subscribe/customers/{customer_uid}`
    pub async fn delete_subscription(&self, customer_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::delete(format!(
            "/subscribe/customers/{}",
            segment(customer_uid)
        )))
        .await
    }
}
