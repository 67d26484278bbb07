//! Payment lookup, cancellation and pre-registration

use crate::client::{segment, Iamport, RequestSpec};
use crate::types::{payment_status, IamportResponse, StatusFilters};
use crate::validation::{into_params, require_params};
use crate::Result;
use serde_json::Value;

impl Iamport {
    /// Look up a payment by its Iamport id.
    ///
    /// `GET /payments/{imp_uid}`. An unknown id resolves with an empty
    /// payload and status 404 rather than failing.
    pub async fn find_by_imp_uid(&self, imp_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::get(format!("/payments/{}", segment(imp_uid))))
            .await
    }

    /// Look up the latest payment for a merchant order id.
    ///
    /// `GET /payments/find/{merchant_uid}`
    pub async fn find_by_merchant_uid(&self, merchant_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::get(format!(
            "/payments/find/{}",
            segment(merchant_uid)
        )))
        .await
    }

    /// List every payment attempt for a merchant order id, optionally
    /// narrowed to one status.
    ///
    /// `GET /payments/findAll/{merchant_uid}/{payment_status}`
    pub async fn find_all_by_merchant_uid(
        &self,
        merchant_uid: &str,
        status: Option<&str>,
    ) -> Result<IamportResponse> {
        let mut path = format!("/payments/findAll/{}", segment(merchant_uid));
        if let Some(status) = status {
            path.push('/');
            path.push_str(&segment(status));
        }

        self.authorized(RequestSpec::get(path)).await
    }

    /// List payments by status (`all` when `None`).
    ///
    /// `GET /payments/status/{payment_status}?page&limit&from&to&sorting`
    pub async fn find_all_by_status(
        &self,
        status: Option<&str>,
        filters: StatusFilters,
    ) -> Result<IamportResponse> {
        let status = status.unwrap_or(payment_status::ALL);
        let spec = RequestSpec::get(format!("/payments/status/{}", segment(status)))
            .with_query(filters.to_query());

        self.authorized(spec).await
    }

    /// Cancel a payment, fully or partially.
    ///
    /// `POST /payments/cancel`. The body must identify the payment through
    /// `imp_uid` or `merchant_uid`; the provider enforces that.
    pub async fn cancel(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        self.authorized(RequestSpec::post("/payments/cancel").with_body(params))
            .await
    }

    /// Cancel by Iamport id; `extra` may carry `amount`, `reason`, refund
    /// account fields and so on
    pub async fn cancel_by_imp_uid(
        &self,
        imp_uid: &str,
        extra: Option<Value>,
    ) -> Result<IamportResponse> {
        let mut params = into_params(extra.unwrap_or(Value::Null))?;
        params.insert("imp_uid".to_string(), Value::from(imp_uid));
        self.cancel(Value::Object(params)).await
    }

    /// Cancel by merchant order id
    pub async fn cancel_by_merchant_uid(
        &self,
        merchant_uid: &str,
        extra: Option<Value>,
    ) -> Result<IamportResponse> {
        let mut params = into_params(extra.unwrap_or(Value::Null))?;
        params.insert("merchant_uid".to_string(), Value::from(merchant_uid));
        self.cancel(Value::Object(params)).await
    }

    /// Pre-register the amount a merchant order is expected to be paid for.
    ///
    /// `POST /payments/prepare`, requires `merchant_uid` and `amount`
    pub async fn create_prepared_payment(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["merchant_uid", "amount"])?;

        self.authorized(RequestSpec::post("/payments/prepare").with_body(params))
            .await
    }

    /// Fetch a pre-registered amount.
    ///
    /// `GET /payments/prepare/{merchant_uid}`
    pub async fn get_prepared_payment(&self, merchant_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::get(format!(
            "/payments/prepare/{}",
            segment(merchant_uid)
        )))
        .await
    }
}
