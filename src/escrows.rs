//! Escrow logistics

use crate::client::{segment, Iamport, RequestSpec};
use crate::types::IamportResponse;
use crate::validation::{into_params, require_params};
use crate::Result;
use serde_json::Value;

impl Iamport {
    /// Register shipping details for an escrow payment.
    ///
    /// `POST /escrows/logis/{imp_uid}`, requires `sender`, `receiver` and
    /// `logis` objects
    pub async fn register_escrow_logis(&self, imp_uid: &str, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(&params, &["sender", "receiver", "logis"])?;

        let path = format!("/escrows/logis/{}", segment(imp_uid));
        self.authorized(RequestSpec::post(path).with_body(params))
            .await
    }
}
