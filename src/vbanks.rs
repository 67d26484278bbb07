//! Virtual bank accounts

use crate::client::{Iamport, RequestSpec};
use crate::types::IamportResponse;
use crate::validation::{into_params, require_params};
use crate::Result;
use serde_json::Value;

impl Iamport {
    /// Issue a virtual bank account for a merchant order.
    ///
    /// `POST /vbanks`, requires `merchant_uid`, `amount`, `vbank_code`,
    /// `vbank_due` (Unix seconds) and `vbank_holder`
    pub async fn create_vbank(&self, body: Value) -> Result<IamportResponse> {
        let params = into_params(body)?;
        require_params(
            &params,
            &["merchant_uid", "amount", "vbank_code", "vbank_due", "vbank_holder"],
        )?;

        self.authorized(RequestSpec::post("/vbanks").with_body(params))
            .await
    }
}
