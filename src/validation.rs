//! Parameter checks performed around API calls

use crate::error::{IamportError, PAYMENT_VALIDATION_FAILED};
use crate::types::{payment_status::PAID, IamportResponse};
use crate::Result;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Request body as a JSON object
pub type Params = Map<String, Value>;

/// Unwrap a JSON body into an object; `null` counts as an empty object
pub(crate) fn into_params(body: Value) -> Result<Params> {
    match body {
        Value::Object(params) => Ok(params),
        Value::Null => Ok(Params::new()),
        other => Err(IamportError::validation(
            "request parameters must be a JSON object",
            other,
        )),
    }
}

/// Fail with the full required set unless every key is present.
///
/// Only presence is checked: a key mapped to `null` satisfies it.
pub(crate) fn require_params(params: &Params, required: &[&str]) -> Result<()> {
    if required.iter().all(|key| params.contains_key(*key)) {
        Ok(())
    } else {
        Err(IamportError::missing_parameters(required))
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    }
}

/// Exact amount comparison between JSON numbers; `1000` and `1000.0` are
/// equal, a string such as `"1000"` never matches a number
pub fn amounts_equal(requested: &Value, charged: &Value) -> bool {
    match (to_decimal(requested), to_decimal(charged)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Accept a charge only if it is paid for exactly the requested amount
pub(crate) fn validate_payment(amount: &Value, response: IamportResponse) -> Result<IamportResponse> {
    let paid = response.data.get("status").and_then(Value::as_str) == Some(PAID);
    let charged = response.data.get("amount").unwrap_or(&Value::Null);

    if paid && amounts_equal(amount, charged) {
        Ok(response)
    } else {
        tracing::debug!(
            status = ?response.data.get("status"),
            "charge did not validate"
        );
        let reason = response
            .data
            .get("fail_reason")
            .cloned()
            .unwrap_or(Value::Null);
        Err(IamportError::validation(PAYMENT_VALIDATION_FAILED, reason))
    }
}
