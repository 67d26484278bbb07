//! SMS identity-verification records

use crate::client::{segment, Iamport, RequestSpec};
use crate::types::IamportResponse;
use crate::Result;

impl Iamport {
    /// `GET /certifications/{imp_uid}`
    pub async fn get_certification(&self, imp_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::get(format!(
            "/certifications/{}",
            segment(imp_uid)
        )))
        .await
    }

    /// `DELETE /certifications/{imp_uid}`
    pub async fn delete_certification(&self, imp_uid: &str) -> Result<IamportResponse> {
        self.authorized(RequestSpec::delete(format!(
            "/certifications/{}",
            segment(imp_uid)
        )))
        .await
    }
}
