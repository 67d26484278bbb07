//! Look up a payment and optionally cancel it
//!
//! Credentials come from `IAMPORT_API_KEY` / `IAMPORT_API_SECRET` and fall
//! back to the public test account.
//!
//! ```sh
//! cargo run --example find_payment -- imp_448280090638
//! ```

use iamport::{ErrorKind, Iamport, StatusFilters};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let imp_uid = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "imp_448280090638".to_string());

    let client = Iamport::from_env()?;
    println!("Using {}", client.host());

    let payment = client.find_by_imp_uid(&imp_uid).await?;
    if payment.is_empty() {
        println!("No payment found for {} (status {})", imp_uid, payment.status);
    } else {
        println!("Payment: {}", payment.data);
    }

    let recent = client
        .find_all_by_status(Some("paid"), StatusFilters::new().with_limit(5))
        .await?;
    println!("Recent paid payments: {}", recent.data);

    if std::env::args().any(|arg| arg == "--cancel") {
        match client
            .cancel_by_imp_uid(&imp_uid, Some(json!({ "reason": "demo" })))
            .await
        {
            Ok(res) => println!("Cancelled: {}", res.data),
            Err(e) if e.kind() == ErrorKind::Provider => {
                println!("Provider refused: {} ({})", e.message(), e.detail())
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
