use std::io;

use smsgate::{SmsFacade, StatusOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let message_id = std::env::var("SMS_MESSAGE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_MESSAGE_ID environment variable is required",
        )
    })?;

    let facade = SmsFacade::from_env();
    println!("provider: {}", facade.provider_name());

    match facade.status(&message_id).await {
        StatusOutcome::Report(report) => {
            println!(
                "status: {}, date_sent: {:?}, price: {:?} {:?}",
                report.status, report.date_sent, report.price, report.price_unit
            );
        }
        StatusOutcome::Failed(failure) => {
            println!("failed: {} (code {:?})", failure.error, failure.code);
        }
    }

    Ok(())
}
