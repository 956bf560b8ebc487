use std::io;

use smsgate::{SendOutcome, SmsFacade};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let to = std::env::var("SMS_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_TO environment variable is required",
        )
    })?;
    let message =
        std::env::var("SMS_MESSAGE").unwrap_or_else(|_| "Hello from the smsgate demo.".to_owned());

    let facade = SmsFacade::from_env();
    println!("provider: {}", facade.provider_name());

    match facade.send(to, message, None).await {
        SendOutcome::Sent(sent) => {
            println!("accepted: id={:?}, status={}", sent.message_id, sent.status);
        }
        SendOutcome::Failed(failure) => {
            println!("failed: {} ({})", failure.error, failure.message);
        }
    }

    Ok(())
}
