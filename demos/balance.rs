use smsgate::SmsFacade;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let facade = SmsFacade::from_env();

    // Zero means either an empty account or a failed check; the adapters do
    // not distinguish the two.
    let balance = facade.balance().await;
    println!(
        "provider: {}, balance: {} {}",
        facade.provider_name(),
        balance,
        facade.balance_currency()
    );
}
