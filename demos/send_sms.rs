use std::io;

use tracing_subscriber::EnvFilter;
use twilio_sms_dispatch::{DispatchConfig, DispatchResult, SmsDispatcher, WorkUnit};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DispatchConfig::from_env()?;
    let to = std::env::var("SMS_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_TO environment variable is required",
        )
    })?;
    let body = std::env::var("SMS_BODY")
        .unwrap_or_else(|_| "Hello from the twilio-sms-dispatch demo.".to_owned());

    let dispatcher = SmsDispatcher::new(config)?;
    let work: WorkUnit = [("sms.to", to), ("sms.body", body)].into_iter().collect();

    match dispatcher.dispatch(Some(work)).await? {
        Some(routed) => match routed.result {
            DispatchResult::Success { sid, price } => {
                println!("routed to {}: sid={sid}, price={price:?}", routed.relationship);
            }
            DispatchResult::Failure => {
                println!(
                    "routed to {} (penalized: {})",
                    routed.relationship,
                    routed.unit.is_penalized()
                );
            }
        },
        None => println!("nothing to send"),
    }

    Ok(())
}
