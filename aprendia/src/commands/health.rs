use aprendia_api_client::Client;
use miette::{miette, IntoDiagnostic, Result, WrapErr};


pub async fn run_health_check(client: &Client) -> Result<()> {
    let is_healthy = client
        .health()
        .check()
        .await
        .into_diagnostic()
        .wrap_err("Failed to reach the backend.")?;

    if !is_healthy {
        return Err(miette!("Backend responded, but reports that it is not healthy."));
    }

    println!("Backend is healthy.");
    Ok(())
}
