//! Referral check - runs the referral program calls for one install and
//! logs what the service answers.

use sync_referral::{Config, HttpTransport, ReferralService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sync_referral=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let service = ReferralService::from_config(&config, HttpTransport::new())?;
    tracing::info!("Checking referral program at {}", service.host());

    let download_id = match service.referral_code_lookup().await {
        Ok(referral) => {
            tracing::info!(
                "Referral code {} for download {}",
                referral.referral_code,
                referral.download_id
            );
            Some(referral.download_id)
        }
        Err(e) => {
            tracing::warn!("Referral code lookup failed: {}", e);
            None
        }
    };

    if let Some(download_id) = config.download_id.or(download_id) {
        match service.check_if_authorized_for_grant(&download_id).await {
            Ok(finalized) => tracing::info!("Download {} finalized: {}", download_id, finalized),
            Err(e) => tracing::warn!("Grant check failed: {}", e),
        }
    }

    let headers = service.fetch_custom_headers().await?;
    let now = chrono::Utc::now();
    for header in &headers {
        for cookie in header.cookies(now) {
            tracing::info!("Partner cookie {} for {}", cookie.name, cookie.domain);
        }
    }
    tracing::info!("Received {} custom header(s)", headers.len());

    Ok(())
}
