use aquasync::AquaClient;
use aquasync::config::Config;
use aquasync::session::NoopPushRegistrar;
use aquasync::sync::ListScope;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        storage_url = %cfg.basic.storage_url,
        loglevel = %cfg.basic.loglevel,
        "Basic config (effective)"
    );

    let credentials = cfg
        .account
        .credentials()
        .map(|(email, password)| (email.to_string(), password.to_string()));
    let client = AquaClient::connect(cfg, Arc::new(NoopPushRegistrar)).await?;

    if client.session().restore().await.is_none() {
        let Some((email, password)) = credentials else {
            warn!("No stored session and no [account] credentials configured; nothing to do.");
            return Ok(());
        };
        if let Err(e) = client.session().login(&email, &password).await {
            warn!(error = %e, "{}", e.user_message());
            return Ok(());
        }
    }

    let home = client.synchronizer(ListScope::All);
    tokio::select! {
        devices = home.on_focus() => {
            for entry in &devices {
                info!(
                    device_id = %entry.id(),
                    title = %entry.device.title,
                    connected = entry.device.connected,
                    favorite = entry.device.favorite,
                    ph = entry.quality.ph.label(),
                    temperature = entry.quality.temperature.label(),
                    turbidity = entry.quality.turbidity.label(),
                    average = entry.quality.average.label(),
                    "Device"
                );
            }
            let summary = home.summary();
            info!(
                total = summary.total,
                connected = summary.connected,
                above = summary.above,
                below_or_equal = summary.below_or_equal,
                "Home list loaded"
            );

            if let Some(first) = devices.first() {
                match home.weekly_window(first.id()).await {
                    Ok(window) => {
                        let weekly = window.summary();
                        info!(
                            device_id = %first.id(),
                            above = weekly.above,
                            below_or_equal = weekly.below_or_equal,
                            "Weekly averages loaded"
                        );
                    }
                    Err(e) => warn!(device_id = %first.id(), error = %e, "Weekly averages unavailable"),
                }
            }
        },
        () = shutdown_signal() => info!("Interrupted before the list finished loading."),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
