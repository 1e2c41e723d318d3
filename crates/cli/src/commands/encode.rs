//! Default command: run the batch with ffmpeg.

use dlsenc_client::FfmpegEncoder;
use dlsenc_core::{AppConfig, Error};

use crate::pipeline;

/// Probe ffmpeg when conversion is enabled, then run the batch until it
/// finishes or an interrupt arrives.
///
/// An interrupt drops the batch future, which stops a running encode.
pub async fn run(config: &AppConfig) -> Result<(), Error> {
    let encoder = FfmpegEncoder::new();
    if config.setting.convert {
        encoder.probe().await?;
    }

    tokio::select! {
        result = pipeline::run(config, &encoder) => result.map(|_| ()),
        _ = shutdown_signal() => {
            tracing::warn!("interrupt received, stopping batch");
            Err(Error::Cancelled)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
