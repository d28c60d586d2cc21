//! The event loop driving a gateway session into the dispatcher.
//!
//! ```rust,ignore
//! use warden_runtime::{ConfigLoader, Runtime};
//!
//! let config = ConfigLoader::new().load()?;
//! let runtime = Runtime::connect(config, gateway, directory).await?;
//! runtime.run().await?;
//! ```
//!
//! Each event runs on its own task so a slow handler never stalls the
//! gateway. Shutdown is orderly: stop consuming events, wait for in-flight
//! handlers, write the settings file one final time, then disconnect.

use std::sync::Arc;

use tokio::signal;
use tokio::task::JoinSet;
use tracing::{error, info};

use warden_core::{Gateway, GatewayEvent, GuildDirectory};
use warden_engine::{Dispatcher, SettingsStore, commands};

use crate::config::WardenConfig;
use crate::error::RuntimeResult;
use crate::logging;

/// Drives a connected [`Gateway`] until shutdown.
pub struct Runtime<G: Gateway> {
    store: Arc<SettingsStore>,
    dispatcher: Arc<Dispatcher>,
    gateway: G,
}

impl<G: Gateway> Runtime<G> {
    /// Builds a runtime over an already-connected gateway session.
    ///
    /// Initializes logging, loads the settings document (a malformed file
    /// is fatal here), and wires the built-in command set to the
    /// configured default prefix.
    pub async fn connect(
        config: WardenConfig,
        gateway: G,
        directory: Arc<dyn GuildDirectory>,
    ) -> RuntimeResult<Self> {
        logging::init_from_config(&config.logging);

        let store = Arc::new(SettingsStore::load(&config.bot.settings_path).await?);
        let dispatcher = Arc::new(Dispatcher::new(
            commands::builtin(),
            Arc::clone(&store),
            directory,
            gateway.current_user_id().clone(),
            config.bot.command_prefix,
        ));

        info!(
            prefix = %config.bot.command_prefix,
            settings = %config.bot.settings_path.display(),
            "Runtime ready"
        );

        Ok(Self {
            store,
            dispatcher,
            gateway,
        })
    }

    /// The shared settings store.
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.store
    }

    /// Runs until Ctrl+C or SIGTERM.
    pub async fn run(self) -> RuntimeResult<()> {
        self.run_until(wait_for_shutdown()).await
    }

    /// Runs until the given future completes or the gateway closes.
    ///
    /// In-flight handlers are awaited before the final settings save and
    /// the gateway teardown.
    pub async fn run_until<F>(mut self, shutdown: F) -> RuntimeResult<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                event = self.gateway.next_event() => {
                    let Some(event) = event else {
                        info!("Gateway closed");
                        break;
                    };
                    let dispatcher = Arc::clone(&self.dispatcher);
                    in_flight.spawn(async move {
                        dispatcher.handle_event(event).await;
                    });
                }
            }
        }

        while in_flight.join_next().await.is_some() {}

        // The final save must land before the process can exit.
        if let Err(e) = self.store.save().await {
            error!(error = %e, "Final settings save failed");
        }
        self.gateway.disconnect().await;
        info!("Runtime stopped");

        Ok(())
    }
}

impl<G: Gateway> std::fmt::Debug for Runtime<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("store", &self.store)
            .finish()
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C");
    }
}
