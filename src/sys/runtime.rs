use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread;

/// Runs the control socket and the config watcher on a small tokio runtime
/// owned by a dedicated thread. Both report back through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("showcase-services".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                let server = tokio::spawn(server::run_server(tx.clone()));
                let watcher = tokio::spawn(config::run_async_watcher(tx));
                let (server, watcher) = tokio::join!(server, watcher);
                for (name, result) in [("server", server), ("config watcher", watcher)] {
                    if let Err(e) = result {
                        log::error!("Background {} stopped: {}", name, e);
                    }
                }
            });
        })?;
    Ok(())
}
