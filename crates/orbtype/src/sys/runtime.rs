use super::server;
use crate::config;
use crate::events::AppEvent;
use crate::render;
use crate::showcase::{Dirty, Showcase};
use async_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::Instant;

/// About one display frame. Events arriving within this window of the first
/// one are applied together and rendered once.
pub const DEBOUNCE: Duration = Duration::from_millis(16);

pub fn start_background_services(tx: Sender<AppEvent>, config_path: PathBuf) {
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            server::run_server(tx).await;
        });
    }

    tokio::spawn(async move {
        config::run_async_watcher(config_path, tx).await;
    });
}

/// Waits for one event, then collects whatever else arrives before the
/// window closes. `None` once every sender is gone.
pub async fn next_batch(rx: &Receiver<AppEvent>, window: Duration) -> Option<Vec<AppEvent>> {
    let first = rx.recv().await.ok()?;
    let deadline = Instant::now() + window;

    let mut batch = vec![first];
    while let Ok(Ok(event)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        batch.push(event);
    }
    Some(batch)
}

/// Applies a batch to the showcase and reports what needs re-rendering.
pub fn apply_batch(showcase: &mut Showcase, batch: Vec<AppEvent>, config_path: &Path) -> Dirty {
    let mut dirty = Dirty::default();

    for event in batch {
        match event {
            AppEvent::ConfigReload => match config::load_or_default(config_path) {
                Ok(new_config) => {
                    *showcase = Showcase::from_config(&new_config);
                    dirty.merge(showcase.all_dirty());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            event => dirty.merge(showcase.update(event)),
        }
    }
    dirty
}

async fn render_loop(
    mut showcase: Showcase,
    rx: Receiver<AppEvent>,
    config_path: PathBuf,
    output_dir: PathBuf,
) {
    while let Some(batch) = next_batch(&rx, DEBOUNCE).await {
        let dirty = apply_batch(&mut showcase, batch, &config_path);
        if dirty.is_empty() {
            continue;
        }
        match render::write_outputs(&showcase, &output_dir, &dirty) {
            Ok(written) => log::info!("Rendered {} file(s)", written.len()),
            Err(e) => log::error!("Render failed: {}", e),
        }
    }
}

/// Serves control commands and config changes until interrupted.
pub fn run(showcase: Showcase, config_path: PathBuf, output_dir: PathBuf) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    rt.block_on(async move {
        let (tx, rx) = async_channel::bounded(32);
        start_background_services(tx, config_path.clone());

        tokio::select! {
            _ = render_loop(showcase, rx, config_path, output_dir) => {}
            _ = tokio::signal::ctrl_c() => log::info!("Shutting down"),
        }
    });

    server::cleanup();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::layout::PathId;
    use typekit::Weight;

    #[tokio::test]
    async fn test_burst_is_one_batch() {
        let (tx, rx) = async_channel::unbounded();
        for value in [100, 300, 500] {
            tx.send(AppEvent::SetWeight {
                path: PathId::Path1,
                value,
            })
            .await
            .unwrap();
        }

        let batch = next_batch(&rx, DEBOUNCE).await.unwrap();
        assert_eq!(batch.len(), 3);

        drop(tx);
        assert!(next_batch(&rx, DEBOUNCE).await.is_none());
    }

    #[test]
    fn test_batch_keeps_last_value() {
        let mut showcase = Showcase::from_config(&default_config().unwrap());
        let batch = vec![
            AppEvent::SetWeight {
                path: PathId::Path1,
                value: 100,
            },
            AppEvent::SetWeight {
                path: PathId::Path1,
                value: 700,
            },
            AppEvent::SetCharsetWeight(Weight::Thin),
        ];

        let missing = PathBuf::from("/nonexistent/orbtype.toml");
        let dirty = apply_batch(&mut showcase, batch, &missing);

        assert_eq!(dirty.paths.len(), 1);
        assert!(dirty.specimens);
        assert_eq!(showcase.resolve_current_weight(PathId::Path1), Weight::Bold);
    }

    #[test]
    fn test_reload_marks_everything() {
        let mut showcase = Showcase::from_config(&default_config().unwrap());
        showcase.update(AppEvent::SetWeight {
            path: PathId::Path1,
            value: 100,
        });

        let missing = PathBuf::from("/nonexistent/orbtype.toml");
        let dirty = apply_batch(&mut showcase, vec![AppEvent::ConfigReload], &missing);

        assert_eq!(dirty, showcase.all_dirty());
        assert_eq!(showcase.resolve_current_weight(PathId::Path1), Weight::Regular);
    }
}
