//! Application event loop
//!
//! The main thread owns all mutable state: roster, anchor, settings, and
//! the overlay window. Network work (telemetry polling, icon fetching)
//! runs on a small tokio runtime and rejoins the loop through channels
//! drained non-blockingly each iteration.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use sumtrack_core::anchor::VisibilityEdge;
use sumtrack_core::catalog::CatalogError;
use sumtrack_core::roster::SpellSlot;
use sumtrack_core::telemetry::FetchError;
use sumtrack_core::{Roster, Settings, SpellCatalog, TelemetryPoller, WindowAnchor, WindowProbe};
use sumtrack_overlay::platform::target_probe;
use sumtrack_overlay::{icons, OverlayAction, OverlayConfig, PlatformError, SpellTrackerOverlay};
use sumtrack_types::Point;

use crate::Args;

/// Cadence of target-window probing; fast enough that the overlay tracks
/// a moved game window without visible lag.
const ANCHOR_INTERVAL: Duration = Duration::from_millis(50);
/// Countdown granularity.
const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Render cadence while visible.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Loop sleep between iterations.
const IDLE_SLEEP: Duration = Duration::from_millis(5);

/// Initial window height before the first roster arrives.
const INITIAL_HEIGHT: u32 = 60;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("spell catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("telemetry client: {0}")]
    Telemetry(#[from] FetchError),
    #[error("overlay platform: {0}")]
    Platform(#[from] PlatformError),
    #[error("runtime: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run(args: Args) -> Result<(), AppError> {
    let mut settings = Settings::load();

    let custom_spells = args
        .spells
        .clone()
        .or_else(SpellCatalog::default_custom_path);
    let catalog = SpellCatalog::load(custom_spells.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(4);
    let poll_interval = Duration::from_secs(args.poll_secs.max(1));
    let poller =
        TelemetryPoller::new(&args.endpoint, poll_interval).map_err(FetchError::from)?;
    runtime.spawn(poller.run(snapshot_tx, shutdown_rx));

    let (icon_req_tx, icon_req_rx) = mpsc::channel(64);
    let (icon_res_tx, mut icon_res_rx) = mpsc::channel(64);
    runtime.spawn(icons::icon_fetch_task(
        icon_req_rx,
        icon_res_tx,
        icons::default_cache_dir(),
    ));

    let (start_x, start_y) = settings.last_position.unwrap_or((100, 100));
    let mut overlay = SpellTrackerOverlay::new(OverlayConfig {
        x: start_x,
        y: start_y,
        width: sumtrack_overlay::WINDOW_WIDTH,
        height: INITIAL_HEIGHT,
        namespace: "sumtrack".to_string(),
    })?;

    let mut roster = Roster::new();
    let mut anchor = WindowAnchor::new(settings.offset());
    let mut probe = target_probe(&args.window_title);

    info!(
        endpoint = %args.endpoint,
        window_title = %args.window_title,
        "sumtrack started"
    );

    let mut next_anchor = Instant::now();
    let mut next_tick = Instant::now() + TICK_INTERVAL;
    let mut next_frame = Instant::now();

    loop {
        if !overlay.poll_events() {
            info!("overlay window closed");
            break;
        }

        if overlay.handle_clicks(&mut roster) == OverlayAction::Close {
            info!("close button clicked");
            break;
        }

        while let Ok(snapshot) = snapshot_rx.try_recv() {
            if roster.reconcile(&snapshot, &catalog) {
                if let Err(e) = overlay.sync_size(roster.len()) {
                    warn!("failed to resize overlay: {e}");
                }
            }
        }

        while let Ok((key, image)) = icon_res_rx.try_recv() {
            overlay.add_icon(key, image);
        }

        let now = Instant::now();

        if now >= next_tick {
            for entry in roster.entries_mut() {
                for slot in SpellSlot::ALL {
                    entry.spell_mut(slot).tick();
                }
            }
            next_tick += TICK_INTERVAL;
            // Re-seat after a stall so ticks never burst to catch up
            if next_tick <= now {
                next_tick = now + TICK_INTERVAL;
            }
        }

        if now >= next_anchor {
            // Repositioning mid-drag would fight the user's hand
            if !overlay.is_dragging() {
                let update = anchor.observe(probe.locate());
                match update.edge {
                    Some(VisibilityEdge::Show) => {
                        debug!("target window foregrounded, showing overlay");
                        overlay.show();
                    }
                    Some(VisibilityEdge::Hide) => {
                        debug!("target window lost, hiding overlay");
                        overlay.hide();
                    }
                    None => {}
                }
                if let Some(pos) = update.position {
                    overlay.set_position(pos.x, pos.y);
                }
            }
            next_anchor = now + ANCHOR_INTERVAL;
        }

        if overlay.take_position_dirty() {
            let position = Point::new(overlay.x(), overlay.y());
            if anchor.note_overlay_position(position) {
                settings.set_offset(anchor.offset());
            }
        }

        if now >= next_frame {
            if overlay.is_visible() {
                overlay.render(&roster, &catalog);
                for key in overlay.take_icon_requests() {
                    if icon_req_tx.try_send(key).is_err() {
                        debug!("icon request channel full or closed");
                    }
                }
            }
            next_frame = now + FRAME_INTERVAL;
        }

        std::thread::sleep(IDLE_SLEEP);
    }

    let _ = shutdown_tx.send(true);

    settings.set_offset(anchor.offset());
    settings.last_position = Some((overlay.x(), overlay.y()));
    settings.save();

    runtime.shutdown_timeout(Duration::from_secs(2));
    info!("sumtrack stopped");
    Ok(())
}
