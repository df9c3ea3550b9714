use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use easel::host::HostConfig;
use easel::logging::{init_logging, LoggingConfig};
use easel::media::REDUCED_MOTION_QUERY;
use easel::window::{Runtime, RuntimeConfig};
use easel::{App, AppControl, AppCtx, HostCtx};
use image::{Rgba, RgbaImage};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Full turns per millisecond of the demo animation (one turn every 2s).
const TURNS_PER_MS: f64 = 1.0 / 2000.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let host_config = HostConfig::from_env();
    log::info!("easel studio: {host_config:?}");
    log::info!("keys: M toggles reduced motion, Escape enters the error state");

    let config = RuntimeConfig {
        title: "Easel Studio".to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, host_config, Studio::default())
}

#[derive(Default)]
struct Studio {
    stats: Rc<LoopStats>,
}

#[derive(Default)]
struct LoopStats {
    frames: Cell<u64>,
    /// Animation phase in turns, `[0, 1)`.
    phase: Cell<f64>,
    last_paint: Cell<Option<f64>>,
}

impl App for Studio {
    fn init(&mut self, ctx: &AppCtx<'_>) -> AppControl {
        let host = ctx.host;
        let (w, h) = ctx.logical_size();
        log::info!(
            "window {w}x{h} logical, dpr {}, reduced motion {}",
            host.device_pixel_ratio(),
            host.prefers_reduced_motion(),
        );

        for path in ["sprites/sprite.json", "../glyphs/0-255.pbf", "https://example.com/tiles"] {
            log::info!("resolve {path:?} -> {}", host.resolve_url(path));
        }

        probe_pixels(host);
        animate(host.clone(), self.stats.clone());
        AppControl::Continue
    }

    fn on_window_event(&mut self, ctx: &AppCtx<'_>, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::KeyM) => match ctx.native.media_features() {
                Some(features) => {
                    let next = !ctx.host.prefers_reduced_motion();
                    features.set(REDUCED_MOTION_QUERY, next);
                    log::info!("reduced motion -> {}", ctx.host.prefers_reduced_motion());
                }
                None => log::info!("host has no media queries"),
            },
            PhysicalKey::Code(KeyCode::Escape) => {
                ctx.host.set_error_state();
                log::info!(
                    "error state set after {} frames; animation stops",
                    self.stats.frames.get()
                );
            }
            _ => {}
        }

        AppControl::Continue
    }
}

/// Schedules one animation step, which schedules the next.
fn animate(host: Rc<HostCtx>, stats: Rc<LoopStats>) {
    let next = host.clone();
    let _ = host.frame(move |timestamp| {
        let dt = stats
            .last_paint
            .replace(Some(timestamp))
            .map_or(0.0, |prev| timestamp - prev);

        let speed = if next.prefers_reduced_motion() { 0.1 } else { 1.0 };
        stats
            .phase
            .set((stats.phase.get() + dt * speed * TURNS_PER_MS).fract());

        let n = stats.frames.get() + 1;
        stats.frames.set(n);
        if n % 240 == 0 {
            log::info!("frame {n} at {timestamp:.1}ms, phase {:.3}", stats.phase.get());
        }

        animate(next, stats);
    });
}

/// Reads back a generated gradient with padding and writes it next to the
/// system temp files.
fn probe_pixels(host: &HostCtx) {
    let img = RgbaImage::from_fn(32, 16, |x, y| Rgba([(x * 8) as u8, (y * 16) as u8, 128, 255]));

    let data = match host.get_image_data(&img, 4) {
        Ok(data) => data,
        Err(e) => {
            log::error!("pixel probe failed: {e}");
            return;
        }
    };
    log::info!(
        "pixel probe: {}x{} ({} px), center {:?}, corner {:?}",
        data.width(),
        data.height(),
        data.pixel_count(),
        data.pixel(4 + 16, 4 + 8),
        data.pixel(0, 0),
    );

    let path = std::env::temp_dir().join("easel-probe.png");
    match data.to_image().map(|img| img.save(&path)) {
        Some(Ok(())) => log::info!("wrote {}", path.display()),
        Some(Err(e)) => log::warn!("failed to write {}: {e}", path.display()),
        None => log::warn!("pixel probe buffer has inconsistent size"),
    }
}
