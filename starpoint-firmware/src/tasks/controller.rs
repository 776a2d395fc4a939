//! Controller loop
//!
//! Ticks the core controller every 10 ms and logs what each cycle did.
//! After an accepted touch the loop sleeps out the settle delay so the
//! panel is not sampled again while the finger is still down.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};

use starpoint_core::traits::{AngleServo, PulseStepper, TouchPanel};
use starpoint_core::{Catalog, Controller, Cycle, LineOutcome, TouchOutcome};
use starpoint_display::DisplaySurface;
use starpoint_hal::{UartRx, UartTx};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 10;

/// Run the controller forever
pub async fn run_controller<P, S, E, T, R, D>(
    controller: &mut Controller<P, S, E, T, R, D>,
    settle_ms: u32,
) -> !
where
    P: TouchPanel,
    S: PulseStepper,
    E: AngleServo,
    T: UartTx,
    R: UartRx,
    D: DisplaySurface,
{
    info!("Controller loop started");

    match controller.start() {
        Ok(elevation) => info!("Elevation levelled at {}", elevation.angle),
        Err(e) => error!("Startup move failed: {:?}", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut overflows = 0;

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis();
        let cycle = controller.poll(now_ms);
        log_cycle(&cycle, controller.catalog());

        let dropped = controller.link_mut().overflows();
        if dropped != overflows {
            warn!("Dropped {} oversized line(s)", dropped.wrapping_sub(overflows));
            overflows = dropped;
        }

        if cycle.touch_accepted() {
            Timer::after_millis(u64::from(settle_ms)).await;
            ticker.reset();
        }
    }
}

fn log_cycle(cycle: &Cycle, catalog: &Catalog) {
    if cycle.is_idle() {
        return;
    }

    match &cycle.line {
        Some(LineOutcome::Pointed {
            azimuth,
            elevation,
            motion,
        }) => {
            info!(
                "Pointing at az={} el={} ({} steps {:?}, servo {})",
                azimuth,
                elevation,
                motion.azimuth.steps,
                motion.azimuth.direction,
                motion.elevation.angle
            );
        }
        Some(LineOutcome::HostError { message }) => {
            warn!("Host error: {}", message.as_str());
        }
        Some(LineOutcome::Discarded { line }) => {
            debug!("Discarded line: {=[u8]}", line.as_bytes());
        }
        Some(LineOutcome::MotionFailed(e)) => {
            error!("Motion failed: {:?}", e);
        }
        Some(LineOutcome::LinkFailed(e)) => {
            warn!("Link read failed: {:?}", e);
        }
        None => {}
    }

    match &cycle.touch {
        Some(TouchOutcome::Selected {
            index,
            homing,
            request,
        }) => {
            if let Some(entry) = catalog.get(*index) {
                info!("Selected {} (#{})", entry.name, entry.horizons_id);
            }
            if let Some(Err(e)) = homing {
                warn!("Homing failed: {:?}", e);
            }
            if let Err(e) = request {
                error!("Request not sent: {:?}", e);
            }
        }
        Some(TouchOutcome::PageChanged { page }) => {
            debug!("Page {}", page);
        }
        Some(TouchOutcome::Ignored) => {
            trace!("Touch ignored");
        }
        Some(TouchOutcome::SensorFailed(e)) => {
            warn!("Touch read failed: {:?}", e);
        }
        None => {}
    }

    trace!("Cycle redrawn={}", cycle.redrawn);
}
