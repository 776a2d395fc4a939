//! Controller loop
//!
//! The controller is the central brain that:
//! - Polls the serial link and applies at most one received line
//! - Samples the touch panel once the settle delay has passed
//! - Drives page changes and selections through the UI session
//! - Commands the motion controller
//! - Redraws the screen
//!
//! Nothing here is fatal. Every hardware or protocol failure is reported
//! in the returned [`Cycle`] and the loop carries on.

use heapless::String;

use starpoint_display::{DisplaySurface, PageView, Renderer, StatusLine};
use starpoint_hal::{UartRx, UartTx};
use starpoint_protocol::{InboundFrame, Line, MAX_LINE_LEN};

use crate::catalog::Catalog;
use crate::config::{PointerConfig, UiConfig};
use crate::link::{LinkError, Received, SerialLink};
use crate::motion::{ElevationMove, MotionController, MotionError, PointingMove, PointingState};
use crate::touch::TouchSampler;
use crate::traits::{AngleServo, PulseStepper, TouchError, TouchPanel};
use crate::ui::{UiAction, UiSession};

/// Hardware handed to the controller
pub struct Parts<P, S, E, T, R, D> {
    pub panel: P,
    pub stepper: S,
    pub servo: E,
    /// Mirrored elevation servo, if fitted
    pub companion: Option<E>,
    pub tx: T,
    pub rx: R,
    pub display: D,
}

/// What the status line currently says
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ready,
    /// Waiting for coordinates of a catalog entry
    Requesting { index: usize },
    /// Holding on the last received target
    Pointing { azimuth: f32, elevation: f32 },
    Error { message: String<MAX_LINE_LEN> },
}

impl Status {
    fn error(message: &str) -> Self {
        let mut text = String::new();
        for ch in message.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        Status::Error { message: text }
    }
}

/// Result of handling one received line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineOutcome {
    /// Coordinates received and both axes moved
    Pointed {
        azimuth: f32,
        elevation: f32,
        motion: PointingMove,
    },
    /// Host reported an error; pointing state untouched
    HostError { message: String<MAX_LINE_LEN> },
    /// Line was not a frame and was dropped
    Discarded { line: Line },
    /// Coordinates received but a motor failed
    MotionFailed(MotionError),
    /// UART receive failed
    LinkFailed(LinkError),
}

/// Result of handling one accepted touch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchOutcome {
    /// Object selected and a request sent
    Selected {
        index: usize,
        /// Neutral move made before the request, when enabled
        homing: Option<Result<PointingMove, MotionError>>,
        request: Result<(), LinkError>,
    },
    PageChanged { page: usize },
    /// Tap on an empty slot or a disabled page button
    Ignored,
    /// Panel could not be read
    SensorFailed(TouchError),
}

/// Report of one loop iteration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Outcome of the line processed this cycle, if any
    pub line: Option<LineOutcome>,
    /// Outcome of the touch processed this cycle, if any
    pub touch: Option<TouchOutcome>,
    /// Screen was redrawn
    pub redrawn: bool,
}

impl Cycle {
    /// Check if nothing happened this cycle
    pub fn is_idle(&self) -> bool {
        self.line.is_none() && self.touch.is_none()
    }

    /// Check if a touch was accepted; the caller should settle before the
    /// next sample
    pub fn touch_accepted(&self) -> bool {
        matches!(
            self.touch,
            Some(
                TouchOutcome::Selected { .. }
                    | TouchOutcome::PageChanged { .. }
                    | TouchOutcome::Ignored
            )
        )
    }
}

/// Controller state for coordinating subsystems
pub struct Controller<P, S, E, T, R, D> {
    catalog: Catalog,
    sampler: TouchSampler<P>,
    ui: UiSession,
    motion: MotionController<S, E>,
    link: SerialLink<T, R>,
    display: D,
    renderer: Renderer,
    ui_config: UiConfig,
    status: Status,
}

impl<P, S, E, T, R, D> Controller<P, S, E, T, R, D>
where
    P: TouchPanel,
    S: PulseStepper,
    E: AngleServo,
    T: UartTx,
    R: UartRx,
    D: DisplaySurface,
{
    /// Create a controller; call `start` before polling
    pub fn new(parts: Parts<P, S, E, T, R, D>, config: &PointerConfig, catalog: Catalog) -> Self {
        Self {
            catalog,
            sampler: TouchSampler::new(parts.panel, config.touch),
            ui: UiSession::new(config.touch.screen_width, config.touch.screen_height),
            motion: MotionController::new(
                parts.stepper,
                parts.servo,
                parts.companion,
                config.azimuth,
                config.elevation,
            ),
            link: SerialLink::new(parts.tx, parts.rx, config.link.angle_parsing),
            display: parts.display,
            renderer: Renderer::new(),
            ui_config: config.ui,
            status: Status::Ready,
        }
    }

    /// Draw the first page and level the elevation axis
    pub fn start(&mut self) -> Result<ElevationMove, MotionError> {
        self.renderer.render_boot(&mut self.display);
        let result = self.motion.initialize();
        if result.is_err() {
            self.status = Status::error("motor fault");
        }
        self.redraw_page();
        result
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_page(&self) -> usize {
        self.ui.current_page()
    }

    pub fn pointing(&self) -> &PointingState {
        self.motion.state()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn link_mut(&mut self) -> &mut SerialLink<T, R> {
        &mut self.link
    }

    pub fn motion_mut(&mut self) -> &mut MotionController<S, E> {
        &mut self.motion
    }

    pub fn panel_mut(&mut self) -> &mut P {
        self.sampler.panel_mut()
    }

    /// Run one loop iteration at time `now_ms`
    ///
    /// Processes at most one received line, then at most one touch. Motion
    /// blocks inside this call until complete.
    pub fn poll(&mut self, now_ms: u64) -> Cycle {
        let mut cycle = Cycle::default();

        match self.link.poll() {
            Ok(Some(received)) => {
                let (outcome, redrawn) = self.handle_line(received);
                cycle.line = Some(outcome);
                cycle.redrawn |= redrawn;
            }
            Ok(None) => {}
            Err(e) => cycle.line = Some(LineOutcome::LinkFailed(e)),
        }

        if self.ui.is_settled(now_ms, self.ui_config.settle_ms) {
            match self.sampler.sample() {
                Ok(Some(point)) => {
                    let action = self.ui.handle_touch(point, &self.catalog, now_ms);
                    let (outcome, redrawn) = self.handle_action(action);
                    cycle.touch = Some(outcome);
                    cycle.redrawn |= redrawn;
                }
                Ok(None) => {}
                Err(e) => cycle.touch = Some(TouchOutcome::SensorFailed(e)),
            }
        }

        cycle
    }

    fn handle_line(&mut self, received: Received) -> (LineOutcome, bool) {
        match received.frame {
            InboundFrame::Response { azimuth, elevation } => {
                match self.motion.point_at(azimuth, elevation) {
                    Ok(motion) => {
                        self.set_status(Status::Pointing { azimuth, elevation });
                        (
                            LineOutcome::Pointed {
                                azimuth,
                                elevation,
                                motion,
                            },
                            true,
                        )
                    }
                    Err(e) => {
                        self.set_status(Status::error("motor fault"));
                        (LineOutcome::MotionFailed(e), true)
                    }
                }
            }
            InboundFrame::Error { message } => {
                self.set_status(Status::Error {
                    message: message.clone(),
                });
                (LineOutcome::HostError { message }, true)
            }
            InboundFrame::Unrecognized => (
                LineOutcome::Discarded {
                    line: received.line,
                },
                false,
            ),
        }
    }

    fn handle_action(&mut self, action: UiAction) -> (TouchOutcome, bool) {
        match action {
            UiAction::Select { index } => {
                let Some(entry) = self.catalog.get(index) else {
                    return (TouchOutcome::Ignored, false);
                };

                self.set_status(Status::Requesting { index });

                let homing = if self.ui_config.home_on_select {
                    Some(self.motion.home())
                } else {
                    None
                };

                let request = self.link.send_request(entry.name);
                if request.is_err() {
                    self.set_status(Status::error("link write failed"));
                }

                (
                    TouchOutcome::Selected {
                        index,
                        homing,
                        request,
                    },
                    true,
                )
            }
            UiAction::PageChanged { page } => {
                self.redraw_page();
                (TouchOutcome::PageChanged { page }, true)
            }
            UiAction::Ignored => (TouchOutcome::Ignored, false),
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        let line = status_line(&self.status, &self.catalog);
        self.renderer.render_status(&mut self.display, &line);
    }

    fn redraw_page(&mut self) {
        let page = self.ui.current_page();
        let (left, right) = self.catalog.page(page);
        let view = PageView {
            page,
            page_count: self.catalog.page_count(),
            left: left.map(|e| e.name),
            right: right.map(|e| e.name),
        };
        let status = status_line(&self.status, &self.catalog);
        self.renderer.render_page(&mut self.display, &view, &status);
    }
}

fn status_line<'a>(status: &'a Status, catalog: &Catalog) -> StatusLine<'a> {
    match status {
        Status::Ready => StatusLine::Ready,
        Status::Requesting { index } => match catalog.get(*index) {
            Some(entry) => StatusLine::Requesting {
                name: entry.name,
                body_id: entry.horizons_id,
            },
            None => StatusLine::Ready,
        },
        Status::Pointing { azimuth, elevation } => StatusLine::Pointing {
            azimuth: *azimuth,
            elevation: *elevation,
        },
        Status::Error { message } => StatusLine::Error { message },
    }
}
