// src/orchestrator/mod.rs
//! Orchestrates the interactive viewer: owns the transform parameters and the
//! marker color, turns display events into parameter changes, and runs at most
//! one mapping pass per tick.
//!
//! Parameter changes only mark the state `Dirty`; the render itself happens in
//! the next [`AppOrchestrator::process_event_cycle`], after all pending events
//! have been applied.

pub mod actions;

use crate::bitmap::io::save_bitmap;
use crate::bitmap::Bitmap;
use crate::config::Config;
use crate::display::messages::{
    DisplayError, DisplayEvent, DriverRequest, DriverResponse, RenderSnapshot,
};
use crate::display::{DisplayDriver, SideBySide};
use crate::mapper::{self, TransformParams};
use actions::{translate_event, Steps, UserAction};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace, warn};
use std::path::{Path, PathBuf};

/// Represents the status of the orchestrator after one event cycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrchestratorStatus {
    /// Keep ticking.
    Running,
    /// Quit was requested. The application should terminate gracefully.
    Shutdown,
}

/// Render state of the controller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ControllerState {
    /// The displayed result matches the parameters.
    Idle,
    /// Parameters changed since the last render.
    Dirty,
    /// A mapping pass is running.
    Rendering,
    /// Quit was requested; terminal.
    Stopped,
}

pub struct AppOrchestrator<'a> {
    driver: &'a mut dyn DisplayDriver,
    source: Bitmap,
    layout: SideBySide,
    params: TransformParams,
    marker: u32,
    state: ControllerState,
    steps: Steps,
    output_path: Option<PathBuf>,
    title: String,
    framebuffer: Option<RenderSnapshot>,
    repaint_pending: bool,
    last_result: Option<Bitmap>,
    render_count: usize,
}

impl<'a> AppOrchestrator<'a> {
    /// Opens the window, shows the source next to a black result pane, and
    /// samples the initial marker color at the image center.
    pub fn new(driver: &'a mut dyn DisplayDriver, source: Bitmap, config: &Config) -> Result<Self> {
        let layout = SideBySide::for_image(&source);
        let (width_px, height_px) = layout.window_size();

        match driver
            .handle_request(DriverRequest::Init {
                width_px,
                height_px,
                title: config.window.title.clone(),
            })
            .context("Unable to create window")?
        {
            DriverResponse::InitComplete { .. } => {}
            other => return Err(anyhow!("Expected InitComplete response, got {:?}", other)),
        }

        let mut params = TransformParams::centered(source.width(), source.height());
        params.alpha = config.controls.initial_alpha;
        params.beta = config.controls.initial_beta;
        let (mx, my) = params.center_pixel();
        let marker = source.get_pixel(mx, my);

        let mut framebuffer = layout.new_snapshot();
        layout.draw_source(&mut framebuffer, &source);
        layout.clear_result(&mut framebuffer);

        let mut orchestrator = AppOrchestrator {
            driver,
            source,
            layout,
            params,
            marker,
            state: ControllerState::Idle,
            steps: Steps {
                alpha: config.controls.alpha_step,
                beta: config.controls.beta_step,
            },
            output_path: config
                .output
                .enabled
                .then(|| config.output.path.clone()),
            title: config.window.title.clone(),
            framebuffer: Some(framebuffer),
            repaint_pending: false,
            last_result: None,
            render_count: 0,
        };
        orchestrator.present()?;
        Ok(orchestrator)
    }

    pub fn params(&self) -> TransformParams {
        self.params
    }

    /// Packed color treated as transparent by the mapper.
    pub fn marker_color(&self) -> u32 {
        self.marker
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of completed mapping passes.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn last_result(&self) -> Option<&Bitmap> {
        self.last_result.as_ref()
    }

    pub fn framebuffer(&self) -> Option<&RenderSnapshot> {
        self.framebuffer.as_ref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Applies one action to the controller state. Never renders.
    pub fn apply_action(&mut self, action: UserAction) {
        if self.state == ControllerState::Stopped {
            return;
        }
        match action {
            UserAction::Quit => {
                info!("Orchestrator: Quit requested.");
                self.state = ControllerState::Stopped;
            }
            UserAction::Reset => {
                debug!("Orchestrator: Restoring unmodified source view.");
                if let Some(framebuffer) = self.framebuffer.as_mut() {
                    self.layout.draw_result(framebuffer, &self.source);
                }
                self.last_result = None;
                self.repaint_pending = true;
            }
            UserAction::AdjustAlpha(delta) => {
                self.params.alpha += delta;
                self.mark_dirty();
            }
            UserAction::AdjustBeta(delta) => {
                self.params.beta += delta;
                self.mark_dirty();
            }
            UserAction::PickCenter { x, y } => {
                if !self.layout.source_contains(x, y) {
                    trace!("Orchestrator: Ignoring pick at ({}, {}) outside the source.", x, y);
                    return;
                }
                self.params.cx = x as f64;
                self.params.cy = y as f64;
                self.marker = self.source.get_pixel(x as i64, y as i64);
                debug!(
                    "Orchestrator: New center ({}, {}), marker {:#08x}",
                    x, y, self.marker
                );
                self.mark_dirty();
            }
        }
    }

    fn mark_dirty(&mut self) {
        self.state = ControllerState::Dirty;
    }

    /// One tick: drain pending events, then render once if anything changed.
    pub fn process_event_cycle(&mut self) -> Result<OrchestratorStatus> {
        if self.state == ControllerState::Stopped {
            return Ok(OrchestratorStatus::Shutdown);
        }

        let events = match self
            .driver
            .handle_request(DriverRequest::PollEvents)
            .context("Display event polling failed")?
        {
            DriverResponse::Events(events) => events,
            other => return Err(anyhow!("Expected Events response, got {:?}", other)),
        };

        for event in events {
            trace!("Orchestrator: Handling {:?}", event);
            if event == DisplayEvent::Expose {
                self.repaint_pending = true;
                continue;
            }
            if let Some(action) = translate_event(&event, self.steps) {
                self.apply_action(action);
            }
            if self.state == ControllerState::Stopped {
                return Ok(OrchestratorStatus::Shutdown);
            }
        }

        if self.state == ControllerState::Dirty {
            self.render()?;
        } else if self.repaint_pending {
            self.present()?;
        }
        Ok(OrchestratorStatus::Running)
    }

    fn render(&mut self) -> Result<()> {
        self.state = ControllerState::Rendering;
        let TransformParams {
            cx,
            cy,
            alpha,
            beta,
        } = self.params;
        info!(
            "Performing Escher at ({}, {}), colour {:#08x}, with alpha = {:.1}, and beta = {:.1} divided by two pi...",
            cx, cy, self.marker, alpha, beta
        );

        let result = mapper::map(&self.source, self.marker, self.params);

        if let Some(framebuffer) = self.framebuffer.as_mut() {
            self.layout.draw_result(framebuffer, &result);
        }
        self.present()?;
        self.set_title(format!("{} (alpha {:.1}, beta {:.1})", self.title, alpha, beta))?;

        if let Some(path) = &self.output_path {
            match save_bitmap(&result, path) {
                Ok(()) => debug!("Orchestrator: Wrote {}", path.display()),
                Err(e) => warn!("Orchestrator: {}", e),
            }
        }

        self.last_result = Some(result);
        self.render_count += 1;
        self.state = ControllerState::Idle;
        Ok(())
    }

    /// Lend the framebuffer to the driver and take it back, recovering it when
    /// presentation fails.
    fn present(&mut self) -> Result<()> {
        let snapshot = self
            .framebuffer
            .take()
            .context("Framebuffer was not returned by the display driver")?;
        self.repaint_pending = false;

        match self.driver.handle_request(DriverRequest::Present(snapshot)) {
            Ok(DriverResponse::PresentComplete(snapshot)) => {
                self.framebuffer = Some(snapshot);
                Ok(())
            }
            Ok(other) => Err(anyhow!("Expected PresentComplete response, got {:?}", other)),
            Err(DisplayError::PresentationFailed(snapshot, reason)) => {
                self.framebuffer = Some(snapshot);
                warn!("Presentation failed, buffer recovered: {}", reason);
                Ok(())
            }
            Err(DisplayError::Generic(e)) => Err(e),
        }
    }

    fn set_title(&mut self, title: String) -> Result<()> {
        match self.driver.handle_request(DriverRequest::SetTitle(title)) {
            Ok(_) => Ok(()),
            Err(DisplayError::Generic(e)) => Err(e),
            Err(e) => {
                warn!("Failed to set window title: {}", e);
                Ok(())
            }
        }
    }
}
