//! Headless display driver.
//!
//! Nothing is shown. Events come from a scripted queue, one batch per
//! `PollEvents`, and every presented frame is recorded so callers can inspect
//! what would have been on screen.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{
    DisplayError, DisplayEvent, DriverRequest, DriverResponse, RenderSnapshot,
};
use anyhow::Result;
use log::{info, trace};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct HeadlessDisplayDriver {
    width_px: u32,
    height_px: u32,
    title: String,
    pending: VecDeque<Vec<DisplayEvent>>,
    presented: usize,
    last_frame: Option<RenderSnapshot>,
    fail_next_present: bool,
}

impl HeadlessDisplayDriver {
    /// Queue one batch of events, returned together by the next poll.
    pub fn push_batch(&mut self, events: Vec<DisplayEvent>) {
        self.pending.push_back(events);
    }

    pub fn push_event(&mut self, event: DisplayEvent) {
        self.push_batch(vec![event]);
    }

    /// Make the next `Present` fail with `PresentationFailed`.
    pub fn fail_next_present(&mut self) {
        self.fail_next_present = true;
    }

    pub fn presented_frames(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&RenderSnapshot> {
        self.last_frame.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn new() -> Result<Self> {
        info!("HeadlessDisplayDriver::new()");
        Ok(Self::default())
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError> {
        match request {
            DriverRequest::Init {
                width_px,
                height_px,
                title,
            } => {
                info!(
                    "HeadlessDisplayDriver: Init {}x{} '{}'",
                    width_px, height_px, title
                );
                self.width_px = width_px;
                self.height_px = height_px;
                self.title = title;
                Ok(DriverResponse::InitComplete {
                    width_px,
                    height_px,
                })
            }
            DriverRequest::PollEvents => Ok(DriverResponse::Events(
                self.pending.pop_front().unwrap_or_default(),
            )),
            DriverRequest::Present(snapshot) => {
                if std::mem::take(&mut self.fail_next_present) {
                    return Err(DisplayError::PresentationFailed(
                        snapshot,
                        "scripted failure".to_string(),
                    ));
                }
                trace!("HeadlessDisplayDriver: Present");
                self.presented += 1;
                self.last_frame = Some(snapshot.clone());
                Ok(DriverResponse::PresentComplete(snapshot))
            }
            DriverRequest::SetTitle(title) => {
                info!("HeadlessDisplayDriver: SetTitle '{}'", title);
                self.title = title;
                Ok(DriverResponse::TitleSet)
            }
        }
    }
}
