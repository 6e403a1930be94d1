//! Minimal X11 DisplayDriver implementation using xlib.
//!
//! Features:
//! - Fixed-size window (min size == max size hints)
//! - Keyboard, mouse button release, expose and window close events
//! - Framebuffer presentation via XPutImage (32-bit B, G, R, X pixels)

use crate::display::driver::DisplayDriver;
use crate::display::messages::{
    DisplayError, DisplayEvent, DriverRequest, DriverResponse, RenderSnapshot,
};
use crate::keys::{KeySymbol, Modifiers, MouseButton};
use anyhow::{Context, Result};
use libc::{c_char, c_int, c_uint};
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::mem;
use std::ptr;
use ::x11::{keysym, xlib};

/// Buffer size for text obtained from `XLookupString`.
const KEY_TEXT_BUFFER_SIZE: usize = 32;

pub struct X11DisplayDriver {
    display: *mut xlib::Display,
    screen: c_int,
    window: xlib::Window,
    gc: xlib::GC,
    visual: *mut xlib::Visual,
    wm_delete_window: xlib::Atom,
    width_px: u32,
    height_px: u32,
}

impl DisplayDriver for X11DisplayDriver {
    fn new() -> Result<Self> {
        info!("X11DisplayDriver::new() - Initializing X11 display");

        // SAFETY: All Xlib calls below operate on the display pointer returned
        // by XOpenDisplay, which is checked for null before use.
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                return Err(anyhow::anyhow!(
                    "Failed to open X11 display. Is DISPLAY set?"
                ));
            }

            let screen = xlib::XDefaultScreen(display);
            let root = xlib::XRootWindow(display, screen);
            let visual = xlib::XDefaultVisual(display, screen);

            // Real size arrives with Init.
            let window = xlib::XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                1,
                1,
                0,
                xlib::XBlackPixel(display, screen),
                xlib::XBlackPixel(display, screen),
            );
            if window == 0 {
                xlib::XCloseDisplay(display);
                return Err(anyhow::anyhow!("Failed to create X11 window"));
            }

            xlib::XSelectInput(
                display,
                window,
                xlib::ExposureMask
                    | xlib::KeyPressMask
                    | xlib::ButtonReleaseMask
                    | xlib::StructureNotifyMask,
            );

            let gc = xlib::XCreateGC(display, window, 0, ptr::null_mut());

            // Set WM_DELETE_WINDOW protocol for clean shutdown
            let mut wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            if wm_delete_window != 0 {
                xlib::XSetWMProtocols(display, window, &mut wm_delete_window, 1);
            } else {
                warn!("WM_DELETE_WINDOW atom not available; window close events will be missed.");
            }

            Ok(Self {
                display,
                screen,
                window,
                gc,
                visual,
                wm_delete_window,
                width_px: 1,
                height_px: 1,
            })
        }
    }

    fn handle_request(&mut self, request: DriverRequest) -> Result<DriverResponse, DisplayError> {
        match request {
            DriverRequest::Init {
                width_px,
                height_px,
                title,
            } => Ok(self.handle_init(width_px, height_px, &title)?),
            DriverRequest::PollEvents => Ok(self.handle_poll_events()),
            DriverRequest::Present(snapshot) => self.handle_present(snapshot),
            DriverRequest::SetTitle(title) => Ok(self.handle_set_title(&title)?),
        }
    }
}

impl X11DisplayDriver {
    fn handle_init(&mut self, width_px: u32, height_px: u32, title: &str) -> Result<DriverResponse> {
        self.width_px = width_px.max(1);
        self.height_px = height_px.max(1);

        // SAFETY: `self.display` and `self.window` are valid for the driver's lifetime.
        // The size hints pointer is checked for null and freed with XFree.
        unsafe {
            xlib::XResizeWindow(self.display, self.window, self.width_px, self.height_px);

            let hints = xlib::XAllocSizeHints();
            if !hints.is_null() {
                (*hints).flags = xlib::PMinSize | xlib::PMaxSize;
                (*hints).min_width = self.width_px as c_int;
                (*hints).max_width = self.width_px as c_int;
                (*hints).min_height = self.height_px as c_int;
                (*hints).max_height = self.height_px as c_int;
                xlib::XSetWMNormalHints(self.display, self.window, hints);
                xlib::XFree(hints as *mut libc::c_void);
            }

            xlib::XMapWindow(self.display, self.window);
            xlib::XFlush(self.display);
        }
        self.handle_set_title(title)?;

        info!(
            "X11DisplayDriver: Initialized {}x{} px",
            self.width_px, self.height_px
        );

        Ok(DriverResponse::InitComplete {
            width_px: self.width_px,
            height_px: self.height_px,
        })
    }

    fn handle_poll_events(&mut self) -> DriverResponse {
        let mut events = Vec::new();

        // SAFETY: `XPending` guards `XNextEvent`, so this never blocks. Union
        // fields are only read after checking the event type.
        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                if let Some(display_event) = self.convert_event(&event) {
                    trace!("X11DisplayDriver: {:?}", display_event);
                    events.push(display_event);
                }
            }
        }

        DriverResponse::Events(events)
    }

    unsafe fn convert_event(&self, event: &xlib::XEvent) -> Option<DisplayEvent> {
        match event.get_type() {
            xlib::KeyPress => {
                let mut key_event: xlib::XKeyEvent = event.key;
                let keysym = xlib::XLookupKeysym(&mut key_event, 0);

                let mut buffer = [0 as c_char; KEY_TEXT_BUFFER_SIZE];
                let count = xlib::XLookupString(
                    &mut key_event,
                    buffer.as_mut_ptr(),
                    buffer.len() as c_int,
                    ptr::null_mut(),
                    ptr::null_mut(),
                );
                let text = if count > 0 {
                    let bytes: Vec<u8> = buffer[..count as usize].iter().map(|&c| c as u8).collect();
                    Some(String::from_utf8_lossy(&bytes).into_owned())
                } else {
                    None
                };

                Some(DisplayEvent::Key {
                    symbol: map_keysym_to_symbol(keysym as c_uint),
                    modifiers: extract_modifiers(key_event.state),
                    text,
                })
            }
            xlib::ButtonRelease => {
                let button_event: xlib::XButtonEvent = event.button;
                Some(DisplayEvent::MouseButtonRelease {
                    button: MouseButton::from_x11(button_event.button),
                    x: button_event.x,
                    y: button_event.y,
                    modifiers: extract_modifiers(button_event.state),
                })
            }
            xlib::Expose => {
                // Only the last Expose of a series.
                if event.expose.count == 0 {
                    Some(DisplayEvent::Expose)
                } else {
                    None
                }
            }
            xlib::ClientMessage => {
                let atom = event.client_message.data.get_long(0) as xlib::Atom;
                if atom == self.wm_delete_window {
                    debug!("X11DisplayDriver: WM_DELETE_WINDOW received");
                    Some(DisplayEvent::CloseRequested)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn handle_present(&mut self, snapshot: RenderSnapshot) -> Result<DriverResponse, DisplayError> {
        if snapshot.width_px != self.width_px || snapshot.height_px != self.height_px {
            let reason = format!(
                "snapshot is {}x{}, window is {}x{}",
                snapshot.width_px, snapshot.height_px, self.width_px, self.height_px
            );
            return Err(DisplayError::PresentationFailed(snapshot, reason));
        }

        // SAFETY: The XImage borrows `snapshot.framebuffer`, which outlives the
        // image. Its data pointer is nulled before XDestroyImage so Xlib does not
        // free Rust memory.
        unsafe {
            let depth = xlib::XDefaultDepth(self.display, self.screen);
            let image = xlib::XCreateImage(
                self.display,
                self.visual,
                depth as c_uint,
                xlib::ZPixmap,
                0,
                snapshot.framebuffer.as_ptr() as *mut c_char,
                snapshot.width_px,
                snapshot.height_px,
                32,
                0,
            );

            if image.is_null() {
                return Err(DisplayError::PresentationFailed(
                    snapshot,
                    "XCreateImage failed".to_string(),
                ));
            }

            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                image,
                0,
                0,
                0,
                0,
                snapshot.width_px,
                snapshot.height_px,
            );

            (*image).data = ptr::null_mut();
            xlib::XDestroyImage(image);
            xlib::XFlush(self.display);
        }

        Ok(DriverResponse::PresentComplete(snapshot))
    }

    fn handle_set_title(&mut self, title: &str) -> Result<DriverResponse> {
        let c_title = CString::new(title).context("Window title contains a NUL byte")?;
        // SAFETY: `c_title` is a valid NUL-terminated string for the call's duration.
        unsafe {
            xlib::XStoreName(self.display, self.window, c_title.as_ptr());
            xlib::XFlush(self.display);
        }
        Ok(DriverResponse::TitleSet)
    }
}

fn map_keysym_to_symbol(keysym: c_uint) -> KeySymbol {
    match keysym {
        keysym::XK_Escape => KeySymbol::Escape,
        keysym::XK_Return => KeySymbol::Enter,
        keysym::XK_Left => KeySymbol::Left,
        keysym::XK_Up => KeySymbol::Up,
        keysym::XK_Right => KeySymbol::Right,
        keysym::XK_Down => KeySymbol::Down,
        // Latin-1 keysyms equal their code points.
        k if k < 0x100 => KeySymbol::Char(k as u8 as char),
        _ => KeySymbol::Unknown,
    }
}

fn extract_modifiers(state: c_uint) -> Modifiers {
    let mut modifiers = Modifiers::empty();

    if state & xlib::ShiftMask != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if state & xlib::ControlMask != 0 {
        modifiers |= Modifiers::CONTROL;
    }
    if state & xlib::Mod1Mask != 0 {
        modifiers |= Modifiers::ALT;
    }
    if state & xlib::Mod4Mask != 0 {
        modifiers |= Modifiers::SUPER;
    }

    modifiers
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        info!("X11DisplayDriver::drop() - Cleaning up");
        // SAFETY: Resources were created in `new` and are released exactly once here.
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(self.display, self.gc);
            }
            if self.window != 0 {
                xlib::XDestroyWindow(self.display, self.window);
            }
            if !self.display.is_null() {
                xlib::XCloseDisplay(self.display);
            }
        }
    }
}
