//=========================================================================
// Winit Backend
//=========================================================================
//
// Desktop display backend: a winit window presenting CPU frames through
// softbuffer.
//
// Architecture:
// ```text
//  Window::open ──► open()    EventLoop::new, pump once so resumed()
//                             creates window + softbuffer surface
//  each frame   ──► pump_events()
//                     pump_app_events(0) ──► Pump (ApplicationHandler)
//                                              └─ InputProcessor ──► Sender<Event>
//               ──► present() copy Surface pixels into softbuffer
//  shutdown     ──► close()   drop window + surface, keep the EventLoop
// ```
//
// The event loop is never run with run_app(): the window drives it one
// non-blocking pump per frame, so control returns to the frame loop.
// winit refuses to create a second EventLoop per process, so close()
// keeps it for a later open().
//
// A close request is forwarded as `Event::Quit`; whether the window
// closes is up to the frame loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::*;
use softbuffer::{Context, Surface as SoftSurface};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, OwnedDisplayHandle},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window as WinitWindow, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use super::input_processor::InputProcessor;
use crate::core::event::Event;
use crate::core::graphics::Surface;
use crate::core::math::{Dimension, Vec2};
use crate::core::platform_bridge::{Backend, DisplayConfig, PlatformError};

//=== Constants ===========================================================

/// How long open() waits for `resumed()` to create the window.
const CREATE_TIMEOUT: Duration = Duration::from_millis(100);

//=== Display =============================================================

/// An open OS window with its presentation surface.
///
/// Fields drop in declaration order: the surface before its context,
/// the context before the window.
struct Display {
    surface: SoftSurface<OwnedDisplayHandle, Arc<WinitWindow>>,
    _context: Context<OwnedDisplayHandle>,
    window: Arc<WinitWindow>,
    surface_size: Option<(NonZeroU32, NonZeroU32)>,
}

impl Display {
    fn create(event_loop: &ActiveEventLoop, attrs: WindowAttributes) -> Result<Self, PlatformError> {
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        let window = Arc::new(window);

        let context = Context::new(event_loop.owned_display_handle())
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        let surface = SoftSurface::new(&context, Arc::clone(&window))
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        Ok(Self {
            surface,
            _context: context,
            window,
            surface_size: None,
        })
    }

    fn dimension(&self) -> Dimension {
        let size = self.window.inner_size();
        Vec2::new(size.width, size.height)
    }
}

//=== WinitBackend ========================================================

/// Backend opening a real desktop window.
///
/// Must be used on the main thread (a winit requirement on macOS).
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    display: Option<Display>,
    input: InputProcessor,
}

impl WinitBackend {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            display: None,
            input: InputProcessor::new(),
        }
    }
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WinitBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitBackend")
            .field("has_event_loop", &self.event_loop.is_some())
            .field("open", &self.display.is_some())
            .finish()
    }
}

impl Backend for WinitBackend {
    fn open(&mut self, config: &DisplayConfig) -> Result<Dimension, PlatformError> {
        if let Some(display) = &self.display {
            warn!(target: "platform", "Display already open, reusing it");
            return Ok(display.dimension());
        }

        let mut event_loop = match self.event_loop.take() {
            Some(event_loop) => event_loop,
            None => EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?,
        };

        let attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.dimension.x, config.dimension.y))
            .with_resizable(config.resizable);

        // winit 0.30 only creates windows inside resumed(), so pump once.
        let mut creator = Creator {
            attrs: Some(attrs),
            result: None,
        };
        let status = event_loop.pump_app_events(Some(CREATE_TIMEOUT), &mut creator);
        self.event_loop = Some(event_loop);

        let display = creation_outcome(status, creator.result)?;
        let dimension = display.dimension();

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            dimension.x,
            dimension.y,
            display.window.scale_factor()
        );
        self.display = Some(display);
        Ok(dimension)
    }

    fn pump_events(&mut self, sink: &Sender<Event>) {
        let Some(mut event_loop) = self.event_loop.take() else {
            return;
        };

        let mut pump = Pump {
            input: &mut self.input,
            sink,
        };
        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut pump);
        self.event_loop = Some(event_loop);

        if let PumpStatus::Exit(code) = status {
            warn!(target: "platform", "Event loop exited with code {}", code);
        }
    }

    fn present(&mut self, frame: &Surface) -> Result<(), PlatformError> {
        let Some(display) = self.display.as_mut() else {
            return Ok(());
        };
        // Minimized windows report a zero size; nothing to show.
        let (Some(width), Some(height)) = (NonZeroU32::new(frame.width()), NonZeroU32::new(frame.height()))
        else {
            return Ok(());
        };

        if display.surface_size != Some((width, height)) {
            display
                .surface
                .resize(width, height)
                .map_err(|e| PlatformError::Surface(e.to_string()))?;
            display.surface_size = Some((width, height));
        }

        let mut buffer = display
            .surface
            .buffer_mut()
            .map_err(|e| PlatformError::Present(e.to_string()))?;
        if buffer.len() != frame.pixels().len() {
            return Err(PlatformError::Present(format!(
                "buffer holds {} pixels, frame has {}",
                buffer.len(),
                frame.pixels().len()
            )));
        }
        buffer.copy_from_slice(frame.pixels());

        display.window.pre_present_notify();
        buffer.present().map_err(|e| PlatformError::Present(e.to_string()))
    }

    fn close(&mut self) {
        if self.display.take().is_some() {
            info!(target: "platform", "Window closed");
        }
        self.input = InputProcessor::new();
    }
}

//=== Creator =============================================================

/// One-shot handler that builds the [`Display`] inside `resumed()`.
struct Creator {
    attrs: Option<WindowAttributes>,
    result: Option<Result<Display, PlatformError>>,
}

impl ApplicationHandler for Creator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attrs) = self.attrs.take() else {
            debug!(target: "platform", "Window already created (mobile resume?)");
            return;
        };
        self.result = Some(Display::create(event_loop, attrs));
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Result of the creation pump. An exited loop wins over whatever
/// `resumed()` produced.
fn creation_outcome(
    status: PumpStatus,
    result: Option<Result<Display, PlatformError>>,
) -> Result<Display, PlatformError> {
    if let PumpStatus::Exit(code) = status {
        return Err(PlatformError::EventLoopCreation(format!(
            "event loop exited with code {} before the window opened",
            code
        )));
    }
    result.unwrap_or_else(|| Err(PlatformError::WindowCreation("resumed() never fired".to_string())))
}

//=== Pump ================================================================

/// Per-frame handler translating window events into the window's queue.
struct Pump<'a> {
    input: &'a mut InputProcessor,
    sink: &'a Sender<Event>,
}

impl Pump<'_> {
    fn forward(&self, event: Event) {
        trace!(target: "platform::input", "{:?}", event);
        if self.sink.send(event).is_err() {
            warn!(target: "platform::input", "Event queue disconnected, dropping event");
        }
    }
}

impl ApplicationHandler for Pump<'_> {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.forward(Event::Quit);
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.forward(Event::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::Focused(focused) => self.forward(Event::Focused(focused)),

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event, .. } => match self.input.process_key_event(&event) {
                Some(event) => self.forward(event),
                None => trace!(target: "platform::input", "Unmapped key ignored"),
            },

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input.process_mouse_button(button, state);
                self.forward(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input.process_mouse_move(position.x, position.y);
                self.forward(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input.process_wheel(delta);
                self.forward(event);
            }

            // Frames are presented every loop iteration, so redraw
            // requests and scale changes (followed by Resized) need nothing.
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exited_loop_reports_exit_code() {
        match creation_outcome(PumpStatus::Exit(3), None) {
            Err(PlatformError::EventLoopCreation(reason)) => assert!(reason.contains("code 3")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("exited loop produced a display"),
        }
    }

    #[test]
    fn exit_wins_over_creation_error() {
        let result = Some(Err(PlatformError::WindowCreation("denied".to_string())));

        assert!(matches!(
            creation_outcome(PumpStatus::Exit(1), result),
            Err(PlatformError::EventLoopCreation(_))
        ));
    }

    #[test]
    fn missing_resume_is_a_window_creation_error() {
        assert!(matches!(
            creation_outcome(PumpStatus::Continue, None),
            Err(PlatformError::WindowCreation(_))
        ));
    }
}
