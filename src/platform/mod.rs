//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the logic thread over a bounded
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  InputSystem     │
//  │   └─ drops key repeats   │    │  ↓               │
//  │   ↓                      │    │  SceneManager    │
//  │  InputBuffer             │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested (flush) │             ↑
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// RedrawRequested is the frame boundary: everything buffered since the
// previous redraw is sent as one batch. Empty batches are not sent.
//
// If the logic thread is gone the platform keeps running so the window
// can still be closed.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Cultivation Shell";
const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 600;

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS). The window is
/// created lazily in `resumed()`.
pub(crate) struct Platform {
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    pub(crate) fn new(event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends everything buffered since the last redraw as one batch.
    ///
    /// A disconnected channel drops the batch with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some(batch) = self.buffer.drain() {
            let count = batch.len();
            trace!(target: "platform::input", "Flushing {} input events", count);

            if self.event_sender.send(PlatformEvent::Inputs(batch)).is_err() {
                warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
            }
        }
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Logic thread already gone");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_closed();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
