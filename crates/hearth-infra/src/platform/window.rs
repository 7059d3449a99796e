// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The application window, built from the project descriptor.

use hearth_core::AppConfig;
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window, WindowId},
};

/// A cheaply clonable handle to the `winit` window.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// Requests that the window be redrawn.
    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// The `winit` identifier of the window.
    pub fn id(&self) -> WindowId {
        self.inner.id()
    }

    /// A shared handle, suitable for creating a graphics surface.
    pub fn handle(&self) -> Arc<Window> {
        self.inner.clone()
    }
}

/// A builder for creating [`WinitWindow`] instances.
#[derive(Debug, Clone)]
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            title: "Hearth".to_string(),
            width: 1024,
            height: 768,
            fullscreen: false,
        }
    }

    /// A builder matching the project descriptor's window settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_title(config.name.clone())
            .with_dimensions(config.width, config.height)
            .with_fullscreen(config.fullscreen)
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Requests a borderless fullscreen window on the current monitor.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Builds the window using the active `winit` event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{} (fullscreen: {})",
            self.title,
            self.width,
            self.height,
            self.fullscreen
        );

        let fullscreen = self.fullscreen.then_some(Fullscreen::Borderless(None));
        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_fullscreen(fullscreen)
            .with_visible(true);

        let window = event_loop.create_window(window_attributes)?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }

    /// The title the window will be built with.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The inner size the window will be built with.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the window will be fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
