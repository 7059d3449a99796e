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

//! The wgpu-backed [`GraphicsSubsystem`].

use super::context::WgpuGraphicsContext;
use anyhow::{anyhow, Result};
use hearth_core::{GraphicsSubsystem, RenderState};
use std::sync::Arc;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

/// A frame between `begin` and `present`.
struct ActiveFrame {
    surface_texture: wgpu::SurfaceTexture,
    encoder: Option<wgpu::CommandEncoder>,
}

/// Renders the frame's clear pass into a window surface.
///
/// The subsystem is created before any window exists. Until [`attach`](Self::attach)
/// is called, every frame operation is a no-op, as is a frame whose swapchain image
/// could not be acquired.
#[derive(Default)]
pub struct WgpuGraphics {
    context: Option<WgpuGraphicsContext>,
    depth_test: bool,
    depth_view: Option<wgpu::TextureView>,
    frame: Option<ActiveFrame>,
}

impl WgpuGraphics {
    /// Creates a detached graphics subsystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the surface and device for `window`, blocking until they are ready.
    pub fn attach(&mut self, window: Arc<Window>) -> Result<()> {
        if self.context.is_some() {
            return Err(anyhow!("WgpuGraphics is already attached to a window."));
        }
        let size = window.inner_size();
        let context = pollster::block_on(WgpuGraphicsContext::new(window, size))?;
        log::info!(
            "WgpuGraphics: attached to \"{}\" ({:?}) at {}x{}",
            context.adapter_name,
            context.adapter_backend,
            context.get_size().0,
            context.get_size().1
        );
        self.context = Some(context);
        self.rebuild_depth_target();
        Ok(())
    }

    /// Whether a window surface has been attached.
    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    /// Whether frames are rendered with a depth attachment.
    pub fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    /// Reconfigures the surface for the window's new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(context) = self.context.as_mut() {
            context.resize(width, height);
        }
        self.rebuild_depth_target();
    }

    /// (Internal) Creates or drops the depth texture to match the render state.
    fn rebuild_depth_target(&mut self) {
        self.depth_view = None;
        let Some(context) = self.context.as_ref() else {
            return;
        };
        if !self.depth_test {
            return;
        }

        let (width, height) = context.get_size();
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Hearth Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }

    /// (Internal) Acquires the next swapchain image, reconfiguring once if it was lost.
    fn acquire(context: &WgpuGraphicsContext) -> Result<Option<wgpu::SurfaceTexture>> {
        let mut reconfigured = false;
        loop {
            match context.get_current_texture() {
                Ok(texture) => return Ok(Some(texture)),
                Err(e @ wgpu::SurfaceError::Lost) | Err(e @ wgpu::SurfaceError::Outdated) => {
                    if reconfigured {
                        log::warn!("WgpuGraphics: Swapchain still {e:?} after reconfigure; skipping frame.");
                        return Ok(None);
                    }
                    log::warn!("WgpuGraphics: Swapchain surface lost or outdated ({e:?}). Reconfiguring.");
                    context.reconfigure();
                    reconfigured = true;
                }
                Err(e @ wgpu::SurfaceError::Timeout) => {
                    log::warn!("WgpuGraphics: Swapchain Timeout acquiring frame. ({e:?})");
                    return Ok(None);
                }
                Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("WgpuGraphics: Swapchain OutOfMemory! ({e:?})");
                    return Err(anyhow!("Surface acquisition failed: OutOfMemory"));
                }
                Err(e) => {
                    log::error!("WgpuGraphics: Unexpected SurfaceError: {e:?}");
                    return Err(anyhow!("Surface acquisition failed: {e:?}"));
                }
            }
        }
    }
}

impl GraphicsSubsystem for WgpuGraphics {
    fn set_render_state(&mut self, state: RenderState, enabled: bool) {
        match state {
            RenderState::DepthTest => {
                if self.depth_test != enabled {
                    log::debug!("WgpuGraphics: depth testing {}", if enabled { "enabled" } else { "disabled" });
                    self.depth_test = enabled;
                    self.rebuild_depth_target();
                }
            }
        }
    }

    fn begin(&mut self) -> Result<()> {
        let Some(context) = self.context.as_ref() else {
            return Ok(());
        };
        if self.frame.is_some() {
            return Err(anyhow!("WgpuGraphics: begin called twice without present"));
        }
        let Some(surface_texture) = Self::acquire(context)? else {
            return Ok(());
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Hearth Frame Encoder"),
            });

        {
            let color_attachments = [Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })];
            let depth_stencil_attachment =
                self.depth_view
                    .as_ref()
                    .map(|depth_view| wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    });
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hearth Clear Pass"),
                color_attachments: &color_attachments,
                depth_stencil_attachment,
                ..Default::default()
            });
        }

        self.frame = Some(ActiveFrame {
            surface_texture,
            encoder: Some(encoder),
        });
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let (Some(context), Some(frame)) = (self.context.as_ref(), self.frame.as_mut()) else {
            return Ok(());
        };
        if let Some(encoder) = frame.encoder.take() {
            context.queue.submit(std::iter::once(encoder.finish()));
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if let Some(frame) = self.frame.take() {
            if frame.encoder.is_some() {
                return Err(anyhow!("WgpuGraphics: present called before end"));
            }
            frame.surface_texture.present();
        }
        Ok(())
    }
}
