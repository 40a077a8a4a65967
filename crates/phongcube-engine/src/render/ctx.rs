use winit::dpi::PhysicalSize;

/// Renderer-facing context (device/queue + attachment formats + drawable size).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub size: PhysicalSize<u32>, // physical px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            depth_format,
            size,
        }
    }

    /// Drawable `width / height`; 1.0 while the surface has no area.
    #[inline]
    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.size)
    }
}

fn aspect_ratio(size: PhysicalSize<u32>) -> f32 {
    if size.width == 0 || size.height == 0 {
        1.0
    } else {
        size.width as f32 / size.height as f32
    }
}

/// Target for drawing (encoder + color and depth views).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: &'a wgpu::TextureView,
    ) -> Self {
        Self { encoder, color_view, depth_view }
    }
}
