/// One acquired surface texture plus everything needed to record into it.
///
/// Consumed by `Gpu::submit`, which submits the encoder and then presents
/// `surface_texture`. Must not outlive the frame it was acquired for.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    /// Shared handle to the window's depth attachment.
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
