use anyhow::{Context, Result};
use glam::Mat4;

use phongcube_engine::core::{App, AppControl, FrameCtx};
use phongcube_engine::render::{scene, Camera, Light, Material, MeshRenderer, SceneUniforms};
use phongcube_engine::time::FrameStats;
use phongcube_mesh::unit_cube;

use crate::config::{DemoConfig, Spin};

/// The demo: one cube, one light, one rotation.
pub struct CubeApp {
    renderer: MeshRenderer,
    spin: Spin,
    camera: Camera,
    light: Light,
    material: Material,
    clear_color: wgpu::Color,

    stats: FrameStats,
    show_fps: bool,
    title: String,
}

impl CubeApp {
    /// Builds the cube and prepares its normals. GPU upload happens on the
    /// first frame.
    pub fn new(config: &DemoConfig) -> Result<Self> {
        let mut mesh = unit_cube();
        config.normals.apply(&mut mesh);
        mesh.validate().context("cube mesh is malformed")?;

        log::info!(
            "cube: {} vertices, {} indices, {:?} normals, {:?} shading",
            mesh.vertex_count(),
            mesh.index_count(),
            config.normals,
            config.shading
        );

        Ok(Self {
            renderer: MeshRenderer::new(mesh, config.shading),
            spin: config.spin,
            camera: config.camera,
            light: config.light,
            material: config.material,
            clear_color: config.clear_color,
            stats: FrameStats::default(),
            show_fps: config.show_fps,
            title: config.runtime.title.clone(),
        })
    }

    fn model_at(&self, elapsed: f32) -> Mat4 {
        scene::spin(self.spin.axis, elapsed * self.spin.speed)
    }
}

fn title_with_fps(title: &str, fps: f32) -> String {
    format!("{title} ({fps:.0} fps)")
}

impl App for CubeApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let model = self.model_at(ctx.time.elapsed);

        let renderer = &mut self.renderer;
        let (camera, light, material) = (&self.camera, &self.light, &self.material);

        let control = ctx.render(self.clear_color, |rctx, target| {
            let uniforms = SceneUniforms::new(model, camera, light, material, rctx.aspect());
            renderer.render(rctx, target, &uniforms);
        });

        if let Some(fps) = self.stats.record(ctx.time.now) {
            log::debug!("{fps:.1} fps (frame {})", ctx.time.frame_index);
            if self.show_fps {
                ctx.runtime.set_title(title_with_fps(&self.title, fps));
            }
        }

        control
    }

    fn on_exit(&mut self) {
        match self.stats.last_fps() {
            Some(fps) => log::info!("shutting down (last {fps:.1} fps)"),
            None => log::info!("shutting down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phongcube_mesh::NormalMode;

    #[test]
    fn smooth_config_averages_corner_normals() {
        let app = CubeApp::new(&DemoConfig::default()).unwrap();
        let n = app.renderer.mesh().vertices()[0].normal;
        let t = -1.0 / 3f32.sqrt();
        assert!(n.iter().all(|c| (c - t).abs() < 1e-6), "{n:?}");
    }

    #[test]
    fn flat_config_keeps_face_normals() {
        let config = DemoConfig {
            normals: NormalMode::Flat,
            ..DemoConfig::default()
        };
        let app = CubeApp::new(&config).unwrap();
        assert_eq!(app.renderer.mesh().vertices()[0].normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn model_starts_unrotated() {
        let app = CubeApp::new(&DemoConfig::default()).unwrap();
        assert!(app.model_at(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn speed_scales_rotation_angle() {
        let mut config = DemoConfig::default();
        config.spin.speed = 2.0;
        let fast = CubeApp::new(&config).unwrap();
        let slow = CubeApp::new(&DemoConfig::default()).unwrap();
        assert!(fast.model_at(0.5).abs_diff_eq(slow.model_at(1.0), 1e-6));
    }

    #[test]
    fn fps_title_is_rounded() {
        assert_eq!(title_with_fps("Rotating Cube", 59.7), "Rotating Cube (60 fps)");
    }
}
