use clap::{ArgAction, Parser, ValueEnum};
use glam::Vec3;
use winit::dpi::LogicalSize;

use phongcube_engine::device::GpuInit;
use phongcube_engine::logging::LoggingConfig;
use phongcube_engine::render::{Camera, Light, Material, ShadingModel};
use phongcube_engine::window::RuntimeConfig;
use phongcube_mesh::NormalMode;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "phongcube", version, about = "A rotating, Phong-lit cube")]
pub struct Args {
    /// Window width in logical pixels.
    #[arg(long, default_value_t = 600.0, value_parser = positive_f64)]
    pub width: f64,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600.0, value_parser = positive_f64)]
    pub height: f64,

    /// Window title.
    #[arg(long, default_value = "Rotating Cube")]
    pub title: String,

    /// Vertex normal preparation.
    #[arg(long, value_enum, default_value_t = NormalsArg::Smooth)]
    pub normals: NormalsArg,

    /// Where lighting is evaluated.
    #[arg(long, value_enum, default_value_t = ShadingArg::Phong)]
    pub shading: ShadingArg,

    /// Rotation speed in radians per second.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true, value_parser = finite_f32)]
    pub speed: f32,

    /// Specular exponent.
    #[arg(long, default_value_t = 128.0, value_parser = positive_f32)]
    pub shininess: f32,

    /// Show frames per second in the window title.
    #[arg(long)]
    pub show_fps: bool,

    /// Log filter (env_logger syntax). Falls back to RUST_LOG.
    #[arg(long)]
    pub log: Option<String>,

    /// Wait for vertical sync when presenting.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub vsync: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum NormalsArg {
    /// Average normals at shared corners.
    Smooth,
    /// Keep one normal per face.
    Flat,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ShadingArg {
    /// Per-fragment ambient + diffuse + specular.
    Phong,
    /// Per-vertex ambient + diffuse.
    Gouraud,
}

fn positive_f64(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(_) => Err(format!("`{s}` must be a positive number")),
        Err(e) => Err(e.to_string()),
    }
}

fn positive_f32(s: &str) -> Result<f32, String> {
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(_) => Err(format!("`{s}` must be a positive number")),
        Err(e) => Err(e.to_string()),
    }
}

fn finite_f32(s: &str) -> Result<f32, String> {
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("`{s}` must be finite")),
        Err(e) => Err(e.to_string()),
    }
}

/// Rotation applied to the model each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    /// Radians per second.
    pub speed: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            axis: Vec3::new(0.5, 1.0, 0.0),
            speed: 1.0,
        }
    }
}

/// Everything the demo needs, resolved from [`Args`].
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub normals: NormalMode,
    pub shading: ShadingModel,
    pub spin: Spin,
    pub camera: Camera,
    pub light: Light,
    pub material: Material,
    pub clear_color: wgpu::Color,
    pub show_fps: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit {
                // Shader output is written as-is, without sRGB encoding.
                prefer_srgb: false,
                ..GpuInit::default()
            },
            logging: LoggingConfig::default(),
            normals: NormalMode::default(),
            shading: ShadingModel::default(),
            spin: Spin::default(),
            camera: Camera::default(),
            light: Light::default(),
            material: Material::default(),
            clear_color: wgpu::Color::BLACK,
            show_fps: false,
        }
    }
}

impl From<Args> for DemoConfig {
    fn from(args: Args) -> Self {
        let defaults = DemoConfig::default();

        Self {
            runtime: RuntimeConfig {
                title: args.title,
                initial_size: LogicalSize::new(args.width, args.height),
            },
            gpu: GpuInit {
                present_mode: if args.vsync {
                    wgpu::PresentMode::Fifo
                } else {
                    wgpu::PresentMode::AutoNoVsync
                },
                ..defaults.gpu
            },
            logging: LoggingConfig {
                env_filter: args.log,
                ..defaults.logging
            },
            normals: match args.normals {
                NormalsArg::Smooth => NormalMode::Smooth,
                NormalsArg::Flat => NormalMode::Flat,
            },
            shading: match args.shading {
                ShadingArg::Phong => ShadingModel::Phong,
                ShadingArg::Gouraud => ShadingModel::Gouraud,
            },
            spin: Spin {
                speed: args.speed,
                ..defaults.spin
            },
            material: Material {
                shininess: args.shininess,
                ..defaults.material
            },
            show_fps: args.show_fps,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DemoConfig, clap::Error> {
        let argv = std::iter::once("phongcube").chain(args.iter().copied());
        Args::try_parse_from(argv).map(DemoConfig::from)
    }

    #[test]
    fn defaults_match_the_demo() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.runtime.title, "Rotating Cube");
        assert_eq!(cfg.runtime.initial_size, LogicalSize::new(600.0, 600.0));
        assert_eq!(cfg.normals, NormalMode::Smooth);
        assert_eq!(cfg.shading, ShadingModel::Phong);
        assert_eq!(cfg.spin, Spin::default());
        assert_eq!(cfg.material, Material::default());
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::Fifo);
        assert!(!cfg.gpu.prefer_srgb);
        assert!(cfg.logging.env_filter.is_none());
        assert!(!cfg.show_fps);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--width", "800",
            "--height", "400",
            "--normals", "flat",
            "--shading", "gouraud",
            "--speed", "-2.5",
            "--shininess", "32",
            "--show-fps",
            "--log", "debug",
            "--vsync", "false",
        ])
        .unwrap();

        assert_eq!(cfg.runtime.initial_size, LogicalSize::new(800.0, 400.0));
        assert_eq!(cfg.normals, NormalMode::Flat);
        assert_eq!(cfg.shading, ShadingModel::Gouraud);
        assert_eq!(cfg.spin.speed, -2.5);
        assert_eq!(cfg.material.shininess, 32.0);
        assert_eq!(cfg.material.ka, 1.0);
        assert!(cfg.show_fps);
        assert_eq!(cfg.logging.env_filter.as_deref(), Some("debug"));
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--height", "-10"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse(&["--shading", "toon"]).is_err());
    }

    #[test]
    fn shininess_beyond_f32_range_is_rejected() {
        assert!(parse(&["--shininess", "1e39"]).is_err());
        assert!(parse(&["--shininess", "0"]).is_err());
    }

    #[test]
    fn non_finite_speed_is_rejected() {
        assert!(parse(&["--speed", "inf"]).is_err());
    }
}
