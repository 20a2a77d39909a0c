mod app;

use chargefield::{FieldConfig, RenderMode, Simulation};
use clap::Parser;
use eframe::egui;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Initial window width
    #[arg(long, default_value_t = 1200.0)]
    width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Start with equipotential lines instead of field vectors
    #[arg(long)]
    potential: bool,

    /// Spacing of the field-vector grid in pixels (>= 1)
    #[arg(long, value_parser = parse_spacing)]
    grid_pitch: Option<f64>,

    /// Spacing of the potential sampling grid in pixels (>= 1)
    #[arg(long, value_parser = parse_spacing)]
    resolution: Option<f64>,

    /// Minimum distance between two charges in pixels
    #[arg(long, value_parser = parse_distance)]
    min_separation: Option<f64>,
}

const MIN_SPACING: f64 = 1.0;

fn parse_distance(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("{v} is not a non-negative distance"));
    }
    Ok(v)
}

fn parse_spacing(s: &str) -> Result<f64, String> {
    let v = parse_distance(s)?;
    if v < MIN_SPACING {
        return Err(format!("spacing must be at least {MIN_SPACING} px, got {v}"));
    }
    Ok(v)
}

impl Args {
    fn config(&self) -> FieldConfig {
        let mut config = FieldConfig::default();
        if let Some(pitch) = self.grid_pitch {
            config.grid_pitch = pitch;
        }
        if let Some(res) = self.resolution {
            config.contour_resolution = res;
        }
        if let Some(sep) = self.min_separation {
            config.min_separation = sep;
        }
        config
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.config();
    info!("starting with {:?}", config);

    let mut sim = Simulation::new(config, egui::vec2(args.width, args.height));
    if args.potential {
        sim.set_mode(RenderMode::Potential);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Electric Field Simulator",
        options,
        Box::new(move |_cc| Box::new(app::FieldSimulator::new(sim))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from([
            "chargefield",
            "--grid-pitch",
            "30",
            "--min-separation",
            "60",
        ]);
        let config = args.config();
        assert_eq!(config.grid_pitch, 30.0);
        assert_eq!(config.contour_resolution, FieldConfig::default().contour_resolution);
        assert_eq!(config.min_separation, 60.0);
        assert!(!args.potential);
    }

    #[test]
    fn sub_pixel_or_invalid_spacing_is_refused() {
        for bad in ["1e-6", "0", "-4", "NaN", "inf"] {
            assert!(Args::try_parse_from(["chargefield", "--resolution", bad]).is_err(), "{bad}");
            assert!(Args::try_parse_from(["chargefield", "--grid-pitch", bad]).is_err(), "{bad}");
        }
        assert!(Args::try_parse_from(["chargefield", "--min-separation", "-1"]).is_err());

        let args = Args::try_parse_from(["chargefield", "--resolution", "1"]).unwrap();
        assert_eq!(args.config().contour_resolution, 1.0);
    }
}
