use clap::Parser;

use crate::error::ConfigError;
use crate::terrain::GridParams;
use crate::terrain::mesh::{DIMENSION_RANGE, SEGMENT_RANGE};

#[derive(Parser, Debug)]
#[command(name = "terrain3d", about = "Interactive random-terrain plane viewer")]
pub struct Cli {
    /// Initial plane width
    #[arg(long, default_value_t = 5.0)]
    pub width: f32,

    /// Initial plane height
    #[arg(long, default_value_t = 5.0)]
    pub height: f32,

    /// Initial number of subdivisions along the width
    #[arg(long, default_value_t = 10)]
    pub width_segments: u32,

    /// Initial number of subdivisions along the height
    #[arg(long, default_value_t = 10)]
    pub height_segments: u32,

    #[arg(long, default_value_t = 1280)]
    pub window_width: u32,

    #[arg(long, default_value_t = 720)]
    pub window_height: u32,

    /// Seed for the height generator; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render as fast as possible instead of at the display refresh rate
    #[arg(long)]
    pub no_vsync: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub grid: GridParams,
    pub window_size: (u32, u32),
    pub seed: Option<u64>,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            window_size: (1280, 720),
            seed: None,
            vsync: true,
        }
    }
}

impl TryFrom<&Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, ConfigError> {
        check_dimension("width", cli.width)?;
        check_dimension("height", cli.height)?;
        check_segments("width-segments", cli.width_segments)?;
        check_segments("height-segments", cli.height_segments)?;

        if cli.window_width == 0 || cli.window_height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: cli.window_width,
                height: cli.window_height,
            });
        }

        Ok(Self {
            grid: GridParams {
                width: cli.width,
                height: cli.height,
                width_segments: cli.width_segments,
                height_segments: cli.height_segments,
            },
            window_size: (cli.window_width, cli.window_height),
            seed: cli.seed,
            vsync: !cli.no_vsync,
        })
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if DIMENSION_RANGE.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        name,
        value: value as f64,
        min: *DIMENSION_RANGE.start() as f64,
        max: *DIMENSION_RANGE.end() as f64,
    })
}

fn check_segments(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if SEGMENT_RANGE.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        name,
        value: value as f64,
        min: *SEGMENT_RANGE.start() as f64,
        max: *SEGMENT_RANGE.end() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("terrain3d").chain(args.iter().copied()))
            .expect("arguments parse");
        AppConfig::try_from(&cli)
    }

    #[test]
    fn defaults_match_initial_scene() {
        assert_eq!(parse(&[]), Ok(AppConfig::default()));
    }

    #[test]
    fn grid_flags_override_defaults() {
        let config = parse(&[
            "--width",
            "12.5",
            "--width-segments",
            "1",
            "--seed",
            "99",
            "--no-vsync",
        ])
        .expect("valid config");

        assert_eq!(config.grid.width, 12.5);
        assert_eq!(config.grid.width_segments, 1);
        assert_eq!(config.grid.height_segments, 10);
        assert_eq!(config.seed, Some(99));
        assert!(!config.vsync);
    }

    #[test]
    fn out_of_range_dimension_is_rejected() {
        let err = parse(&["--height", "0.5"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                name: "height",
                value: 0.5,
                min: 1.0,
                max: 20.0,
            }
        );
    }

    #[test]
    fn out_of_range_segments_are_rejected() {
        assert!(parse(&["--height-segments", "51"]).is_err());
        assert!(parse(&["--width-segments", "0"]).is_err());
    }

    #[test]
    fn empty_window_is_rejected() {
        let err = parse(&["--window-height", "0"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyWindow {
                width: 1280,
                height: 0
            }
        );
    }
}
