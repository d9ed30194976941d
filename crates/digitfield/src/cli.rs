//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use digitfield_config::Config;
use digitfield_core::Preset;

/// A terminal background of cycling digits that shy away from the mouse.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field preset.
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Seed for a reproducible particle layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames drawn per second.
    #[arg(long, value_name = "N")]
    pub fps: Option<u32>,

    /// Write logs to this file instead of the cache directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

/// Preset names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Classic,
    Dense,
    Batched,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Classic => Preset::Classic,
            PresetArg::Dense => Preset::Dense,
            PresetArg::Batched => Preset::Batched,
        }
    }
}

impl Cli {
    /// Apply command line values on top of a loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(preset) = self.preset {
            config.preset = preset.into();
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitfield_core::ConfigError;
    use rstest::rstest;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case::classic("classic", Preset::Classic)]
    #[case::dense("dense", Preset::Dense)]
    #[case::batched("batched", Preset::Batched)]
    fn test_preset_flag(#[case] name: &str, #[case] expected: Preset) {
        let cli = Cli::parse_from(["digitfield", "--preset", name]);
        assert_eq!(cli.apply(Config::default()).preset, expected);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["digitfield", "--fps", "24", "--seed", "9"]);
        let config = cli.apply(Config {
            preset: Preset::Dense,
            ..Config::default()
        });
        assert_eq!(config.target_fps, 24);
        assert_eq!(config.preset, Preset::Dense);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_fps_flag_is_bounded() {
        let cli = Cli::parse_from(["digitfield", "--fps", "100000"]);
        assert_eq!(
            cli.apply(Config::default()).validate(),
            Err(ConfigError::FrameRateTooHigh(100_000))
        );

        let cli = Cli::parse_from(["digitfield", "--fps", "240"]);
        assert!(cli.apply(Config::default()).validate().is_ok());
    }
}
