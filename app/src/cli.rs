use crate::config::limits::{MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lumen_core::input::Key;
use lumen_core::observer::InputModality;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "Resolve theme preferences and check accessibility settings"
)]
pub struct Cli {
    /// Additional configuration file, loaded after the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise the log level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Accessibility checks
    A11y {
        #[command(subcommand)]
        action: A11yAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Show the resolved theme and where it came from
    Show,
    /// Store an explicit theme preference
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
    /// Flip the theme and store the result
    Toggle,
    /// Follow OS color scheme changes until interrupted
    Watch {
        /// Polling interval in milliseconds, overriding watch.poll_interval_ms
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS)
        )]
        interval_ms: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum A11yAction {
    /// Check theme colors against WCAG contrast ratios
    CheckColors(ColorArgs),
    /// Derive the device capability profile and animation presets
    Profile(ProfileArgs),
    /// Replay key presses over a list of items and print where focus lands
    Navigate(NavigateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ColorArgs {
    #[arg(long)]
    pub background: String,
    #[arg(long)]
    pub foreground: String,
    #[arg(long)]
    pub primary: String,
    #[arg(long)]
    pub secondary: Option<String>,
    #[arg(long)]
    pub accent: Option<String>,
    #[arg(long)]
    pub border: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    #[arg(long, default_value_t = 800)]
    pub height: u32,
    #[arg(long, default_value_t = 0)]
    pub touch_points: u32,
    /// Defaults to the threads available to this process
    #[arg(long)]
    pub threads: Option<usize>,
    #[arg(long)]
    pub memory_gb: Option<f32>,
    #[arg(long, value_enum, default_value = "pointer")]
    pub modality: ModalityArg,
    #[arg(long)]
    pub reduced_motion: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NavigateArgs {
    /// Item labels, in navigation order
    #[arg(long, value_delimiter = ',', required = true)]
    pub items: Vec<String>,
    /// Keys to press, in order
    #[arg(long, value_enum, value_delimiter = ',')]
    pub keys: Vec<NavKey>,
    #[arg(long, value_enum, default_value = "vertical")]
    pub orientation: OrientationArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for lumen_core::ThemePreference {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => lumen_core::ThemePreference::Light,
            ThemeArg::Dark => lumen_core::ThemePreference::Dark,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModalityArg {
    Pointer,
    Keyboard,
    Touch,
}

impl From<ModalityArg> for InputModality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Pointer => InputModality::Pointer,
            ModalityArg::Keyboard => InputModality::Keyboard,
            ModalityArg::Touch => InputModality::Touch,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    Vertical,
    Horizontal,
    Both,
}

impl From<OrientationArg> for lumen_core::a11y::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Self::Vertical,
            OrientationArg::Horizontal => Self::Horizontal,
            OrientationArg::Both => Self::Both,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
}

impl From<NavKey> for Key {
    fn from(key: NavKey) -> Self {
        match key {
            NavKey::Up => Key::ArrowUp,
            NavKey::Down => Key::ArrowDown,
            NavKey::Left => Key::ArrowLeft,
            NavKey::Right => Key::ArrowRight,
            NavKey::Home => Key::Home,
            NavKey::End => Key::End,
            NavKey::Enter => Key::Enter,
        }
    }
}
