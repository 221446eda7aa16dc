mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{Seed, parse_byte, parse_level};

/// PCF8574 I/O expander command-line interface
#[derive(Parser)]
#[command(name = "pcf8574ctl")]
#[command(about = "Read and drive PCF8574 I/O expander lines", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    conf: Option<PathBuf>,

    /// I2C bus number
    #[arg(long)]
    i2c_bus: Option<u8>,

    /// I2C device address (decimal, 0x hex or 0b binary)
    #[arg(long, value_parser = parse_byte)]
    i2c_addr: Option<u8>,

    /// Write this value to every line before running the command
    #[arg(long, value_name = "VALUE", value_parser = parse_byte)]
    init: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the device answers
    Probe,
    /// Read one pin, or all eight
    Read {
        /// Pin number (0-7)
        pin: Option<u8>,
    },
    /// Drive a single pin high or low
    Write {
        /// Pin number (0-7)
        pin: u8,
        /// 1/high/on or 0/low/off
        #[arg(action = clap::ArgAction::Set, value_parser = parse_level)]
        level: bool,
    },
    /// Write all eight lines
    Write8 {
        #[arg(value_parser = parse_byte)]
        value: u8,
    },
    /// Invert one pin, a mask of pins, or every pin
    Toggle {
        /// Pin number (0-7)
        pin: Option<u8>,
        /// Lines to invert
        #[arg(long, value_parser = parse_byte, conflicts_with = "pin")]
        mask: Option<u8>,
    },
    /// Shift the outputs towards pin 7
    ShiftLeft {
        #[arg(default_value_t = 1)]
        n: u8,
    },
    /// Shift the outputs towards pin 0
    ShiftRight {
        #[arg(default_value_t = 1)]
        n: u8,
    },
    /// Rotate the outputs towards pin 7
    RotateLeft {
        #[arg(default_value_t = 1)]
        n: u8,
    },
    /// Rotate the outputs towards pin 0
    RotateRight {
        #[arg(default_value_t = 1)]
        n: u8,
    },
    /// Mirror the outputs (pin 0 <-> pin 7, ...)
    Reverse,
    /// Drive one pin high and all others low
    Select {
        /// Pin number; 8 or above drives every line low
        pin: u8,
    },
    /// Drive pins 0 through PIN high and the rest low
    SelectN {
        /// Pin number; 8 or above drives every line high
        pin: u8,
    },
    /// Drive every line low
    SelectNone,
    /// Release every line high
    SelectAll,
    /// Sample input lines without disturbing the outputs
    Button {
        /// Pin number (0-7)
        pin: Option<u8>,
        /// Lines to sample (defaults to the configured button mask)
        #[arg(long, value_parser = parse_byte, conflicts_with = "pin")]
        mask: Option<u8>,
    },
    /// Display address, input and output state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// How much of the output shadow this command depends on
    ///
    /// Reads and whole-byte writes need nothing. Commands that modify the
    /// current outputs adopt them from the pin levels, and button sampling
    /// treats its lines as released inputs.
    fn seed(&self, button_mask: u8) -> Seed {
        match self {
            Commands::Write { .. }
            | Commands::Toggle { .. }
            | Commands::ShiftLeft { .. }
            | Commands::ShiftRight { .. }
            | Commands::RotateLeft { .. }
            | Commands::RotateRight { .. }
            | Commands::Reverse => Seed::Outputs,
            Commands::Button { pin, mask } => Seed::Inputs(match (pin, mask) {
                (Some(pin), _) => pcf8574::bits::select_mask(*pin),
                (None, Some(mask)) => *mask,
                (None, None) => button_mask,
            }),
            Commands::Probe
            | Commands::Read { .. }
            | Commands::Write8 { .. }
            | Commands::Select { .. }
            | Commands::SelectN { .. }
            | Commands::SelectNone
            | Commands::SelectAll
            | Commands::Status { .. } => Seed::None,
        }
    }
}

#[cfg(target_os = "linux")]
fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Logs go to stderr so command output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pcf8574=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("pcf8574ctl requires Linux for I2C device access");
    std::process::exit(1);
}

/// Resolve configuration: CLI > file > defaults
fn load_config(cli: &Cli) -> anyhow::Result<pcf8574::config::Config> {
    use pcf8574::config::{Config, DEFAULT_CONFIG_FILE};

    let mut config = match &cli.conf {
        Some(path) => Config::from_file(path)?,
        None => Config::from_file_or_default(DEFAULT_CONFIG_FILE)?,
    };

    if let Some(i2c_bus) = cli.i2c_bus {
        config.i2c_bus = i2c_bus;
    }
    if let Some(i2c_addr) = cli.i2c_addr {
        config.i2c_addr = i2c_addr;
    }
    if let Some(init) = cli.init {
        config.initial_value = Some(init);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(target_os = "linux")]
fn run(cli: Cli) -> anyhow::Result<()> {
    use commands::{port, status};
    use tracing::{debug, warn};

    let config = load_config(&cli)?;
    debug!(
        "Configuration: I2C bus {}, address 0x{:02X}",
        config.i2c_bus, config.i2c_addr
    );
    if !pcf8574::config::is_expander_address(config.i2c_addr) {
        warn!(
            "Address 0x{:02X} is outside the PCF8574 (0x20-0x27) and PCF8574A (0x38-0x3F) ranges",
            config.i2c_addr
        );
    }

    let mut expander = commands::open(&config)?;

    if let Commands::Probe = cli.command {
        return status::probe(&mut expander);
    }
    let seed = cli.command.seed(config.button_mask);
    commands::prepare(&mut expander, &config, seed)?;

    match cli.command {
        Commands::Probe => Ok(()),
        Commands::Read { pin } => port::read(&mut expander, pin),
        Commands::Write { pin, level } => port::update(&mut expander, |e| e.write(pin, level)),
        Commands::Write8 { value } => port::update(&mut expander, |e| e.write8(value)),
        Commands::Toggle { pin, mask } => port::toggle(&mut expander, pin, mask),
        Commands::ShiftLeft { n } => port::update(&mut expander, |e| e.shift_left(n)),
        Commands::ShiftRight { n } => port::update(&mut expander, |e| e.shift_right(n)),
        Commands::RotateLeft { n } => port::update(&mut expander, |e| e.rotate_left(n)),
        Commands::RotateRight { n } => port::update(&mut expander, |e| e.rotate_right(n)),
        Commands::Reverse => port::update(&mut expander, |e| e.reverse()),
        Commands::Select { pin } => port::update(&mut expander, |e| e.select(pin)),
        Commands::SelectN { pin } => port::update(&mut expander, |e| e.select_n(pin)),
        Commands::SelectNone => port::update(&mut expander, |e| e.select_none()),
        Commands::SelectAll => port::update(&mut expander, |e| e.select_all()),
        Commands::Button { pin, mask } => port::button(&mut expander, pin, mask),
        Commands::Status { json } => {
            status::status(&mut expander, config.initial_value.is_some(), json)
        }
    }
}
