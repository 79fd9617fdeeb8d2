use clap::Parser;
use id809_i2c::{RppalBus, SensorLink, DEFAULT_ADDRESS, DEFAULT_BUS};
use log::{error, info};
use std::process::ExitCode;

/// Talks to an ID809 fingerprint sensor on a Raspberry Pi I2C bus.
#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// I2C bus number, i.e. /dev/i2c-<bus>
    #[arg(long, short, default_value_t = DEFAULT_BUS)]
    bus: u8,
    /// 7-bit address of the sensor
    #[arg(long, short, default_value_t = DEFAULT_ADDRESS, value_parser = parse_address)]
    address: u8,
    /// Security level to configure before matching
    #[arg(long, short, default_value_t = 5)]
    security_level: u8,
}

fn parse_address(arg: &str) -> Result<u8, std::num::ParseIntError> {
    match arg.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => arg.parse(),
    }
}

fn main() -> ExitCode {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let cli = Cli::parse();

    let mut sensor = SensorLink::new(RppalBus::new(cli.bus));
    if let Err(e) = sensor.open(cli.address) {
        error!("Failed to initialize fingerprint sensor: {}", e);
        return ExitCode::FAILURE;
    }
    info!("Sensor initialized. Trying some operations...");

    match sensor.set_security_level(cli.security_level) {
        Ok(()) => info!("Security level set to {}", cli.security_level),
        Err(e) => error!("Failed to set security level: {}", e),
    };

    match sensor.read_device_status() {
        Ok(status) => info!("Sensor status: {:#04x}", status),
        Err(e) => error!("Failed to read status: {}", e),
    };

    match sensor.capture_fingerprint() {
        Ok(()) => info!("Fingerprint capture command sent"),
        Err(e) => error!("Failed to capture fingerprint: {}", e),
    };

    match sensor.match_fingerprint() {
        Ok(user) => info!("Fingerprint matched with user ID {}", user),
        Err(e) => error!("Match operation failed: {}", e),
    };

    sensor.close();
    ExitCode::SUCCESS
}
