//! **id809-i2c** is a driver for the DFRobot ID809 capacitive fingerprint sensor on its I2C
//! interface.
//!
//! The sensor speaks a small command/response protocol: every operation writes one short
//! command frame and, for queries, reads back a fixed-length reply. The driver works over any
//! blocking `embedded-hal` I2C peripheral through [`HalBus`], or directly against a Linux
//! `/dev/i2c-<n>` device with the `rppal` feature.
//!
//! ## Example
//!
//! To set the security level and run a match:
//! ```
//! # use embedded_hal::blocking::i2c::{Read, Write};
//! use id809_i2c::{HalBus, SensorLink, DEFAULT_ADDRESS};
//! # struct TestI2c;
//! #
//! # impl Write for TestI2c {
//! #     type Error = ();
//! #     fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! # impl Read for TestI2c {
//! #     type Error = ();
//! #     fn read(&mut self, _address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
//! #         buffer.copy_from_slice(&[0x00, 0x2a][..buffer.len()]);
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = TestI2c;
//!
//! // Obtain i2c from some HAL implementation
//! let mut sensor = SensorLink::new(HalBus::new(i2c));
//! if let Err(error) = sensor.open(DEFAULT_ADDRESS) {
//!     panic!("Error: {}", error);
//! }
//! sensor.set_security_level(3).expect("failed to set security level");
//! match sensor.match_fingerprint() {
//!     Ok(user) => println!("Matched user {}", user),
//!     Err(error) => panic!("Error: {:#?}", error),
//! }
//! ```
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod commands;
mod driver;
mod error;
mod hal;
#[cfg(test)]
mod mock;
mod responses;
#[cfg(feature = "rppal")]
mod rpi;
mod transport;
mod utils;

pub use crate::commands::Command;
pub use crate::driver::{LinkError, SensorLink, DEFAULT_ADDRESS};
pub use crate::error::{ConnectError, OpError, TransportError};
pub use crate::hal::{HalBus, HalTransport, PeripheralInUse};
pub use crate::responses::{Reply, UserId};
#[cfg(feature = "rppal")]
pub use crate::rpi::{RppalBus, DEFAULT_BUS};
pub use crate::transport::{Bus, Transport};
pub use crate::utils::CommandFrame;
