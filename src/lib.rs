// Copyright (c) 2026, the lsm6ds33_driver developers.
// This code is provided under the MIT license.

//! Device agnostic driver for the ST LSM6DS33 IMU (inertial measurement unit).
//! The driver depends on embedded-hal, so as long as the HAL you use implements those traits, then
//! this driver should be compatible.
//!
//! The data sheet for this device can be found [here](https://www.st.com/resource/en/datasheet/lsm6ds33.pdf).
//!
//! The sensor speaks I2C over one of two 7-bit addresses, picked by the SA0 strap pin. Construct
//! the driver with [`lsm6ds33::i2c::Lsm6ds33::new`] for SA0 low, or chain
//! [`lsm6ds33::i2c::Lsm6ds33::with_sa0_high`] when the pin is pulled up.
//!
//! The driver is blocking and owns the bus it is given. You can instantiate multiple objects if
//! you have multiple IMUs; if other devices share the bus, use something like shared-bus and hand
//! each driver its own proxy.
//!
//! Measurements come back as raw signed 16-bit counts together with the scale factor that was
//! active when they were captured, so late conversion to g / dps stays honest even if the
//! configuration changes afterwards.
//!
//! Currently there is no support for the FIFO, the hardware interrupts, or the embedded
//! functions (tap, tilt, pedometer). The register plumbing for those is straightforward to add
//! on top of what is here.
//!
//! The github repo can be found [here](https://github.com/lsm6ds33-rs/lsm6ds33_driver).

#![deny(missing_docs)]
#![no_std]

/// Main module that holds the I2C sub module.
/// Also holds many enums and constants used throughout the driver.
pub mod lsm6ds33;
