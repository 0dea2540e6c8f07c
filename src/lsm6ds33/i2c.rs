// Copyright (c) 2026, the lsm6ds33_driver developers.
// This code is provided under the MIT license.

use crate::lsm6ds33::bits::{Ctrl3C, StatusReg};
use crate::lsm6ds33::AxisSet;
use crate::lsm6ds33::DataRate;
use crate::lsm6ds33::Registers;
use crate::lsm6ds33::{accel_scale_of, gyro_scale_of, temp_c};
use crate::lsm6ds33::{AccelHighPass, GyroHighPass};
use crate::lsm6ds33::{AccelScale, GyroScale};
use crate::lsm6ds33::{AllMeasurements, DataReady, LsmError, Measurement};
use crate::lsm6ds33::{AxisOrder, SignFlip};
use crate::lsm6ds33::{
    ACCEL_HPF_MASK, ACCEL_HPF_SHIFT, FS_MASK, FS_SHIFT, GYRO_HPF_MASK, GYRO_HPF_SHIFT,
    GYRO_ODR_MAX, I2C_ADDR_SA0_HIGH, I2C_ADDR_SA0_LOW, ODR_MASK, ODR_SHIFT, ORIENT_MASK,
    ORIENT_SIGN_SHIFT, WHO_AM_I_VAL,
};

#[cfg(feature = "defmt")]
use defmt::{Format, Formatter};

use embedded_hal::i2c::I2c;

#[derive(PartialEq)]
enum State {
    Uninitialized,
    Configured,
}

// In-memory image of the control registers the driver owns. Holds the
// power-on values until a write goes through.
#[derive(Clone, Copy)]
struct CtrlRegs {
    orient_cfg_g: u8,
    ctrl1_xl: u8,
    ctrl2_g: u8,
    ctrl3_c: u8,
    ctrl7_g: u8,
    ctrl8_xl: u8,
}

impl Default for CtrlRegs {
    fn default() -> Self {
        CtrlRegs {
            orient_cfg_g: 0x00,
            ctrl1_xl: 0x00,
            ctrl2_g: 0x00,
            ctrl3_c: 0b0000_0100, // IF_INC comes up set
            ctrl7_g: 0x00,
            ctrl8_xl: 0x00,
        }
    }
}

/// The LSM IMU struct is the base of the driver. Instantiate this struct in your application code
/// then use it to interact with the IMU.
///
/// The handle owns the bus and the current configuration snapshot. The snapshot only changes
/// after the matching register write succeeded, so the scale factors attached to measurements
/// always describe what the device is actually doing.
pub struct Lsm6ds33<BUS> {
    bus: BUS,
    addr: u8,
    state: State,
    regs: CtrlRegs,
    gyro_bias: [i16; 3],
}

impl<BUS> Lsm6ds33<BUS>
where
    BUS: I2c,
{
    /// Creates a new driver handle for a sensor with the SA0 pin strapped low (7-bit address 0x6A).
    ///
    /// No bus traffic happens here. Call [`Lsm6ds33::init`] to check the device identity and
    /// load the default configuration, or go straight to the `configure_*` family.
    pub fn new(bus: BUS) -> Self {
        Lsm6ds33 {
            bus,
            addr: I2C_ADDR_SA0_LOW,
            state: State::Uninitialized,
            regs: CtrlRegs::default(),
            gyro_bias: [0; 3],
        }
    }

    /// Moves the handle to the 7-bit address selected by a pulled-up SA0 pin (0x6B).
    pub fn with_sa0_high(mut self) -> Self {
        self.addr = I2C_ADDR_SA0_HIGH;
        self
    }

    /// Checks the device identity and loads the default configuration.
    ///
    /// Reads WHO_AM_I and fails with `BadDevice` if anything but 0x69 answers, then enables
    /// block data update and register auto-increment in CTRL3_C. Both sensors stay powered
    /// down until a data rate is configured.
    pub fn init(&mut self) -> Result<(), LsmError<BUS::Error>> {
        let id = self.who_am_i()?;
        if id != WHO_AM_I_VAL {
            return Err(LsmError::BadDevice(id));
        }

        let mut ctrl3 = Ctrl3C(0);
        ctrl3.set_bdu(true);
        ctrl3.set_if_inc(true);
        self.write_reg(Registers::Ctrl3C, ctrl3.0)?;

        self.regs.ctrl3_c = ctrl3.0;
        self.state = State::Configured;
        Ok(())
    }

    /// Who Am I? Reads the WHO_AM_I register and reports the value.
    ///
    /// Useful for testing that the IMU is properly connected. This part answers 0x69.
    pub fn who_am_i(&mut self) -> Result<u8, LsmError<BUS::Error>> {
        self.read_reg(Registers::WhoAmI)
    }

    // ----------------- Configuration ----------------- //

    /// Configures the full-scale range of both sensors.
    ///
    /// The range decides the weight of one raw count. Applied with a read-modify-write, so the
    /// data rates and every other CTRL1_XL/CTRL2_G bit stay untouched. See the data sheet for
    /// more details.
    pub fn configure_full_scale(
        &mut self,
        accel: AccelScale,
        gyro: GyroScale,
    ) -> Result<(), LsmError<BUS::Error>> {
        let mut cur = [0; 2];
        self.read_regs(Registers::Ctrl1Xl, &mut cur)?;

        let ctrl1 = (cur[0] & !FS_MASK) | ((accel.bits() << FS_SHIFT) & FS_MASK);
        let ctrl2 = (cur[1] & !FS_MASK) | ((gyro.bits() << FS_SHIFT) & FS_MASK);
        self.write_reg_pair(Registers::Ctrl1Xl, [ctrl1, ctrl2])?;

        self.regs.ctrl1_xl = ctrl1;
        self.regs.ctrl2_g = ctrl2;
        self.state = State::Configured;
        Ok(())
    }

    /// Configures the output data rate of both sensors, which doubles as their performance mode.
    ///
    /// `PowerDown` switches a sensor off. The gyroscope tops out at 1.66kHz; asking it for
    /// 3.33kHz or 6.66kHz fails with `InvalidOption` before any bus traffic.
    pub fn configure_performance_mode(
        &mut self,
        accel: DataRate,
        gyro: DataRate,
    ) -> Result<(), LsmError<BUS::Error>> {
        if gyro.bits() > GYRO_ODR_MAX {
            return Err(LsmError::InvalidOption);
        }

        let mut cur = [0; 2];
        self.read_regs(Registers::Ctrl1Xl, &mut cur)?;

        let ctrl1 = (cur[0] & !ODR_MASK) | ((accel.bits() << ODR_SHIFT) & ODR_MASK);
        let ctrl2 = (cur[1] & !ODR_MASK) | ((gyro.bits() << ODR_SHIFT) & ODR_MASK);
        self.write_reg_pair(Registers::Ctrl1Xl, [ctrl1, ctrl2])?;

        self.regs.ctrl1_xl = ctrl1;
        self.regs.ctrl2_g = ctrl2;
        self.state = State::Configured;
        Ok(())
    }

    /// Configures the high-pass stages of both sensors.
    ///
    /// The gyroscope filter sits on the output path and removes slow drift. The accelerometer
    /// slope filter cutoff follows its data rate. Only the filter fields of CTRL7_G and
    /// CTRL8_XL are touched. See the data sheet for more details.
    pub fn configure_filters(
        &mut self,
        gyro: GyroHighPass,
        accel: AccelHighPass,
    ) -> Result<(), LsmError<BUS::Error>> {
        let mut cur = [0; 2];
        self.read_regs(Registers::Ctrl7G, &mut cur)?;

        let ctrl7 = (cur[0] & !GYRO_HPF_MASK) | ((gyro.bits() << GYRO_HPF_SHIFT) & GYRO_HPF_MASK);
        let ctrl8 =
            (cur[1] & !ACCEL_HPF_MASK) | ((accel.bits() << ACCEL_HPF_SHIFT) & ACCEL_HPF_MASK);
        self.write_reg_pair(Registers::Ctrl7G, [ctrl7, ctrl8])?;

        self.regs.ctrl7_g = ctrl7;
        self.regs.ctrl8_xl = ctrl8;
        self.state = State::Configured;
        Ok(())
    }

    /// Configures the angular rate sign and axis order remap.
    ///
    /// `signs` negates the named axes and `order` permutes which axis lands in which output
    /// register. Read-modify-write on ORIENT_CFG_G; the bits above the remap field are
    /// preserved.
    pub fn configure_orientation(
        &mut self,
        signs: SignFlip,
        order: AxisOrder,
    ) -> Result<(), LsmError<BUS::Error>> {
        let cur = self.read_reg(Registers::OrientCfgG)?;

        let field = (signs.bits() << ORIENT_SIGN_SHIFT) | order.bits();
        let orient = (cur & !ORIENT_MASK) | (field & ORIENT_MASK);
        self.write_reg(Registers::OrientCfgG, orient)?;

        self.regs.orient_cfg_g = orient;
        self.state = State::Configured;
        Ok(())
    }

    // ----------------- Measurement ----------------- //

    /// Reads one three-axis sample from the selected sensor.
    ///
    /// Performs a single six-byte burst read over the output registers and reassembles the
    /// axes as little-endian signed 16-bit counts. Gyroscope reads subtract the stored bias
    /// reference. The returned sample carries the scale factor of the full-scale range it was
    /// captured under.
    ///
    /// Fails with `NotConfigured` until `init` or one of the `configure_*` calls succeeded.
    pub fn read_measure(&mut self, set: AxisSet) -> Result<Measurement, LsmError<BUS::Error>> {
        if self.state == State::Uninitialized {
            return Err(LsmError::NotConfigured);
        }

        let mut buf = [0; 6];
        match set {
            AxisSet::Accel => {
                self.read_regs(Registers::OutxLXl, &mut buf)?;
                Ok(Measurement {
                    raw: raw_triplet(&buf, [0; 3]),
                    scale: accel_scale_of(self.regs.ctrl1_xl),
                })
            }
            AxisSet::Gyro => {
                self.read_regs(Registers::OutxLG, &mut buf)?;
                Ok(Measurement {
                    raw: raw_triplet(&buf, self.gyro_bias),
                    scale: gyro_scale_of(self.regs.ctrl2_g),
                })
            }
        }
    }

    /// Reads temperature, gyroscope and accelerometer in one fourteen-byte burst.
    ///
    /// The output registers sit back to back starting at OUT_TEMP_L, so a single transaction
    /// captures a consistent snapshot of everything the part measures.
    ///
    /// Fails with `NotConfigured` until `init` or one of the `configure_*` calls succeeded.
    pub fn read_all_measure(&mut self) -> Result<AllMeasurements, LsmError<BUS::Error>> {
        if self.state == State::Uninitialized {
            return Err(LsmError::NotConfigured);
        }

        let mut buf = [0; 14];
        self.read_regs(Registers::OutTempL, &mut buf)?;

        Ok(AllMeasurements {
            accel: Measurement {
                raw: raw_triplet(&buf[8..14], [0; 3]),
                scale: accel_scale_of(self.regs.ctrl1_xl),
            },
            gyro: Measurement {
                raw: raw_triplet(&buf[2..8], self.gyro_bias),
                scale: gyro_scale_of(self.regs.ctrl2_g),
            },
            temp: temp_c(i16::from_le_bytes([buf[0], buf[1]])),
        })
    }

    /// Reads the temperature sensor.
    ///
    /// Returns the die temperature in Celsius. The sensor counts 16 LSB per degree around 25C.
    ///
    /// Fails with `NotConfigured` until `init` or one of the `configure_*` calls succeeded.
    pub fn read_temp(&mut self) -> Result<f32, LsmError<BUS::Error>> {
        if self.state == State::Uninitialized {
            return Err(LsmError::NotConfigured);
        }

        let mut buf = [0; 2];
        self.read_regs(Registers::OutTempL, &mut buf)?;
        Ok(temp_c(i16::from_le_bytes([buf[0], buf[1]])))
    }

    /// Decodes the status register into data-ready flags.
    ///
    /// Works in any state and does not consume the output registers, so it can pace a polling
    /// loop.
    pub fn data_ready(&mut self) -> Result<DataReady, LsmError<BUS::Error>> {
        let status = StatusReg(self.read_reg(Registers::StatusReg)?);
        Ok(DataReady {
            accel: status.xlda(),
            gyro: status.gda(),
            temp: status.tda(),
        })
    }

    // ----------------- Calibration ----------------- //

    /// Measures the gyroscope bias and stores it as the reference for later reads.
    ///
    /// Averages `samples` raw readings while the device sits still, pacing itself on the
    /// data-ready flag, and keeps the result as the bias that every later gyroscope read
    /// subtracts. The gyroscope must be running: a power-down data rate would never flag data
    /// and fails with `InvalidOption`, as does `samples == 0`.
    pub fn calibrate_gyro(&mut self, samples: u16) -> Result<(), LsmError<BUS::Error>> {
        if self.state == State::Uninitialized {
            return Err(LsmError::NotConfigured);
        }
        if samples == 0 || self.regs.ctrl2_g & ODR_MASK == 0 {
            return Err(LsmError::InvalidOption);
        }

        let mut sum = [0i32; 3];
        for _ in 0..samples {
            while !self.data_ready()?.gyro {}

            let mut buf = [0; 6];
            self.read_regs(Registers::OutxLG, &mut buf)?;
            let raw = raw_triplet(&buf, [0; 3]);
            sum[0] += raw[0] as i32;
            sum[1] += raw[1] as i32;
            sum[2] += raw[2] as i32;
        }

        self.gyro_bias = [
            (sum[0] / samples as i32) as i16,
            (sum[1] / samples as i32) as i16,
            (sum[2] / samples as i32) as i16,
        ];
        Ok(())
    }

    /// The stored gyroscope bias in raw counts.
    pub fn gyro_bias(&self) -> [i16; 3] {
        self.gyro_bias
    }

    /// Replaces the stored gyroscope bias with a known one, in raw counts.
    pub fn set_gyro_bias(&mut self, bias: [i16; 3]) {
        self.gyro_bias = bias;
    }

    // ----------------- Reset ----------------- //

    /// Resets the device and the driver state.
    ///
    /// Sets the self-clearing SW_RESET bit, which restores the device registers to their
    /// power-on values, then rolls the snapshot and the bias reference back to match. The
    /// handle returns to the unconfigured state, so reads fail with `NotConfigured` until it
    /// is configured again.
    pub fn reset(&mut self) -> Result<(), LsmError<BUS::Error>> {
        let mut ctrl3 = Ctrl3C(0);
        ctrl3.set_sw_reset(true);
        self.write_reg(Registers::Ctrl3C, ctrl3.0)?;

        self.regs = CtrlRegs::default();
        self.gyro_bias = [0; 3];
        self.state = State::Uninitialized;
        Ok(())
    }

    /// Checks if the device has been configured. Returns true once `init` or any `configure_*`
    /// call succeeded, and false again after `reset`.
    pub fn is_configured(&self) -> bool {
        self.state == State::Configured
    }

    /// Releases the bus.
    pub fn destroy(self) -> BUS {
        self.bus
    }

    // ----------------- Bus transport ----------------- //

    fn write_reg(&mut self, reg: Registers, byte: u8) -> Result<(), LsmError<BUS::Error>> {
        self.bus.write(self.addr, &[reg.addr(), byte])?;
        Ok(())
    }

    // One transaction for two neighbouring registers; IF_INC advances the
    // register address after the first data byte.
    fn write_reg_pair(
        &mut self,
        reg: Registers,
        bytes: [u8; 2],
    ) -> Result<(), LsmError<BUS::Error>> {
        self.bus.write(self.addr, &[reg.addr(), bytes[0], bytes[1]])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: Registers) -> Result<u8, LsmError<BUS::Error>> {
        let mut buf = [0];
        self.bus.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(buf[0])
    }

    fn read_regs(&mut self, reg: Registers, buf: &mut [u8]) -> Result<(), LsmError<BUS::Error>> {
        self.bus.write_read(self.addr, &[reg.addr()], buf)?;
        Ok(())
    }
}

// Bias removal clamps at the rails so a railed sample keeps its sign.
fn raw_triplet(buf: &[u8], bias: [i16; 3]) -> [i16; 3] {
    [
        i16::from_le_bytes([buf[0], buf[1]]).saturating_sub(bias[0]),
        i16::from_le_bytes([buf[2], buf[3]]).saturating_sub(bias[1]),
        i16::from_le_bytes([buf[4], buf[5]]).saturating_sub(bias[2]),
    ]
}

#[cfg(feature = "defmt")]
impl<BUS> Format for Lsm6ds33<BUS> {
    fn format(&self, fmt: Formatter) {
        defmt::write!(fmt, "LSM6DS33 IMU")
    }
}
