// Copyright (c) 2026, the lsm6ds33_driver developers.
// This code is provided under the MIT license.

/// The i2c module holds all of the driver implementations when using an I2C bus to communicate with the device
pub mod i2c;

/// Bit-field views of the control and status registers used by the driver
pub mod bits;

#[cfg(feature = "defmt")]
use defmt::{Format, Formatter};

const I2C_ADDR_SA0_LOW: u8 = 0x6A;
const I2C_ADDR_SA0_HIGH: u8 = 0x6B;

const WHO_AM_I_VAL: u8 = 0x69;

// Full-scale tables, indexed by the register code of the FS field.
const ACCEL_FS_G: [f32; 4] = [2.0, 16.0, 4.0, 8.0];
const GYRO_FS_DPS: [f32; 4] = [250.0, 500.0, 1000.0, 2000.0];
const SCALE_DIVISOR: f32 = 32_768.0;

// 16 LSB per degree Celsius, zero count at 25 C.
const TEMP_SEN: f32 = 16.0;
const TEMP_OFFSET: f32 = 25.0;

// CTRL1_XL / CTRL2_G share one layout: ODR in [7:4], full-scale in [3:2].
const ODR_MASK: u8 = 0b1111_0000;
const ODR_SHIFT: u8 = 4;
const FS_MASK: u8 = 0b0000_1100;
const FS_SHIFT: u8 = 2;

// ORIENT_CFG_G: axis signs in [5:3], axis order in [2:0].
const ORIENT_MASK: u8 = 0b0011_1111;
const ORIENT_SIGN_SHIFT: u8 = 3;

// CTRL7_G: HP_G_EN in [6], HPCF_G in [5:4]. CTRL8_XL: HPCF_XL in [6:5].
const GYRO_HPF_MASK: u8 = 0b0111_0000;
const GYRO_HPF_SHIFT: u8 = 4;
const ACCEL_HPF_MASK: u8 = 0b0110_0000;
const ACCEL_HPF_SHIFT: u8 = 5;

// The gyro output data rate stops at 1.66kHz, two codes below the accelerometer.
const GYRO_ODR_MAX: u8 = 0b1000;

/// Accelerometer full-scale options as specified in the data sheet, in g.
///
/// The full-scale decides how many g one raw count represents, so larger
/// ranges trade resolution for reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelScale {
    /// +/- 2g
    Fs2g,
    /// +/- 4g
    Fs4g,
    /// +/- 8g
    Fs8g,
    /// +/- 16g
    Fs16g,
}

/// Gyroscope full-scale options as specified in the data sheet, in degrees per second (dps).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroScale {
    /// +/- 250 dps
    Dps250,
    /// +/- 500 dps
    Dps500,
    /// +/- 1000 dps
    Dps1000,
    /// +/- 2000 dps
    Dps2000,
}

/// Output data rate options shared by the accelerometer and the gyroscope.
///
/// The data rate doubles as the power mode on this part: `PowerDown` switches
/// the sensor off, the low rates run it in low-power mode and the high rates
/// in high-performance mode. The two highest rates exist for the
/// accelerometer only; asking the gyroscope for them is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// Sensor off
    PowerDown,
    /// 12.5 Hz
    Hz12_5,
    /// 26 Hz
    Hz26,
    /// 52 Hz
    Hz52,
    /// 104 Hz
    Hz104,
    /// 208 Hz
    Hz208,
    /// 416 Hz
    Hz416,
    /// 833 Hz
    Hz833,
    /// 1.66 kHz
    Hz1660,
    /// 3.33 kHz, accelerometer only
    Hz3330,
    /// 6.66 kHz, accelerometer only
    Hz6660,
}

/// Gyroscope high-pass filter options as specified in the data sheet.
///
/// The cutoff frequencies are fixed; pick `Disabled` to bypass the filter
/// entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroHighPass {
    /// Filter bypassed
    Disabled,
    /// 0.0081 Hz cutoff
    Hz0_0081,
    /// 0.0324 Hz cutoff
    Hz0_0324,
    /// 2.07 Hz cutoff
    Hz2_07,
    /// 16.32 Hz cutoff
    Hz16_32,
}

/// Accelerometer slope filter options as specified in the data sheet.
///
/// The cutoff scales with the accelerometer output data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelHighPass {
    /// Cutoff at ODR / 50
    OdrDiv50,
    /// Cutoff at ODR / 100
    OdrDiv100,
    /// Cutoff at ODR / 9
    OdrDiv9,
    /// Cutoff at ODR / 400
    OdrDiv400,
}

/// Axis output orders for the orientation remap.
///
/// The first letter names the axis reported in the X position, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisOrder {
    /// X, Y, Z (the wiring on the package)
    Xyz,
    /// X, Z, Y
    Xzy,
    /// Y, X, Z
    Yxz,
    /// Y, Z, X
    Yzx,
    /// Z, X, Y
    Zxy,
    /// Z, Y, X
    Zyx,
}

/// Axis sign flips for the orientation remap.
///
/// Each named axis has its sign negated; the rest keep the package polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignFlip {
    /// No axis negated
    None,
    /// Z negated
    Z,
    /// Y negated
    Y,
    /// Y and Z negated
    Yz,
    /// X negated
    X,
    /// X and Z negated
    Xz,
    /// X and Y negated
    Xy,
    /// All three axes negated
    Xyz,
}

/// Selects which sensor a triplet read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisSet {
    /// The accelerometer output registers
    Accel,
    /// The gyroscope output registers
    Gyro,
}

impl AccelScale {
    /// Returns the two-bit register code of this range, as written into CTRL1_XL\[3:2\].
    pub fn bits(self) -> u8 {
        match self {
            AccelScale::Fs2g => 0b00,
            AccelScale::Fs16g => 0b01,
            AccelScale::Fs4g => 0b10,
            AccelScale::Fs8g => 0b11,
        }
    }
}

impl GyroScale {
    /// Returns the two-bit register code of this range, as written into CTRL2_G\[3:2\].
    pub fn bits(self) -> u8 {
        match self {
            GyroScale::Dps250 => 0b00,
            GyroScale::Dps500 => 0b01,
            GyroScale::Dps1000 => 0b10,
            GyroScale::Dps2000 => 0b11,
        }
    }
}

impl DataRate {
    /// Returns the four-bit register code of this rate, as written into the ODR field.
    pub fn bits(self) -> u8 {
        match self {
            DataRate::PowerDown => 0b0000,
            DataRate::Hz12_5 => 0b0001,
            DataRate::Hz26 => 0b0010,
            DataRate::Hz52 => 0b0011,
            DataRate::Hz104 => 0b0100,
            DataRate::Hz208 => 0b0101,
            DataRate::Hz416 => 0b0110,
            DataRate::Hz833 => 0b0111,
            DataRate::Hz1660 => 0b1000,
            DataRate::Hz3330 => 0b1001,
            DataRate::Hz6660 => 0b1010,
        }
    }
}

impl GyroHighPass {
    /// Returns the three-bit field value (HP_G_EN plus HPCF_G) for CTRL7_G\[6:4\].
    pub fn bits(self) -> u8 {
        match self {
            GyroHighPass::Disabled => 0b000,
            GyroHighPass::Hz0_0081 => 0b100,
            GyroHighPass::Hz0_0324 => 0b101,
            GyroHighPass::Hz2_07 => 0b110,
            GyroHighPass::Hz16_32 => 0b111,
        }
    }
}

impl AccelHighPass {
    /// Returns the two-bit HPCF_XL code for CTRL8_XL\[6:5\].
    pub fn bits(self) -> u8 {
        match self {
            AccelHighPass::OdrDiv50 => 0b00,
            AccelHighPass::OdrDiv100 => 0b01,
            AccelHighPass::OdrDiv9 => 0b10,
            AccelHighPass::OdrDiv400 => 0b11,
        }
    }
}

impl AxisOrder {
    /// Returns the three-bit order code for ORIENT_CFG_G\[2:0\].
    pub fn bits(self) -> u8 {
        match self {
            AxisOrder::Xyz => 0b000,
            AxisOrder::Xzy => 0b001,
            AxisOrder::Yxz => 0b010,
            AxisOrder::Yzx => 0b011,
            AxisOrder::Zxy => 0b100,
            AxisOrder::Zyx => 0b101,
        }
    }
}

impl SignFlip {
    /// Returns the three-bit sign code (X, Y, Z) for ORIENT_CFG_G\[5:3\].
    pub fn bits(self) -> u8 {
        match self {
            SignFlip::None => 0b000,
            SignFlip::Z => 0b001,
            SignFlip::Y => 0b010,
            SignFlip::Yz => 0b011,
            SignFlip::X => 0b100,
            SignFlip::Xz => 0b101,
            SignFlip::Xy => 0b110,
            SignFlip::Xyz => 0b111,
        }
    }
}

/// One three-axis sample, tagged with the scale factor that was active when
/// it was captured.
///
/// The raw counts stay available so bias math or logging can work on
/// integers; the axis accessors apply the captured scale and return physical
/// units (g for the accelerometer, dps for the gyroscope).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    raw: [i16; 3],
    scale: f32,
}

impl Measurement {
    /// Scaled X axis value in physical units.
    pub fn x(&self) -> f32 {
        self.raw[0] as f32 * self.scale
    }

    /// Scaled Y axis value in physical units.
    pub fn y(&self) -> f32 {
        self.raw[1] as f32 * self.scale
    }

    /// Scaled Z axis value in physical units.
    pub fn z(&self) -> f32 {
        self.raw[2] as f32 * self.scale
    }

    /// The raw signed counts in X, Y, Z order.
    pub fn raw(&self) -> [i16; 3] {
        self.raw
    }

    /// The scale factor (physical units per count) captured with this sample.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Everything the part measures, captured in one burst read.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllMeasurements {
    /// Accelerometer sample
    pub accel: Measurement,
    /// Gyroscope sample
    pub gyro: Measurement,
    /// Die temperature in degrees Celsius
    pub temp: f32,
}

/// Data-ready flags decoded from the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataReady {
    /// A new accelerometer sample is waiting
    pub accel: bool,
    /// A new gyroscope sample is waiting
    pub gyro: bool,
    /// A new temperature sample is waiting
    pub temp: bool,
}

/// The possible errors that the driver can return.
///
/// The `BusError` option is for when a HAL function using the I2C bus fails.
/// This may be caused by a number of reasons. For example, a sensor strapped
/// to the other 7-bit address will not acknowledge and causes a bus error.
///
/// `InvalidOption` is for configuration values that have no register
/// encoding on the targeted sensor, `NotConfigured` for measurement calls on
/// a handle that has not been configured yet, and `BadDevice` carries the
/// identity byte that an `init` read instead of the expected `0x69`.
#[derive(Debug, PartialEq)]
pub enum LsmError<E> {
    /// An error occurred when using the bus
    BusError(E),
    /// The requested configuration has no register encoding
    InvalidOption,
    /// A measurement was requested before any configuration step
    NotConfigured,
    /// The WHO_AM_I register answered with the wrong identity
    BadDevice(u8),
}

impl<E> From<E> for LsmError<E> {
    fn from(error: E) -> Self {
        LsmError::BusError(error)
    }
}

#[cfg(feature = "defmt")]
impl<E> Format for LsmError<E> {
    fn format(&self, fmt: Formatter) {
        match *self {
            LsmError::BusError(_) => defmt::write!(fmt, "Bus error!"),
            LsmError::InvalidOption => defmt::write!(fmt, "Option has no register encoding!"),
            LsmError::NotConfigured => defmt::write!(fmt, "Device not configured yet!"),
            LsmError::BadDevice(id) => defmt::write!(fmt, "Wrong WHO_AM_I response: {=u8:x}", id),
        }
    }
}

// Registers the driver addresses directly. CTRL2_G (0x11) and CTRL8_XL
// (0x17) are only ever reached through auto-increment from their pair
// partner, so they carry no entry here.
#[derive(Clone, Copy)]
enum Registers {
    OrientCfgG,
    WhoAmI,
    Ctrl1Xl,
    Ctrl3C,
    Ctrl7G,
    StatusReg,
    OutTempL,
    OutxLG,
    OutxLXl,
}

impl Registers {
    fn addr(self) -> u8 {
        match self {
            Registers::OrientCfgG => 0x0B,
            Registers::WhoAmI => 0x0F,
            Registers::Ctrl1Xl => 0x10,
            Registers::Ctrl3C => 0x12,
            Registers::Ctrl7G => 0x16,
            Registers::StatusReg => 0x1E,
            Registers::OutTempL => 0x20,
            Registers::OutxLG => 0x22,
            Registers::OutxLXl => 0x28,
        }
    }
}

fn accel_scale_of(ctrl1_xl: u8) -> f32 {
    ACCEL_FS_G[((ctrl1_xl & FS_MASK) >> FS_SHIFT) as usize] / SCALE_DIVISOR
}

fn gyro_scale_of(ctrl2_g: u8) -> f32 {
    GYRO_FS_DPS[((ctrl2_g & FS_MASK) >> FS_SHIFT) as usize] / SCALE_DIVISOR
}

fn temp_c(raw: i16) -> f32 {
    raw as f32 / TEMP_SEN + TEMP_OFFSET
}
