// Copyright (c) 2026, the lsm6ds33_driver developers.
// This code is provided under the MIT license.

use bitfield::bitfield;

bitfield! {
    /// bitfields of CTRL3_C register
    pub struct Ctrl3C(u8);
    impl Debug;
    /// reboot memory content
    pub boot, set_boot: 7;
    /// block data update: output registers hold still between reads of a sample pair
    pub bdu, set_bdu: 6;
    /// interrupt pads are active low when set
    pub h_lactive, set_h_lactive: 5;
    /// open drain on the interrupt pads instead of push-pull
    pub pp_od, set_pp_od: 4;
    /// SPI interface mode selection
    pub sim, set_sim: 3;
    /// automatic register address increment during multi-byte access
    pub if_inc, set_if_inc: 2;
    /// big endian data selection
    pub ble, set_ble: 1;
    /// software reset, self-clearing
    pub sw_reset, set_sw_reset: 0;
}

bitfield! {
    /// bitfields of STATUS_REG register
    pub struct StatusReg(u8);
    impl Debug;
    /// new temperature data available
    pub tda, set_tda: 2;
    /// new gyroscope data available
    pub gda, set_gda: 1;
    /// new accelerometer data available
    pub xlda, set_xlda: 0;
}
