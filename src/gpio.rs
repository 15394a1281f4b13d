//! GPIO feature contract (§4.4 override table, §6 GPIO collaborator): real
//! time clock, gyro, rumble, and light sensor lines multiplexed onto the
//! cartridge's GPIO data register. Protocol emulation is out of scope; this
//! module carries the feature mask and the init calls the override table
//! fires.

use bitflags::bitflags;

bitflags! {
    /// Which GPIO-attached devices a cartridge exposes, decided by the
    /// override table (§4.4) since the ROM header alone can't say.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct GpioFeatures: u8 {
        const RTC = 0b0001;
        const GYRO = 0b0010;
        const RUMBLE = 0b0100;
        const LIGHT_SENSOR = 0b1000;
    }
}

/// What the lifecycle manager needs from the GPIO collaborator: one-shot
/// initializers fired per matched feature bit, in RTC, gyro, rumble order
/// (the light sensor has no initializer in the source table and is
/// represented here only as a feature bit).
pub trait GpioCollaborator {
    fn init_rtc(&mut self);
    fn init_gyro(&mut self);
    fn init_rumble(&mut self);
}

/// A minimal in-core stand-in recording which devices were armed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GpioStub {
    pub armed: GpioFeatures,
}

impl GpioCollaborator for GpioStub {
    fn init_rtc(&mut self) {
        self.armed |= GpioFeatures::RTC;
    }

    fn init_gyro(&mut self) {
        self.armed |= GpioFeatures::GYRO;
    }

    fn init_rumble(&mut self) {
        self.armed |= GpioFeatures::RUMBLE;
    }
}

/// Apply an override table hit's GPIO mask to a collaborator, in the
/// fixed RTC/gyro/rumble order the source checks them in. The light sensor
/// bit is intentionally not wired to any initializer (§4.4 Non-goals).
pub fn apply_features(collaborator: &mut dyn GpioCollaborator, features: GpioFeatures) {
    if features.contains(GpioFeatures::RTC) {
        collaborator.init_rtc();
    }
    if features.contains(GpioFeatures::GYRO) {
        collaborator.init_gyro();
    }
    if features.contains(GpioFeatures::RUMBLE) {
        collaborator.init_rumble();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_features_skips_light_sensor_initializer() {
        let mut stub = GpioStub::default();
        apply_features(&mut stub, GpioFeatures::RTC | GpioFeatures::LIGHT_SENSOR);
        assert_eq!(stub.armed, GpioFeatures::RTC);
    }

    #[test]
    fn apply_features_arms_all_three_initializable_devices() {
        let mut stub = GpioStub::default();
        apply_features(&mut stub, GpioFeatures::RTC | GpioFeatures::GYRO | GpioFeatures::RUMBLE);
        assert_eq!(stub.armed, GpioFeatures::RTC | GpioFeatures::GYRO | GpioFeatures::RUMBLE);
    }
}
