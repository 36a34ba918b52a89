//! Hardware access shim.
//!
//! Thin free-function layer over the Raspberry Pi GPIO header and the
//! ADS1115 ADC, called by the sensor and motor drivers.
//!
//! ## Dual-target design
//!
//! - **`feature = "rpi-hw"`** — real access via `rppal` (GPIO pins,
//!   software PWM on the enable pin, I2C transactions to the ADC).
//! - **otherwise** — an in-memory simulation backed by atomics, so the
//!   whole crate builds, runs, and tests on any host.  Tests inject ADC
//!   values and failures through the `sim_*` helpers.

use crate::error::{ActuatorFault, Error, SensorFault};
#[cfg(feature = "rpi-hw")]
use crate::pins;

// ---------------------------------------------------------------------------
// Simulation backend
// ---------------------------------------------------------------------------

#[cfg(not(feature = "rpi-hw"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU16, AtomicU32};

    pub static ADC: [AtomicU16; 2] = [AtomicU16::new(0), AtomicU16::new(0)];
    pub static ADC_FAIL: AtomicBool = AtomicBool::new(false);
    /// One bit per BCM pin number.
    pub static PIN_MASK: AtomicU32 = AtomicU32::new(0);
    pub static PWM_DUTY: AtomicU8 = AtomicU8::new(0);
    pub static PWM_FAIL: AtomicBool = AtomicBool::new(false);
}

#[cfg(not(feature = "rpi-hw"))]
use core::sync::atomic::Ordering;

/// Inject a raw ADC conversion for a channel (test/simulation hook).
#[cfg(not(feature = "rpi-hw"))]
pub fn sim_set_adc(channel: u8, raw: u16) {
    if let Some(cell) = sim::ADC.get(channel as usize) {
        cell.store(raw, Ordering::Relaxed);
    }
}

/// Make every subsequent ADC read fail (test/simulation hook).
#[cfg(not(feature = "rpi-hw"))]
pub fn sim_inject_adc_failure(fail: bool) {
    sim::ADC_FAIL.store(fail, Ordering::Relaxed);
}

/// Current simulated level of a GPIO pin.
#[cfg(not(feature = "rpi-hw"))]
pub fn sim_pin_is_high(pin: u8) -> bool {
    sim::PIN_MASK.load(Ordering::Relaxed) & (1 << u32::from(pin)) != 0
}

/// Current simulated PWM duty cycle (percent).
#[cfg(not(feature = "rpi-hw"))]
pub fn sim_pwm_duty() -> u8 {
    sim::PWM_DUTY.load(Ordering::Relaxed)
}

/// Make every subsequent PWM write fail (test/simulation hook).
#[cfg(not(feature = "rpi-hw"))]
pub fn sim_inject_pwm_failure(fail: bool) {
    sim::PWM_FAIL.store(fail, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Real backend (Raspberry Pi)
// ---------------------------------------------------------------------------

#[cfg(feature = "rpi-hw")]
mod real {
    use std::sync::{Mutex, OnceLock};

    use rppal::gpio::{Gpio, OutputPin};
    use rppal::i2c::I2c;

    use crate::pins;

    pub struct Peripherals {
        pub in1: OutputPin,
        pub in2: OutputPin,
        pub en: OutputPin,
        pub adc: I2c,
    }

    pub static HW: OnceLock<Mutex<Peripherals>> = OnceLock::new();

    pub fn open() -> Result<Peripherals, &'static str> {
        let gpio = Gpio::new().map_err(|_| "GPIO open failed")?;
        let in1 = gpio
            .get(pins::MOTOR_IN1_GPIO)
            .map_err(|_| "IN1 pin unavailable")?
            .into_output_low();
        let in2 = gpio
            .get(pins::MOTOR_IN2_GPIO)
            .map_err(|_| "IN2 pin unavailable")?
            .into_output_low();
        let en = gpio
            .get(pins::MOTOR_EN_GPIO)
            .map_err(|_| "EN pin unavailable")?
            .into_output_low();
        let mut adc = I2c::new().map_err(|_| "I2C open failed")?;
        adc.set_slave_address(pins::ADC_I2C_ADDR)
            .map_err(|_| "ADC address unreachable")?;
        Ok(Peripherals { in1, in2, en, adc })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// One-shot peripheral bring-up.  Called once from `main()` before the
/// control loop starts; the motor is left de-energised.
#[cfg(feature = "rpi-hw")]
pub fn init_peripherals() -> Result<(), Error> {
    let peripherals = real::open().map_err(Error::Init)?;
    real::HW
        .set(std::sync::Mutex::new(peripherals))
        .map_err(|_| Error::Init("peripherals already initialised"))?;
    log::info!("hal: GPIO + ADC configured");
    Ok(())
}

/// One-shot peripheral bring-up (simulation: nothing to do).
#[cfg(not(feature = "rpi-hw"))]
pub fn init_peripherals() -> Result<(), Error> {
    log::info!("hal(sim): peripheral init skipped");
    Ok(())
}

/// Read one ADS1115 channel, single-shot.
#[cfg(feature = "rpi-hw")]
pub fn adc_read(channel: u8) -> Result<u16, SensorFault> {
    let lock = real::HW.get().ok_or(SensorFault::AdcReadFailed)?;
    let mut hw = lock.lock().map_err(|_| SensorFault::AdcReadFailed)?;

    // Config register: start single conversion, single-ended MUX for the
    // channel, ±4.096 V, single-shot, 128 SPS, comparator disabled.
    let mux = 0b100 | (channel & 0b11);
    let config: u16 =
        (1 << 15) | (u16::from(mux) << 12) | (0b001 << 9) | (1 << 8) | (0b100 << 5) | 0b11;
    hw.adc
        .write(&[0x01, (config >> 8) as u8, (config & 0xFF) as u8])
        .map_err(|_| SensorFault::AdcReadFailed)?;

    // 128 SPS → one conversion takes ~8 ms.
    std::thread::sleep(std::time::Duration::from_millis(9));

    hw.adc.write(&[0x00]).map_err(|_| SensorFault::AdcReadFailed)?;
    let mut buf = [0u8; 2];
    hw.adc.read(&mut buf).map_err(|_| SensorFault::AdcReadFailed)?;
    let raw = i16::from_be_bytes(buf);
    Ok(raw.max(0) as u16)
}

/// Read one ADC channel (simulation: injected value).
#[cfg(not(feature = "rpi-hw"))]
pub fn adc_read(channel: u8) -> Result<u16, SensorFault> {
    if sim::ADC_FAIL.load(Ordering::Relaxed) {
        return Err(SensorFault::AdcReadFailed);
    }
    sim::ADC
        .get(channel as usize)
        .map(|cell| cell.load(Ordering::Relaxed))
        .ok_or(SensorFault::AdcReadFailed)
}

/// Drive a direction pin high or low.
#[cfg(feature = "rpi-hw")]
pub fn gpio_write(pin: u8, high: bool) -> Result<(), ActuatorFault> {
    let lock = real::HW.get().ok_or(ActuatorFault::GpioWriteFailed)?;
    let mut hw = lock.lock().map_err(|_| ActuatorFault::GpioWriteFailed)?;
    let target = match pin {
        pins::MOTOR_IN1_GPIO => &mut hw.in1,
        pins::MOTOR_IN2_GPIO => &mut hw.in2,
        _ => return Err(ActuatorFault::GpioWriteFailed),
    };
    if high {
        target.set_high();
    } else {
        target.set_low();
    }
    Ok(())
}

/// Drive a direction pin (simulation: bitmask).
#[cfg(not(feature = "rpi-hw"))]
pub fn gpio_write(pin: u8, high: bool) -> Result<(), ActuatorFault> {
    let bit = 1u32 << u32::from(pin);
    if high {
        sim::PIN_MASK.fetch_or(bit, Ordering::Relaxed);
    } else {
        sim::PIN_MASK.fetch_and(!bit, Ordering::Relaxed);
    }
    Ok(())
}

/// Set the motor enable duty cycle (percent, caller pre-clamps).
#[cfg(feature = "rpi-hw")]
pub fn pwm_set_duty(percent: u8) -> Result<(), ActuatorFault> {
    let lock = real::HW.get().ok_or(ActuatorFault::PwmWriteFailed)?;
    let mut hw = lock.lock().map_err(|_| ActuatorFault::PwmWriteFailed)?;
    hw.en
        .set_pwm_frequency(pins::MOTOR_PWM_FREQ_HZ, f64::from(percent) / 100.0)
        .map_err(|_| ActuatorFault::PwmWriteFailed)
}

/// Set the motor enable duty cycle (simulation).
#[cfg(not(feature = "rpi-hw"))]
pub fn pwm_set_duty(percent: u8) -> Result<(), ActuatorFault> {
    if sim::PWM_FAIL.load(Ordering::Relaxed) {
        return Err(ActuatorFault::PwmWriteFailed);
    }
    sim::PWM_DUTY.store(percent, Ordering::Relaxed);
    Ok(())
}
