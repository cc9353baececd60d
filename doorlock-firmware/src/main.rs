//! Doorlock - Motorized Door Lock Firmware
//!
//! Main firmware binary for STM32F411RE-based lock controllers.
//! A DC motor drives the bolt; the door opens on a serial command, a
//! joystick-entered code or a manual button, and closes again on its own
//! after a hold window.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Input, Level, Output, OutputOpenDrain, OutputType, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::USART6;
use embassy_stm32::time::{hz, khz, Hertz};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::Channel;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use doorlock_core::input::Debouncer;
use doorlock_core::DoorController;
use doorlock_drivers::display::OledDisplay;
use doorlock_drivers::motor::HBridgeMotor;
use doorlock_drivers::sensor::Dht22;

use crate::board::{LedBus, PwmBuzzer};
use crate::tasks::controller::{Buttons, ControlLoop};
use crate::tasks::joystick::JoystickAxes;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    USART6 => usart::BufferedInterruptHandler<USART6>;
});

/// Serial link speed
const SERIAL_BAUD: u32 = 9600;

/// Motor PWM carrier frequency
const MOTOR_PWM_KHZ: u32 = 20;

/// Time for the sensor and joystick to settle before calibration
const BOOT_SETTLE_MS: u64 = 2000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Doorlock firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Motor: PWM on PA8 (TIM1_CH1), direction on PC8
    let motor_pwm = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new(p.PA8, OutputType::PushPull)),
        None,
        None,
        None,
        khz(MOTOR_PWM_KHZ),
        CountingMode::EdgeAlignedUp,
    );
    let mut motor_channel = motor_pwm.split().ch1;
    motor_channel.set_duty_cycle_fully_off();
    motor_channel.enable();
    let motor_dir = Output::new(p.PC8, Level::Low, Speed::Low);

    let motor = match HBridgeMotor::new(motor_channel, motor_dir, Delay) {
        Ok(motor) => motor,
        Err(e) => {
            // embassy-stm32 PWM and GPIO outputs are infallible
            defmt::panic!("Motor init failed: {:?}", e);
        }
    };
    info!("Motor initialized");

    // Buzzer on PC9 (TIM3_CH4); frequency is set per note
    let buzzer_pwm = SimplePwm::new(
        p.TIM3,
        None,
        None,
        None,
        Some(PwmPin::new(p.PC9, OutputType::PushPull)),
        hz(261),
        CountingMode::EdgeAlignedUp,
    );
    let buzzer = PwmBuzzer::new(buzzer_pwm, Channel::Ch4);

    // Status LEDs: red PA4, green PA10
    let leds = LedBus::new(
        Output::new(p.PA4, Level::Low, Speed::Low),
        Output::new(p.PA10, Level::Low, Speed::Low),
    );

    // Buttons: active low with pull-ups
    let buttons = Buttons {
        button1: Input::new(p.PC10, Pull::Up),
        button2: Input::new(p.PB7, Pull::Up),
    };

    // OLED on I2C1 (PB8=SCL, PB9=SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, Hertz(400_000), Default::default());
    let mut display = OledDisplay::ssd1306(i2c);
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        // Keep running: the door works without a screen
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    // DHT22 on PB2, released high
    let sensor = Dht22::new(OutputOpenDrain::new(p.PB2, Level::High, Speed::Low), Delay);

    // Serial commands on USART6 (PA12=RX, PA11=TX)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = SERIAL_BAUD;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = BufferedUart::new(p.USART6, p.PA12, p.PA11, tx_buf, rx_buf, Irqs, uart_config)
        .unwrap();
    let (_tx, rx) = uart.split();
    info!("UART initialized at {} baud", SERIAL_BAUD);

    let controller = DoorController::new(config, motor, buzzer, leds);
    let control = ControlLoop {
        controller,
        display,
        sensor,
        buttons,
        debouncer: Debouncer::new(config.input.debounce_ms),
    };

    spawner.spawn(tasks::controller_task(control)).unwrap();
    spawner.spawn(tasks::countdown_tick_task()).unwrap();
    spawner.spawn(tasks::sensor_tick_task()).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();

    // Joystick calibration needs the stick at rest after power-up
    Timer::after_millis(BOOT_SETTLE_MS).await;

    let axes = JoystickAxes {
        adc: Adc::new(p.ADC1),
        x: p.PC2.degrade_adc(),
        y: p.PC3.degrade_adc(),
    };
    spawner.spawn(tasks::joystick_task(axes, config.input)).unwrap();

    info!("All tasks spawned");
}
