//! Serial receive task
//!
//! Reads command bytes from USART6 and queues them for the controller.
//! Bytes are not decoded here: the controller decides what they mean in
//! its current state.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::SERIAL_RX;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Serial RX task started");

    let mut buf = [0u8; 16];

    loop {
        match rx.read(&mut buf).await {
            Ok(0) => {}
            Ok(n) => {
                for &byte in &buf[..n] {
                    trace!("Serial RX: {=u8:#x}", byte);
                    if SERIAL_RX.try_send(byte).is_err() {
                        warn!("Serial queue full, dropping {=u8:#x}", byte);
                    }
                }
            }
            Err(e) => {
                warn!("Serial RX error: {:?}", e);
            }
        }
    }
}
