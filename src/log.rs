//! Optional log output.
//!
//! With `esp32-log` lines are printed through `esp-println`, with `defmt`
//! they go to the `defmt` logger. Without either feature the arguments are
//! only type checked.

macro_rules! log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
        #[cfg(not(any(feature = "esp32-log", feature = "defmt")))]
        let _ = format_args!($($arg)*);
    }};
}
