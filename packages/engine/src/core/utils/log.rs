//! Console logging
//!
//! On wasm32 messages go to the browser console through `web_sys::console`.
//! Native builds (tests, tools) have no JS console, so messages are written
//! to stderr in debug builds and dropped in release.
//!
//! Usage:
//! ```rust
//! use cairn_engine::console_log;
//!
//! let id = 3;
//! console_log!("stone {} settled", id);
//! ```

#[doc(hidden)]
pub fn log_str(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&msg.into());
    }
    #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
    {
        eprintln!("{msg}");
    }
    #[cfg(all(not(target_arch = "wasm32"), not(debug_assertions)))]
    {
        let _ = msg;
    }
}

#[doc(hidden)]
pub fn warn_str(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&msg.into());
    }
    #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
    {
        eprintln!("warning: {msg}");
    }
    #[cfg(all(not(target_arch = "wasm32"), not(debug_assertions)))]
    {
        let _ = msg;
    }
}

/// `format!`-style info log to the console.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::core::utils::log::log_str(&format!($($arg)*))
    };
}

/// `format!`-style warning to the console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::core::utils::log::warn_str(&format!($($arg)*))
    };
}
