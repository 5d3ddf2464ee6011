//! Human readable signal names.

use std::ffi::CStr;

/// Resolves a signal number to the text shown in the prompt.
pub trait SignalNames {
    fn name(&self, signal: u8) -> String;
}

impl<F> SignalNames for F
where
    F: Fn(u8) -> String,
{
    fn name(&self, signal: u8) -> String {
        self(signal)
    }
}

/// Signal descriptions as reported by the C library, e.g. "Killed".
#[derive(Debug, Clone, Copy, Default)]
pub struct Platform;

impl SignalNames for Platform {
    fn name(&self, signal: u8) -> String {
        // SAFETY: strsignal returns a pointer to a NUL terminated string that
        // stays valid until the next call; it is copied out right away and the
        // process is single threaded.
        unsafe {
            let description = libc::strsignal(libc::c_int::from(signal));
            if description.is_null() {
                return format!("Unknown signal {signal}");
            }
            CStr::from_ptr(description).to_string_lossy().into_owned()
        }
    }
}
