//! # FFI Types
//!
//! C-compatible types for the host bridge.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// FFI-safe result type
///
/// Used to return results across the FFI boundary.
#[repr(C)]
pub struct FfiResult {
    /// Success flag (1 = success, 0 = error)
    pub success: i32,
    /// Error code (0 if success)
    pub error_code: i32,
    /// Error message (null if success)
    pub error_message: *mut c_char,
    /// Result data (null if error)
    pub data: *mut c_char,
}

impl FfiResult {
    /// Create a successful result with data
    pub fn ok(data: String) -> Self {
        Self {
            success: 1,
            error_code: 0,
            error_message: std::ptr::null_mut(),
            data: into_raw_lossy(data),
        }
    }

    /// Create an error result
    pub fn err(code: i32, message: String) -> Self {
        Self {
            success: 0,
            error_code: code,
            error_message: into_raw_lossy(message),
            data: std::ptr::null_mut(),
        }
    }

    /// Create from a Rust Result
    pub fn from_result<T: ToString>(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::ok(value.to_string()),
            Err(e) => Self::err(e.code(), e.to_string()),
        }
    }
}

/// Interior NULs are stripped so the text always crosses the boundary
fn into_raw_lossy(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Convert a C string to a Rust string
///
/// # Safety
/// The pointer must be null or point to a valid NUL-terminated string.
pub unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(String::from)
}

/// Free an FfiResult
///
/// # Safety
/// The FfiResult must have been created by Rust FFI functions.
#[no_mangle]
pub unsafe extern "C" fn keycard_free_result(result: FfiResult) {
    if !result.error_message.is_null() {
        drop(CString::from_raw(result.error_message));
    }
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
}
