//! C-compatible FFI API for cross-language bindings.
//!
//! # ABI Contract
//!
//! All exported functions use `extern "C"` calling convention and `#[no_mangle]`
//! to ensure stable symbol names.
//!
//! ## Memory management
//! - Strings returned by `qp_*` functions are allocated on the Rust heap.
//! - Callers **must** free them with `qp_free_string`.
//! - Passing a null pointer to a free function is a no-op.
//!
//! ## Error handling
//! - Functions that can fail return a `c_int` (0 = success, non-zero = error).
//! - Error details can be retrieved via `qp_last_error`.
//!
//! ## Thread safety
//! - Pagination holds no shared state; concurrent calls are independent.
//! - `qp_last_error` uses a thread-local, so it is safe to call from
//!   multiple threads.
//!
//! ## Usage from C
//! ```c
//! #include <stdint.h>
//! extern int qp_paginate(const char* job_json, uint32_t job_len, char** out_json);
//! extern const char* qp_last_error(void);
//! extern void qp_free_string(char* s);
//! ```

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::pipeline::{paginate_job, PrintJob};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Read `len` bytes at `ptr` as UTF-8.
///
/// # Safety
/// `ptr` must point to `len` valid bytes.
unsafe fn str_from_raw<'a>(ptr: *const c_char, len: u32) -> Result<&'a str, c_int> {
    let bytes = slice::from_raw_parts(ptr as *const u8, len as usize);
    std::str::from_utf8(bytes).map_err(|e| {
        set_last_error(&format!("Invalid UTF-8: {e}"));
        2
    })
}

// ---------------------------------------------------------------------------
// Core API
// ---------------------------------------------------------------------------

/// Paginate a print job and return the document as JSON.
///
/// # Parameters
/// - `job_ptr`: pointer to UTF-8 JSON bytes (not necessarily null-terminated);
///   either a job object `{title?, mode, records, metrics?}` or a bare array
///   of records
/// - `job_len`: length of the JSON data in bytes
/// - `out_json_ptr`: on success, receives a pointer to a null-terminated JSON string
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `qp_last_error`.
///
/// # Safety
/// - `job_ptr` must point to `job_len` valid bytes.
/// - `out_json_ptr` must be a valid pointer.
/// - The caller must free `*out_json_ptr` by calling `qp_free_string`.
#[no_mangle]
pub unsafe extern "C" fn qp_paginate(
    job_ptr: *const c_char,
    job_len: u32,
    out_json_ptr: *mut *mut c_char,
) -> c_int {
    if job_ptr.is_null() || out_json_ptr.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }
    *out_json_ptr = ptr::null_mut();

    let json = match str_from_raw(job_ptr, job_len) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let job = match PrintJob::from_json(json) {
        Ok(job) => job,
        Err(e) => {
            set_last_error(&e.to_string());
            return 3;
        }
    };

    let document = paginate_job(&job);
    match CString::new(document.to_json()) {
        Ok(cs) => {
            *out_json_ptr = cs.into_raw();
            0
        }
        Err(e) => {
            set_last_error(&format!("Output contains NUL byte: {e}"));
            4
        }
    }
}

// ---------------------------------------------------------------------------
// Error & memory management
// ---------------------------------------------------------------------------

/// Retrieve the last error message (null-terminated UTF-8).
///
/// Returns a pointer to a thread-local string. **Do not free this pointer.**
/// Returns `NULL` if no error has occurred.
#[no_mangle]
pub extern "C" fn qp_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cs) => cs.as_ptr(),
        None => ptr::null(),
    })
}

/// Free a string returned by `qp_paginate`.
///
/// # Safety
/// `s` must have been returned by `qp_paginate`, or be null.
#[no_mangle]
pub unsafe extern "C" fn qp_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Library version as a static null-terminated string. **Do not free.**
#[no_mangle]
pub extern "C" fn qp_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
