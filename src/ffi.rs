/// FFI layer for host embedding
/// Provides C-compatible functions that exchange JSON strings.
///
/// Stacks travel as JSON arrays, bottom first:
/// `[{"number":"2"},{"text":"a"},{"bool":true}]`.
/// Failures are reported as `{"error":"..."}`.
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde_json::json;
use tracing::debug;

use crate::backend::descriptors;
use crate::backend::eval;
use crate::backend::models::Stack;

fn error_json(message: impl std::fmt::Display) -> String {
    json!({ "error": message.to_string() }).to_string()
}

/// Apply `op_name` to a JSON-encoded stack and return the new stack as JSON
pub fn apply_json(stack_json: &str, op_name: &str) -> String {
    let stack: Stack = match serde_json::from_str(stack_json) {
        Ok(stack) => stack,
        Err(e) => return error_json(format!("invalid stack JSON: {}", e)),
    };
    match eval::apply(&stack, op_name) {
        Some(next) => serde_json::to_string(&next).unwrap_or_else(error_json),
        None => {
            debug!(target: "opcode_explorer::ffi", op = op_name, "unknown operation");
            error_json(format!("unknown operation: {}", op_name))
        }
    }
}

/// Reference data for `name` as JSON
pub fn describe_json(name: &str) -> String {
    match descriptors::descriptor(name) {
        Some(d) => serde_json::to_string(d).unwrap_or_else(error_json),
        None => error_json(format!("no reference entry for {}", name)),
    }
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(s) => s.into_raw(),
        Err(_) => match CString::new(r#"{"error":"result contains null byte"}"#) {
            Ok(s) => s.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
    }
}

unsafe fn read_arg<'a>(ptr: *const c_char) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(error_json("null pointer provided"));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| error_json("invalid UTF-8"))
}

/// Apply an operation to a JSON stack
///
/// # Safety
/// - both arguments must be valid null-terminated C strings
/// - the returned pointer must be freed using opx_free_string
#[no_mangle]
pub unsafe extern "C" fn opx_apply(stack_json: *const c_char, op_name: *const c_char) -> *mut c_char {
    let result = match (read_arg(stack_json), read_arg(op_name)) {
        (Ok(stack), Ok(op)) => apply_json(stack, op),
        (Err(e), _) | (_, Err(e)) => e,
    };
    into_c_string(result)
}

/// Look up an opcode's reference data
///
/// # Safety
/// - name must be a valid null-terminated C string
/// - the returned pointer must be freed using opx_free_string
#[no_mangle]
pub unsafe extern "C" fn opx_describe(name: *const c_char) -> *mut c_char {
    let result = match read_arg(name) {
        Ok(name) => describe_json(name),
        Err(e) => e,
    };
    into_c_string(result)
}

/// Free a string returned by opx_apply or opx_describe
///
/// # Safety
/// - ptr must be a pointer returned by this library
/// - ptr must not be used after calling this function
#[no_mangle]
pub unsafe extern "C" fn opx_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
