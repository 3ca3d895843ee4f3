//! Reference data and the C ABI, exercised as a host would.

use std::ffi::{CStr, CString};

use opcode_explorer::backend::{descriptor, descriptors, operations};
use opcode_explorer::ffi::{apply_json, opx_apply, opx_describe, opx_free_string};
use serde_json::{json, Value};

#[test]
fn test_every_simulated_documented_opcode_agrees_on_byte() {
    for def in operations() {
        if let Some(d) = descriptor(def.name()) {
            assert_eq!(d.byte(), Some(def.opcode.byte()));
            assert!(d.is_simulated());
        }
    }
    let simulated: Vec<&str> = descriptors()
        .iter()
        .filter(|d| d.is_simulated())
        .map(|d| d.name)
        .collect();
    assert_eq!(simulated, vec!["OP_DUP", "OP_EQUAL"]);
}

#[test]
fn test_descriptor_json_shape() {
    let json = serde_json::to_value(descriptor("OP_CHECKMULTISIG").unwrap()).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["name", "hex", "description", "asm", "hexCode", "svgPath", "svgId"] {
        assert!(keys.contains(&key), "missing {}", key);
    }
    assert_eq!(keys.len(), 7);
}

#[test]
fn test_apply_json_round_trip_through_host() {
    let stack = json!([{ "number": "5" }]).to_string();
    let dup: Value = serde_json::from_str(&apply_json(&stack, "OP_DUP")).unwrap();
    let equal: Value = serde_json::from_str(&apply_json(&dup.to_string(), "OP_EQUAL")).unwrap();
    assert_eq!(equal, json!([{ "bool": true }]));
}

#[test]
fn test_c_abi() {
    let stack = CString::new(r#"[{"text":"a"}]"#).unwrap();
    let op = CString::new("OP_SWAP").unwrap();
    let name = CString::new("OP_ELSE").unwrap();
    unsafe {
        let ptr = opx_apply(stack.as_ptr(), op.as_ptr());
        let out: Value = serde_json::from_str(CStr::from_ptr(ptr).to_str().unwrap()).unwrap();
        assert_eq!(out, json!([{ "text": "a" }, { "text": "Error: Insufficient items" }]));
        opx_free_string(ptr);

        let ptr = opx_describe(name.as_ptr());
        let out: Value = serde_json::from_str(CStr::from_ptr(ptr).to_str().unwrap()).unwrap();
        assert_eq!(out["hex"], "0x67");
        opx_free_string(ptr);
    }
}
