//! Opcode reference data
//!
//! Display metadata for the opcodes covered by the explorer's reference
//! pages. This dataset is informational: the evaluator never reads it, and
//! several entries (`OP_CHECKSIG`, `OP_IF`, ...) have no simulated
//! counterpart.

use std::fmt;

use serde::Serialize;

use super::eval;

/// Display metadata for one opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpcodeDescriptor {
    pub name: &'static str,
    /// Script byte as written in docs, e.g. `0x76`
    pub hex: &'static str,
    pub description: &'static str,
    /// Example in ASM form
    pub asm: &'static str,
    /// Same example, hex-encoded
    pub hex_code: &'static str,
    /// Illustrative diagram asset
    pub svg_path: &'static str,
    pub svg_id: &'static str,
}

impl OpcodeDescriptor {
    /// Whether the stack evaluator can animate this opcode
    pub fn is_simulated(&self) -> bool {
        eval::lookup(self.name).is_some()
    }

    /// Parsed byte value of [`OpcodeDescriptor::hex`]
    pub fn byte(&self) -> Option<u8> {
        let digits = self.hex.strip_prefix("0x").or_else(|| self.hex.strip_prefix("0X"))?;
        u8::from_str_radix(digits, 16).ok()
    }
}

impl fmt::Display for OpcodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.hex)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  asm: {}", self.asm)?;
        writeln!(f, "  hex: {}", self.hex_code)?;
        write!(f, "  simulated: {}", if self.is_simulated() { "yes" } else { "no" })
    }
}

const IMAGE_DIR: &str = "/decoding-bitcoin/static/images/topics/overview";

macro_rules! svg_path {
    ($name:literal) => {
        concat!("/decoding-bitcoin/static/images/topics/overview/", $name, ".svg")
    };
}

static DESCRIPTORS: [OpcodeDescriptor; 9] = [
    OpcodeDescriptor {
        name: "OP_CHECKSIG",
        hex: "0xAC",
        description: "Verifies a signature against a public key and the transaction data. If the signature is valid, it pushes 1 onto the stack; otherwise, it pushes 0.",
        asm: "<sig> <pubkey> OP_CHECKSIG",
        hex_code: "<sig> <pubkey> 0xAC",
        svg_path: svg_path!("OP_CHECKSIG"),
        svg_id: "eIGw4bYh7q01",
    },
    OpcodeDescriptor {
        name: "OP_CHECKMULTISIG",
        hex: "0xAE",
        description: "Verifies multiple signatures against multiple public keys. It checks if at least m of n signatures are valid. If yes push 1 (true) to the stack, otherwise 0 (false)",
        asm: "0 <Signature2> <Signature3> 2 <PublicKey1> <PublicKey2> <PublicKey3> 3 OP_CHECKMULTISIG",
        hex_code: "0x00 <Signature2> <Signature3> 0x52 <PublicKey1> <PublicKey2> <PublicKey3> 0x53 0xAE",
        svg_path: svg_path!("OP_CHECKMULTISIG"),
        svg_id: "ewpOsy7XivL1",
    },
    OpcodeDescriptor {
        name: "OP_RETURN",
        hex: "0x6A",
        description: "Marks the output as containing data and makes it unspendable. It is often used to embed arbitrary data into the blockchain.",
        asm: "OP_RETURN <data>",
        hex_code: "0x6A <data>",
        svg_path: svg_path!("OP_RETURN"),
        svg_id: "ePRvDAyVHFs1",
    },
    OpcodeDescriptor {
        name: "OP_DUP",
        hex: "0x76",
        description: "Duplicates the top item on the stack and pushes it onto the stack again.",
        asm: "5 OP_DUP",
        hex_code: "0x05 0x76",
        svg_path: svg_path!("OP_DUP"),
        svg_id: "eV5jQmEphkS1",
    },
    OpcodeDescriptor {
        name: "OP_EQUAL",
        hex: "0x87",
        description: "Compares the top two items on the stack. If they are equal, it pushes 1 onto the stack; otherwise, it pushes 0.",
        asm: "5 5 OP_EQUAL",
        hex_code: "0x05 0x05 0x87",
        svg_path: svg_path!("OP_EQUAL"),
        svg_id: "euOsxtleRZo1",
    },
    OpcodeDescriptor {
        name: "OP_HASH160",
        hex: "0xA9",
        description: "Hashes the top item on the stack twice: first with SHA-256 and then with RIPEMD-160.",
        asm: "<data> OP_HASH160",
        hex_code: "<data> 0xA9",
        svg_path: svg_path!("OP_HASH160"),
        svg_id: "eVi2ttrKQ4j1",
    },
    OpcodeDescriptor {
        name: "OP_EQUALVERIFY",
        hex: "0x88",
        description: "Compares the top two items on the stack for equality. If they are not equal, the script fails.",
        asm: "5 5 OP_EQUALVERIFY",
        hex_code: "0x05 0x05 0x88",
        svg_path: svg_path!("OP_EQUALVERIFY"),
        svg_id: "e2znsLFuITp1",
    },
    OpcodeDescriptor {
        name: "OP_IF",
        hex: "0x63",
        description: "Evaluates a condition. If the condition is true (non-zero), it executes the statements after OP_IF. Otherwise, it jumps to the code after OP_ELSE, if present, or OP_ENDIF.",
        asm: "<condition> OP_IF <true branch code> OP_ENDIF",
        hex_code: "<condition> 0x63 <true branch code> 0x68",
        svg_path: svg_path!("OP_IF"),
        svg_id: "eFfHWhIxGND1",
    },
    OpcodeDescriptor {
        name: "OP_ELSE",
        hex: "0x67",
        description: "Marks the beginning of the false branch of a conditional execution (used after OP_IF). The code after OP_ELSE is executed if the condition evaluated by OP_IF is false (zero).",
        asm: "<condition> OP_IF <true branch code> OP_ELSE <false branch code> OP_ENDIF",
        hex_code: "<condition> 0x63 <true branch code> 0x67 <false branch code> 0x68",
        svg_path: svg_path!("OP_ELSE"),
        svg_id: "e9yEjpOIwHv1",
    },
];

/// All descriptors, in reference-page order
pub fn descriptors() -> &'static [OpcodeDescriptor] {
    &DESCRIPTORS
}

/// Descriptor for `name`, if documented
pub fn descriptor(name: &str) -> Option<&'static OpcodeDescriptor> {
    DESCRIPTORS.iter().find(|d| d.name == name)
}

/// Whether the evaluator table defines `name`
pub fn is_simulated(name: &str) -> bool {
    eval::lookup(name).is_some()
}

/// Directory that holds the diagram assets
pub fn image_dir() -> &'static str {
    IMAGE_DIR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_count() {
        let names: Vec<&str> = descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "OP_CHECKSIG",
                "OP_CHECKMULTISIG",
                "OP_RETURN",
                "OP_DUP",
                "OP_EQUAL",
                "OP_HASH160",
                "OP_EQUALVERIFY",
                "OP_IF",
                "OP_ELSE",
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let dup = descriptor("OP_DUP").expect("OP_DUP documented");
        assert_eq!(dup.hex, "0x76");
        assert_eq!(dup.asm, "5 OP_DUP");
        assert_eq!(dup.hex_code, "0x05 0x76");
        assert_eq!(dup.svg_path, "/decoding-bitcoin/static/images/topics/overview/OP_DUP.svg");
        assert_eq!(dup.svg_id, "eV5jQmEphkS1");

        assert!(descriptor("OP_ADD").is_none());
        assert!(descriptor("op_dup").is_none());
    }

    #[test]
    fn test_names_unique_and_paths_consistent() {
        for (i, d) in descriptors().iter().enumerate() {
            assert!(descriptors()[i + 1..].iter().all(|o| o.name != d.name));
            assert!(d.svg_path.starts_with(image_dir()));
            assert!(d.svg_path.ends_with(&format!("{}.svg", d.name)));
        }
    }

    #[test]
    fn test_byte_matches_evaluator_opcodes() {
        use crate::backend::opcodes::Opcode;

        assert_eq!(descriptor("OP_CHECKSIG").and_then(|d| d.byte()), Some(0xac));
        for d in descriptors() {
            if let Some(op) = Opcode::from_name(d.name) {
                assert_eq!(d.byte(), Some(op.byte()), "{} byte mismatch", d.name);
            }
        }
    }

    #[test]
    fn test_simulated_flags() {
        assert!(descriptor("OP_DUP").unwrap().is_simulated());
        assert!(descriptor("OP_EQUAL").unwrap().is_simulated());
        assert!(!descriptor("OP_IF").unwrap().is_simulated());
        assert!(is_simulated("OP_SWAP"));
        assert!(!is_simulated("OP_HASH160"));
    }

    #[test]
    fn test_display() {
        let text = descriptor("OP_RETURN").unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "OP_RETURN (0x6A)");
        assert_eq!(lines[2], "  asm: OP_RETURN <data>");
        assert_eq!(lines[4], "  simulated: no");
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(descriptor("OP_EQUAL").unwrap()).unwrap();
        assert_eq!(json["hexCode"], "0x05 0x05 0x87");
        assert_eq!(json["svgId"], "euOsxtleRZo1");
        assert!(json.get("svgPath").is_some());
        assert!(json.get("hex_code").is_none());
    }
}
