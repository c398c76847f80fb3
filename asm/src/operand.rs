//! Operand classification predicates. Each shape is checked independently;
//! the encoder tries them in a per-mnemonic priority order and takes the
//! first match.

use arch::reg::Reg;

/// `r`/`R` followed by a decimal register number 0..=15.
pub fn reg(token: &str) -> Option<Reg> {
    Reg::parse(token).ok()
}

/// Immediate byte: `0x` or `0X` followed by one or two hex digits.
pub fn imm(token: &str) -> Option<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))?;
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// The literal `MEM` keyword for register-indirect memory access.
pub fn is_mem(token: &str) -> bool {
    token == "MEM"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers() {
        assert_eq!(reg("r0").map(Reg::num), Some(0));
        assert_eq!(reg("R15").map(Reg::num), Some(15));
        assert!(reg("r16").is_none());
        assert!(reg("r-1").is_none());
        assert!(reg("ra").is_none());
        assert!(reg("r").is_none());
        assert!(reg("r1234").is_none());
    }

    #[test]
    fn immediates() {
        assert_eq!(imm("0x00"), Some(0x00));
        assert_eq!(imm("0xFF"), Some(0xFF));
        assert_eq!(imm("0xff"), Some(0xFF));
        assert_eq!(imm("0X2a"), Some(0x2A));
        assert_eq!(imm("0x7"), Some(0x07));
        assert!(imm("0x100").is_none());
        assert!(imm("0xGG").is_none());
        assert!(imm("0x").is_none());
        assert!(imm("42").is_none());
        assert!(imm("FF").is_none());
    }

    #[test]
    fn mem_marker() {
        assert!(is_mem("MEM"));
        assert!(!is_mem("mem"));
        assert!(!is_mem("MEMO"));
    }
}
