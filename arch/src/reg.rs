use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 16 general purpose registers, r0..r15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Reg(u8);

impl Reg {
    /// Register tokens are `r` or `R` followed by one or two decimal digits
    /// in 0..=15. Anything else (`ra`, `r16`, `r-1`, bare `r`) is rejected.
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix(['r', 'R'])
            .ok_or_else(|| format!("Unknown reg name: {s}"))?;
        if digits.is_empty() || digits.len() > 2 {
            return Err(format!("Unknown reg name: {s}"));
        }
        match digits.parse::<u8>() {
            Ok(n) if n <= 15 => Ok(Reg(n)),
            _ => Err(format!("Unknown reg name: {s}")),
        }
    }

    pub fn num(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl From<Reg> for u8 {
    fn from(reg: Reg) -> u8 {
        reg.0
    }
}

#[test]
fn test() {
    for n in 0..=15u8 {
        assert_eq!(Reg::parse(&format!("r{n}")), Ok(Reg(n)));
        assert_eq!(Reg::parse(&format!("R{n}")), Ok(Reg(n)));
    }
    assert_eq!(format!("{}", Reg(7)), "r7");
    assert!(Reg::parse("r").is_err());
    assert!(Reg::parse("r16").is_err());
    assert!(Reg::parse("r-1").is_err());
    assert!(Reg::parse("ra").is_err());
    assert!(Reg::parse("r100").is_err());
    assert!(Reg::parse("x3").is_err());
    assert!(Reg::parse("MEM").is_err());
}
