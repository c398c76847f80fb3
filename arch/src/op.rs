use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The closed v8cpu mnemonic set. Keywords are lowercase and case sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    Mov,
    Jmp,
    Je,
    Jne,
    Jg,
    Jl,
    Ljmp,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Not,
    Cmp,
    #[default]
    Nop,
}

impl Mnemonic {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>()
            .map_err(|_| format!("Unknown instruction: {s}"))
    }

    /// Fewest operand tokens the encoder will accept; extra tokens are
    /// ignored. `not` reads a single register.
    pub fn min_operands(&self) -> usize {
        use Mnemonic::*;
        match self {
            Mov | Add | Sub | And | Or | Xor | Cmp => 2,
            Jmp | Je | Jne | Jg | Jl | Not => 1,
            Ljmp | Nop => 0,
        }
    }
}

#[test]
fn test() {
    assert_eq!(Mnemonic::parse("mov"), Ok(Mnemonic::Mov));
    assert_eq!(Mnemonic::parse("nop"), Ok(Mnemonic::Nop));
    assert_eq!(format!("{}", Mnemonic::Ljmp), "ljmp");
    // the keyword set is case sensitive
    assert!(Mnemonic::parse("MOV").is_err());
    assert!(Mnemonic::parse("foo").is_err());
    assert_eq!(Mnemonic::Mov.min_operands(), 2);
    assert_eq!(Mnemonic::Not.min_operands(), 1);
    assert_eq!(Mnemonic::Nop.min_operands(), 0);
}
