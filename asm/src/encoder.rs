//! Pass 2: turn a parsed statement into a resolved instruction. Operand
//! shapes are tried in a fixed per-mnemonic priority order; the first match
//! commits and no other mnemonic's rules are consulted.

use crate::error::Error;
use crate::labels::Labels;
use crate::operand;
use crate::parser::Op;
use arch::inst::{branch_disp, Inst};
use arch::op::Mnemonic;

pub fn encode(op: &Op, ip: u16, labels: &Labels) -> Result<Inst, Error> {
    let min = op.mnemonic.min_operands();
    if op.operands.len() < min {
        return Err(Error::InvalidOperandCount {
            mnemonic: op.mnemonic.to_string(),
            min,
            found: op.operands.len(),
        });
    }
    let args = &op.operands;

    use Mnemonic::*;
    match op.mnemonic {
        Mov => {
            let (a, b) = (&args[0], &args[1]);
            if let (Some(ra), Some(rb)) = (operand::reg(a), operand::reg(b)) {
                Ok(Inst::MOV(ra, rb))
            } else if let (Some(ra), true) = (operand::reg(a), operand::is_mem(b)) {
                Ok(Inst::LOAD(ra))
            } else if let (true, Some(rb)) = (operand::is_mem(a), operand::reg(b)) {
                Ok(Inst::STORE(rb))
            } else if let (Some(ra), Some(d)) = (operand::reg(a), operand::imm(b)) {
                Ok(Inst::MOVI(ra, d))
            } else {
                Err(Error::InvalidOperands(op.mnemonic.to_string()))
            }
        }

        Jmp | Je | Jne | Jg | Jl => {
            let target = labels
                .get(&args[0])
                .ok_or_else(|| Error::InvalidLabel(args[0].clone()))?;
            let disp = branch_disp(ip, target)
                .ok_or_else(|| Error::BranchTooFar(ip.abs_diff(target) >> 1))?;
            Ok(match op.mnemonic {
                Jmp => Inst::JMP(disp),
                Je => Inst::JE(disp),
                Jne => Inst::JNE(disp),
                Jg => Inst::JG(disp),
                _ => Inst::JL(disp),
            })
        }

        Ljmp => Ok(Inst::LJMP),

        Add | Sub | And | Or | Xor | Cmp => {
            match (operand::reg(&args[0]), operand::reg(&args[1])) {
                (Some(ra), Some(rb)) => Ok(match op.mnemonic {
                    Add => Inst::ADD(ra, rb),
                    Sub => Inst::SUB(ra, rb),
                    And => Inst::AND(ra, rb),
                    Or => Inst::OR(ra, rb),
                    Xor => Inst::XOR(ra, rb),
                    _ => Inst::CMP(ra, rb),
                }),
                _ => Err(Error::InvalidOperands(op.mnemonic.to_string())),
            }
        }

        Not => match operand::reg(&args[0]) {
            Some(ra) => Ok(Inst::NOT(ra)),
            None => Err(Error::InvalidOperands(op.mnemonic.to_string())),
        },

        Nop => Ok(Inst::NOP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Line;

    fn op(raw: &str) -> Op {
        let (line, err) = Line::parse("test.asm", 0, raw);
        assert!(err.is_none());
        line.op.unwrap()
    }

    fn enc(raw: &str, labels: &Labels) -> Result<[u8; 2], Error> {
        encode(&op(raw), 0, labels).map(Inst::encode)
    }

    #[test]
    fn mov_shapes_in_priority_order() {
        let labels = Labels::new();
        assert_eq!(enc("mov r1, r2", &labels).unwrap(), [0x12, 0x10]);
        assert_eq!(enc("mov r5, MEM", &labels).unwrap(), [0x50, 0x11]);
        assert_eq!(enc("mov MEM, r6", &labels).unwrap(), [0x60, 0x12]);
        assert_eq!(enc("mov r3, 0x2A", &labels).unwrap(), [0x2A, 0x23]);
        assert!(matches!(
            enc("mov 0x01, r2", &labels),
            Err(Error::InvalidOperands(_))
        ));
        assert!(matches!(
            enc("mov MEM, MEM", &labels),
            Err(Error::InvalidOperands(_))
        ));
    }

    #[test]
    fn alu_shapes() {
        let labels = Labels::new();
        assert_eq!(enc("add r1, r2", &labels).unwrap(), [0x12, 0x50]);
        assert_eq!(enc("sub r1, r2", &labels).unwrap(), [0x12, 0x51]);
        assert_eq!(enc("and r1, r2", &labels).unwrap(), [0x12, 0x52]);
        assert_eq!(enc("or r1, r2", &labels).unwrap(), [0x12, 0x53]);
        assert_eq!(enc("xor r1, r2", &labels).unwrap(), [0x12, 0x54]);
        assert_eq!(enc("cmp r1, r2", &labels).unwrap(), [0x12, 0x56]);
        assert_eq!(enc("not r4", &labels).unwrap(), [0x40, 0x55]);
        assert!(matches!(
            enc("add r1, 0x02", &labels),
            Err(Error::InvalidOperands(_))
        ));
    }

    #[test]
    fn no_operand_mnemonics() {
        let labels = Labels::new();
        assert_eq!(enc("nop", &labels).unwrap(), [0x00, 0x00]);
        assert_eq!(enc("ljmp", &labels).unwrap(), [0x00, 0x40]);
    }

    #[test]
    fn operand_count_floor() {
        let labels = Labels::new();
        assert!(matches!(
            enc("mov r1", &labels),
            Err(Error::InvalidOperandCount { min: 2, found: 1, .. })
        ));
        assert!(matches!(
            enc("jmp", &labels),
            Err(Error::InvalidOperandCount { min: 1, found: 0, .. })
        ));
        // extra operands are ignored
        assert_eq!(enc("nop r1 r2", &labels).unwrap(), [0x00, 0x00]);
    }

    #[test]
    fn branches_resolve_against_the_table() {
        let mut labels = Labels::new();
        labels.insert("back".to_string(), 0);
        labels.insert("fwd".to_string(), 100);
        labels.insert("far".to_string(), 256);

        assert_eq!(encode(&op("jmp fwd"), 0, &labels).unwrap().encode(), [0x32, 0x30]);
        assert_eq!(encode(&op("je back"), 100, &labels).unwrap().encode(), [0xCE, 0x31]);
        assert_eq!(encode(&op("jne fwd"), 0, &labels).unwrap().encode(), [0x32, 0x32]);
        assert_eq!(encode(&op("jg fwd"), 0, &labels).unwrap().encode(), [0x32, 0x33]);
        assert_eq!(encode(&op("jl fwd"), 0, &labels).unwrap().encode(), [0x32, 0x34]);

        // exactly 127 words back fits, 128 does not
        assert_eq!(encode(&op("jmp back"), 254, &labels).unwrap().encode(), [0x81, 0x30]);
        assert!(matches!(
            encode(&op("jmp back"), 256, &labels),
            Err(Error::BranchTooFar(128))
        ));
        assert!(matches!(
            encode(&op("jmp far"), 0, &labels),
            Err(Error::BranchTooFar(128))
        ));

        assert!(matches!(
            encode(&op("jmp nowhere"), 0, &labels),
            Err(Error::InvalidLabel(name)) if name == "nowhere"
        ));
        // a register token is not a label either
        assert!(matches!(
            encode(&op("jmp r1"), 0, &labels),
            Err(Error::InvalidLabel(_))
        ));
    }
}
