use crate::reg::Reg;
use color_print::cformat;

// ----------------------------------------------------------------------------
// Opcode bytes

pub struct OpCode;

impl OpCode {
    pub const NOP: u8 = 0x00;
    pub const MOV: u8 = 0x10;
    pub const LOAD: u8 = 0x11;
    pub const STORE: u8 = 0x12;
    pub const MOVI: u8 = 0x20; // low nibble carries the destination register
    pub const JMP: u8 = 0x30;
    pub const JE: u8 = 0x31;
    pub const JNE: u8 = 0x32;
    pub const JG: u8 = 0x33;
    pub const JL: u8 = 0x34;
    pub const LJMP: u8 = 0x40;
    pub const ADD: u8 = 0x50;
    pub const SUB: u8 = 0x51;
    pub const AND: u8 = 0x52;
    pub const OR: u8 = 0x53;
    pub const XOR: u8 = 0x54;
    pub const NOT: u8 = 0x55;
    pub const CMP: u8 = 0x56;
}

// ----------------------------------------------------------------------------
// Instruction

/// A fully resolved v8cpu instruction. Branch displacements are already in
/// their on-wire two's complement form (see [`branch_disp`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    MOV(Reg, Reg),
    LOAD(Reg),  // mov Ra, MEM
    STORE(Reg), // mov MEM, Rb
    MOVI(Reg, u8),
    JMP(u8),
    JE(u8),
    JNE(u8),
    JG(u8),
    JL(u8),
    LJMP,
    ADD(Reg, Reg),
    SUB(Reg, Reg),
    AND(Reg, Reg),
    OR(Reg, Reg),
    XOR(Reg, Reg),
    NOT(Reg),
    CMP(Reg, Reg),
    NOP,
}

impl Inst {
    /// Encode into the fixed two-byte form: (operand byte, opcode byte).
    pub fn encode(self) -> [u8; 2] {
        match self {
            Inst::MOV(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::MOV],
            Inst::LOAD(ra) => [ra.num() << 4, OpCode::LOAD],
            Inst::STORE(rb) => [rb.num() << 4, OpCode::STORE],
            Inst::MOVI(ra, d) => [d, OpCode::MOVI | ra.num()],
            Inst::JMP(k) => [k, OpCode::JMP],
            Inst::JE(k) => [k, OpCode::JE],
            Inst::JNE(k) => [k, OpCode::JNE],
            Inst::JG(k) => [k, OpCode::JG],
            Inst::JL(k) => [k, OpCode::JL],
            Inst::LJMP => [0x00, OpCode::LJMP],
            Inst::ADD(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::ADD],
            Inst::SUB(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::SUB],
            Inst::AND(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::AND],
            Inst::OR(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::OR],
            Inst::XOR(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::XOR],
            Inst::NOT(ra) => [ra.num() << 4, OpCode::NOT],
            Inst::CMP(ra, rb) => [ra.num() << 4 | rb.num(), OpCode::CMP],
            Inst::NOP => [0x00, OpCode::NOP],
        }
    }

    pub fn cformat(&self) -> String {
        macro_rules! instfmt {
            ($name:expr, $a:expr, $b:expr) => {
                cformat!("<red>{:<5}</><blue>{:<4} {:<4}</>", $name, $a, $b)
            };
        }
        match self {
            Inst::MOV(ra, rb) => instfmt!("mov", ra, rb),
            Inst::LOAD(ra) => instfmt!("mov", ra, "MEM"),
            Inst::STORE(rb) => instfmt!("mov", "MEM", rb),
            Inst::MOVI(ra, d) => instfmt!("mov", ra, format!("0x{:02X}", d)),
            Inst::JMP(k) => instfmt!("jmp", format!("{:+}", *k as i8), ""),
            Inst::JE(k) => instfmt!("je", format!("{:+}", *k as i8), ""),
            Inst::JNE(k) => instfmt!("jne", format!("{:+}", *k as i8), ""),
            Inst::JG(k) => instfmt!("jg", format!("{:+}", *k as i8), ""),
            Inst::JL(k) => instfmt!("jl", format!("{:+}", *k as i8), ""),
            Inst::LJMP => instfmt!("ljmp", "", ""),
            Inst::ADD(ra, rb) => instfmt!("add", ra, rb),
            Inst::SUB(ra, rb) => instfmt!("sub", ra, rb),
            Inst::AND(ra, rb) => instfmt!("and", ra, rb),
            Inst::OR(ra, rb) => instfmt!("or", ra, rb),
            Inst::XOR(ra, rb) => instfmt!("xor", ra, rb),
            Inst::NOT(ra) => instfmt!("not", ra, ""),
            Inst::CMP(ra, rb) => instfmt!("cmp", ra, rb),
            Inst::NOP => instfmt!("nop", "", ""),
        }
    }
}

// ----------------------------------------------------------------------------
// Branch displacement

/// Short-branch displacement from the branch's own address to `target`, in
/// instruction words, as the on-wire byte. Both addresses are even. Backward
/// branches encode as two's complement (129..=255), forward branches
/// (including a self branch) as 0..=127; at most 127 words either way, so
/// the code 128 is never produced. `None` means the target is out of reach.
pub fn branch_disp(ip: u16, target: u16) -> Option<u8> {
    if target < ip {
        let distance = (ip - target) >> 1;
        if distance > 127 {
            return None;
        }
        Some((distance as u8).wrapping_neg())
    } else {
        let distance = (target - ip) >> 1;
        if distance > 127 {
            return None;
        }
        Some(distance as u8)
    }
}

#[test]
fn test() {
    let r = |n| Reg::parse(&format!("r{n}")).unwrap();
    assert_eq!(Inst::MOV(r(1), r(2)).encode(), [0x12, 0x10]);
    assert_eq!(Inst::LOAD(r(3)).encode(), [0x30, 0x11]);
    assert_eq!(Inst::STORE(r(4)).encode(), [0x40, 0x12]);
    assert_eq!(Inst::MOVI(r(3), 0x2A).encode(), [0x2A, 0x23]);
    assert_eq!(Inst::JMP(0xFF).encode(), [0xFF, 0x30]);
    assert_eq!(Inst::JL(0x05).encode(), [0x05, 0x34]);
    assert_eq!(Inst::LJMP.encode(), [0x00, 0x40]);
    assert_eq!(Inst::ADD(r(15), r(15)).encode(), [0xFF, 0x50]);
    assert_eq!(Inst::CMP(r(1), r(0)).encode(), [0x10, 0x56]);
    assert_eq!(Inst::NOT(r(2)).encode(), [0x20, 0x55]);
    assert_eq!(Inst::NOP.encode(), [0x00, 0x00]);
}

#[test]
fn test_branch_disp() {
    // self branch and forward
    assert_eq!(branch_disp(0, 0), Some(0x00));
    assert_eq!(branch_disp(0, 2), Some(0x01));
    assert_eq!(branch_disp(0, 100), Some(0x32));
    // backward
    assert_eq!(branch_disp(2, 0), Some(0xFF));
    assert_eq!(branch_disp(100, 0), Some(0xCE));
    // 127 words is the limit in both directions
    assert_eq!(branch_disp(254, 0), Some(0x81));
    assert_eq!(branch_disp(256, 0), None);
    assert_eq!(branch_disp(0, 254), Some(0x7F));
    assert_eq!(branch_disp(0, 256), None);
}
