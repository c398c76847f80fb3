use crate::error::Error;
use arch::{inst::Inst, op::Mnemonic};
use color_print::cformat;

// ----------------------------------------------------------------------------
// Line

/// One source line, split into an optional label and an optional statement.
/// Commas count as whitespace; a token beginning with `;` ends the statement
/// and starts the trailing comment.
#[derive(Debug, Clone)]
pub struct Line {
    path: String,
    idx: usize,
    raw: String,
    pub label: Option<String>,
    pub op: Option<Op>,
}

/// A mnemonic with its raw operand tokens. Operands stay unclassified until
/// the encoder picks a shape for them.
#[derive(Debug, Clone)]
pub struct Op {
    pub mnemonic: Mnemonic,
    pub operands: Vec<String>,
}

impl Line {
    pub fn parse(path: &str, idx: usize, raw: &str) -> (Self, Option<Error>) {
        let mut line = Line {
            path: path.to_string(),
            idx,
            raw: raw.to_string(),
            label: None,
            op: None,
        };

        let cleaned = raw.replace(',', " ");
        let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if let Some(at) = tokens.iter().position(|t| t.starts_with(';')) {
            tokens.truncate(at);
        }
        if tokens.is_empty() {
            return (line, None);
        }

        if let Some(name) = tokens[0].strip_suffix(':') {
            line.label = Some(name.to_string());
            tokens.remove(0);
        }
        let Some(&keyword) = tokens.first() else {
            // label-only line
            return (line, None);
        };

        match Mnemonic::parse(keyword) {
            Ok(mnemonic) => {
                line.op = Some(Op {
                    mnemonic,
                    operands: tokens[1..].iter().map(|t| t.to_string()).collect(),
                });
                (line, None)
            }
            Err(_) => {
                let err = Error::UnknownInstruction(keyword.to_string());
                (line, Some(err))
            }
        }
    }

    pub fn pos(&self) -> String {
        format!("{}:{}", self.path, self.idx + 1)
    }

    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

// ----------------------------------------------------------------------------
// Dump listing

impl Line {
    pub fn cformat(&self, pc: Option<u16>, inst: Option<Inst>) -> String {
        let file = if self.no() == 1 {
            let rule = "+------+------+-------+------------------+";
            format!("{}\n| {:<38} |\n{}\n", rule, self.path, rule)
        } else {
            String::new()
        };

        let pc = match pc {
            Some(pc) => cformat!("<green>{:04X}</>", pc),
            None => " ".repeat(4),
        };

        let bytes = match inst {
            Some(inst) => {
                let [operand, opcode] = inst.encode();
                format!("{:02X} {:02X}", operand, opcode)
            }
            None => " ".repeat(5),
        };

        let label = match &self.label {
            Some(label) => cformat!("<green>{}:</> ", label),
            None => String::new(),
        };
        let stmt = match inst {
            Some(inst) => format!("{}{}", label, inst.cformat()),
            None => label,
        };

        format!("{}| {:>4} | {} | {} | {}", file, self.no(), pc, bytes, stmt)
    }
}
