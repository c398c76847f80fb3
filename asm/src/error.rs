use crate::parser::Line;
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown instruction: `{0}`")]
    UnknownInstruction(String),

    #[error("Invalid number of operands: `{mnemonic}` takes at least {min}, found {found}")]
    InvalidOperandCount {
        mnemonic: String,
        min: usize,
        found: usize,
    },

    #[error("Invalid operands for `{0}`")]
    InvalidOperands(String),

    #[error("Invalid label: `{0}`")]
    InvalidLabel(String),

    #[error("Relative branch too far: {0} instruction words (max 127)")]
    BranchTooFar(u16),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Print the error with the offending source line, rustc style.
    pub fn print_diag(&self, line: &Line) {
        cprintln!("<red,bold>error</>: {}", self);
        cprintln!("     <blue>--></> <underline>{}</>", line.pos());
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line.no(), line.raw());
        cprintln!("      <blue>|</>");
    }

    /// Print an error with no source location (file IO).
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
    }
}
