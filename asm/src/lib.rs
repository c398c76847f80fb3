pub mod encoder;
pub mod error;
pub mod labels;
pub mod operand;
pub mod parser;
