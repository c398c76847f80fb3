use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use v8asm::encoder;
use v8asm::error::Error;
use v8asm::labels;
use v8asm::parser::Line;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input assembly source
    input: Option<String>,

    /// Output memory image for $readmemh()
    output: Option<String>,

    /// Print an assembly listing after a successful run
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::{CommandFactory, Parser};

    let args = Args::parse();
    // missing arguments are a usage request, not a failure
    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        let _ = Args::command().print_help();
        return;
    };
    if run(input, output, args.dump).is_err() {
        std::process::exit(1);
    }
}

fn run(input: &str, output: &str, dump: bool) -> Result<(), ()> {
    println!("v8cpu Assembler");

    println!("1. Read Source and Collect Labels");
    println!("  < {}", input);
    let file = File::open(input).map_err(|e| Error::FileOpen(input.to_string(), e).print())?;

    let mut lines: Vec<Line> = vec![];
    for (idx, raw) in BufReader::new(file).lines().enumerate() {
        let raw = raw.map_err(|e| Error::FileRead(e).print())?;
        let (line, err) = Line::parse(input, idx, &raw);
        if let Some(err) = err {
            err.print_diag(&line);
            return Err(());
        }
        lines.push(line);
    }
    let labels = labels::collect(&lines);
    println!("  - found {} labels", labels.len());

    println!("2. Encode and Write Memory Image");
    println!("  > {}", output);
    let mut out =
        File::create(output).map_err(|e| Error::FileCreate(output.to_string(), e).print())?;

    let mut ip: u16 = 0;
    for line in &lines {
        if let Some(op) = &line.op {
            let inst = match encoder::encode(op, ip, &labels) {
                Ok(inst) => inst,
                Err(err) => {
                    err.print_diag(line);
                    return Err(());
                }
            };
            let [operand, opcode] = inst.encode();
            writeln!(out, "{:02X} {:02X}", operand, opcode)
                .map_err(|e| Error::FileWrite(output.to_string(), e).print())?;
            ip += 2;
        }
    }
    println!("  - {} bytes", ip);

    if dump {
        let mut ip: u16 = 0;
        for line in &lines {
            let inst = line
                .op
                .as_ref()
                .and_then(|op| encoder::encode(op, ip, &labels).ok());
            let pc = inst.is_some().then_some(ip);
            println!("{}", line.cformat(pc, inst));
            if line.op.is_some() {
                ip += 2;
            }
        }
        println!("+------+------+-------+------------------+");
    }

    Ok(())
}
