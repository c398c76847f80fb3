use crate::parser::Line;
use color_print::cprintln;
use indexmap::IndexMap;

/// Label → byte address bindings, complete after pass 1 and read-only from
/// then on.
#[derive(Debug, Default)]
pub struct Labels(IndexMap<String, u16>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    pub fn insert(&mut self, name: String, addr: u16) -> Option<u16> {
        self.0.insert(name, addr)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pass 1: bind each label to the current IP and advance the IP by 2 per
/// instruction. A label on a line with no statement binds to the address of
/// the next instruction. Redefinition keeps the later binding; a warning is
/// printed so the overwrite does not go unnoticed.
pub fn collect(lines: &[Line]) -> Labels {
    let mut labels = Labels::new();
    let mut ip: u16 = 0;
    for line in lines {
        if let Some(name) = &line.label {
            if labels.insert(name.clone(), ip).is_some() {
                cprintln!("<yellow,bold>warn</>: Re-defined label: `{}`", name);
                cprintln!("     <blue>--></> <underline>{}</>", line.pos());
            }
        }
        if line.op.is_some() {
            ip += 2;
        }
    }
    labels
}
