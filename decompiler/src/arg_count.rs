use std::collections::{BTreeMap, HashMap};

/// Supplies the number of arguments a command consumes.
///
/// Command calls do not encode their arity in the bytecode, so the caller
/// provides it from command metadata keyed by bank and command id.
pub trait ArgCount {
    fn arg_count(&self, bank: u8, id: i32) -> Option<usize>;
}

/// No command metadata; every command call fails to decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCommands;

impl ArgCount for NoCommands {
    fn arg_count(&self, _bank: u8, _id: i32) -> Option<usize> {
        None
    }
}

impl ArgCount for HashMap<(u8, i32), usize> {
    fn arg_count(&self, bank: u8, id: i32) -> Option<usize> {
        self.get(&(bank, id)).copied()
    }
}

impl ArgCount for BTreeMap<(u8, i32), usize> {
    fn arg_count(&self, bank: u8, id: i32) -> Option<usize> {
        self.get(&(bank, id)).copied()
    }
}

impl<T: ArgCount + ?Sized> ArgCount for &T {
    fn arg_count(&self, bank: u8, id: i32) -> Option<usize> {
        (**self).arg_count(bank, id)
    }
}
