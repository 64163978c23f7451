//! Implements the command line behavior.

use std::fs;
use std::path::PathBuf;

use ezstate_bytecode::disassemble;
use ezstate_decompiler::{decompile, encode, DecodeOptions, Decompiled, Framing};
use log::debug;
use serde_json::json;

use crate::metadata::CommandMetadata;

/// Where the bytecode comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Hex digits, optionally separated by whitespace.
    Hex(String),
    /// A file containing raw bytecode.
    File(PathBuf),
}

impl Source {
    pub fn read(&self) -> Result<Vec<u8>, String> {
        match self {
            Source::Hex(text) => {
                let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                hex::decode(&digits).map_err(|e| format!("Invalid hex input: {e}"))
            }
            Source::File(path) => {
                fs::read(path).map_err(|e| format!("Unable to read {}: {e}", path.display()))
            }
        }
    }
}

/// The input and settings shared by the subcommands.
#[derive(Clone, Debug)]
pub struct Request {
    pub source: Source,
    pub commands: Option<PathBuf>,
    pub require_terminator: bool,
}

impl Request {
    fn load(&self) -> Result<(Vec<u8>, CommandMetadata), String> {
        let bytes = self.source.read()?;
        let commands = match &self.commands {
            Some(path) => CommandMetadata::from_path(path)?,
            None => CommandMetadata::default(),
        };
        debug!(
            "Loaded {} bytes and {} commands",
            bytes.len(),
            commands.len()
        );
        Ok((bytes, commands))
    }

    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            require_terminator: self.require_terminator,
            ..DecodeOptions::default()
        }
    }

    fn decompile(&self, bytes: &[u8], commands: &CommandMetadata) -> Result<Decompiled, String> {
        decompile(bytes, commands, &self.options()).map_err(|e| format!("Unable to decompile: {e}"))
    }
}

/// Prints the expression as infix text.
pub fn decode(request: &Request) -> Result<(), String> {
    println!("{}", decode_text(request)?);
    Ok(())
}

pub fn decode_text(request: &Request) -> Result<String, String> {
    let (bytes, commands) = request.load()?;
    let decompiled = request.decompile(&bytes, &commands)?;
    Ok(decompiled.expr.to_infix_text_with(&commands))
}

/// Prints a JSON listing of the instructions and, when the buffer forms a
/// valid expression, its infix text.
pub fn disasm(request: &Request) -> Result<(), String> {
    println!("{}", disasm_text(request)?);
    Ok(())
}

pub fn disasm_text(request: &Request) -> Result<String, String> {
    let (bytes, commands) = request.load()?;
    let listing = disassemble(&bytes).map_err(|e| format!("Unable to disassemble: {e}"))?;

    let instructions: Vec<_> = listing
        .iter()
        .map(|entry| {
            json!({
                "offset": entry.offset,
                "bytes": hex::encode(&bytes[entry.offset..entry.offset + entry.length]),
                "instruction": entry.instruction.to_string(),
            })
        })
        .collect();

    let expression = match request.decompile(&bytes, &commands) {
        Ok(decompiled) => json!({
            "text": decompiled.expr.to_infix_text_with(&commands),
            "terminated": decompiled.framing == Framing::Terminated,
            "max_stack_depth": decompiled.max_stack_depth,
        }),
        Err(e) => json!({ "error": e }),
    };

    serde_json::to_string_pretty(&json!({
        "instructions": instructions,
        "expression": expression,
    }))
    .map_err(|e| format!("Unable to write listing: {e}"))
}

/// Decodes, re-encodes and checks that the bytes are unchanged.
pub fn roundtrip(request: &Request) -> Result<(), String> {
    println!("{}", roundtrip_text(request)?);
    Ok(())
}

pub fn roundtrip_text(request: &Request) -> Result<String, String> {
    let (bytes, commands) = request.load()?;
    let decompiled = request.decompile(&bytes, &commands)?;
    let encoded =
        encode(&decompiled.expr, decompiled.framing).map_err(|e| format!("Unable to encode: {e}"))?;

    if encoded != bytes {
        return Err(format!(
            "Round trip changed the bytes: {} became {}",
            hex::encode(&bytes),
            hex::encode(&encoded)
        ));
    }

    let framing = match decompiled.framing {
        Framing::Terminated => "terminated",
        Framing::Unterminated => "unterminated",
    };
    Ok(format!(
        "identical: {} bytes, {framing}, max stack depth {}",
        bytes.len(),
        decompiled.max_stack_depth
    ))
}
