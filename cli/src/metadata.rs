//! Command metadata loaded from a JSON file.
//!
//! The file lists the commands of each bank with their argument counts and
//! optional display names:
//!
//! ```json
//! {"commands": [{"bank": 6, "id": 12, "name": "SetEventFlag", "args": 2}]}
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ezstate_decompiler::ArgCount;
use ezstate_expr::Symbols;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CommandInfo {
    pub bank: u8,
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    pub args: usize,
}

#[derive(Debug, Default, Deserialize)]
struct CommandFile {
    #[serde(default)]
    commands: Vec<CommandInfo>,
}

/// Commands indexed by bank and id.
#[derive(Clone, Debug, Default)]
pub struct CommandMetadata {
    commands: HashMap<(u8, i32), CommandInfo>,
}

impl CommandMetadata {
    /// Parses metadata from JSON text. A later entry for the same command
    /// replaces an earlier one.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: CommandFile = serde_json::from_str(text)?;
        Ok(file.commands.into_iter().collect())
    }

    pub fn from_path(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Unable to read command metadata {}: {e}", path.display()))?;
        CommandMetadata::from_json(&text)
            .map_err(|e| format!("Invalid command metadata {}: {e}", path.display()))
    }

    pub fn get(&self, bank: u8, id: i32) -> Option<&CommandInfo> {
        self.commands.get(&(bank, id))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<CommandInfo> for CommandMetadata {
    fn from_iter<I: IntoIterator<Item = CommandInfo>>(iter: I) -> Self {
        CommandMetadata {
            commands: iter
                .into_iter()
                .map(|info| ((info.bank, info.id), info))
                .collect(),
        }
    }
}

impl ArgCount for CommandMetadata {
    fn arg_count(&self, bank: u8, id: i32) -> Option<usize> {
        self.get(bank, id).map(|info| info.args)
    }
}

impl Symbols for CommandMetadata {
    fn command(&self, bank: u8, id: i32) -> String {
        match self.get(bank, id).and_then(|info| info.name.as_deref()) {
            Some(name) => name.to_string(),
            None => format!("c{bank}_{id}"),
        }
    }
}
