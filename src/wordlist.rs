// src/wordlist.rs
// Loading word lists from the files named on the command line.
//
// Arguments come as `<file> [cap] <file> [cap] ...`. A file whose name contains
// ".csv" is split on commas, any other file gives one entry per line.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::defs::UNBOUNDED_CAP;
use crate::error::BingoError;
use crate::logging::log_info;
use crate::pouch::SourceList;

pub const USAGE: &str =
    "Usage: bingo-card <input_file_1> (<max_entries_1>) <input_file_2> (<max_entries_2>)...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    pub path: PathBuf,
    pub max_draws: Option<usize>,
}

// Matches -?\d+
fn is_integer(arg: &str) -> bool {
    let digits = arg.strip_prefix('-').unwrap_or(arg);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Turn a cap argument into a draw limit: -1 is unbounded, any other negative
/// value allows no draws.
pub fn cap_from_value(value: i64) -> Option<usize> {
    match value {
        UNBOUNDED_CAP => None,
        v if v < 0 => Some(0),
        v => Some(usize::try_from(v).unwrap_or(usize::MAX)),
    }
}

pub fn parse_list_args(args: &[String]) -> Result<Vec<ListSpec>, BingoError> {
    if args.is_empty() {
        return Err(BingoError::Usage(USAGE.to_string()));
    }

    let mut specs = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let file = &args[i];
        if is_integer(file) {
            return Err(BingoError::Usage(USAGE.to_string()));
        }

        let mut max_draws = None;
        if let Some(next) = args.get(i + 1).filter(|next| is_integer(next)) {
            let value = next
                .parse::<i64>()
                .map_err(|_| BingoError::Usage(USAGE.to_string()))?;
            max_draws = cap_from_value(value);
            i += 1;
        }

        specs.push(ListSpec {
            path: PathBuf::from(file),
            max_draws,
        });
        i += 1;
    }

    Ok(specs)
}

pub fn is_csv(path: &Path) -> bool {
    path.to_string_lossy().contains(".csv")
}

/// Split file content into entries. Blank entries are dropped.
pub fn parse_entries(content: &str, csv: bool) -> Vec<String> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if csv {
            entries.extend(line.split(',').map(str::to_string));
        } else {
            entries.push(line.to_string());
        }
    }
    entries.retain(|entry| !entry.trim().is_empty());
    entries
}

pub fn load_list(spec: &ListSpec) -> Result<SourceList, BingoError> {
    let content = fs::read_to_string(&spec.path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BingoError::FileNotFound(spec.path.clone()),
        _ => BingoError::Io {
            path: spec.path.clone(),
            message: e.to_string(),
        },
    })?;

    let entries = parse_entries(&content, is_csv(&spec.path));
    let name = spec.path.display().to_string();

    log_info(&format!(
        "Loaded {} entries from {} (cap: {})",
        entries.len(),
        name,
        spec.max_draws.map_or_else(|| "none".to_string(), |cap| cap.to_string())
    ));

    Ok(SourceList::named(&name, entries, spec.max_draws))
}

pub fn load_lists(args: &[String]) -> Result<Vec<SourceList>, BingoError> {
    parse_list_args(args)?.iter().map(load_list).collect()
}
