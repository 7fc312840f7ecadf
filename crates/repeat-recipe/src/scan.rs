//! Line scanner for recipe text
//!
//! The scanner is a pure transition function over an explicit state: feed it
//! one line (with its newline) and it returns the next state plus whatever
//! statements that line completed. A payload stays open until its text ends
//! with `|` and a newline *and* the next line is a recognized command; until
//! then every line, command-like or not, belongs to the payload.

use crate::{Error, Result};

/// A complete recipe statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Version { value: String, line: usize },
    Key(String),
    Copy(String),
    Update(String),
    Insert {
        file: String,
        position: usize,
        text: String,
    },
    Removal {
        file: String,
        position: usize,
    },
    Baseline {
        path: String,
        text: String,
    },
    /// Blank line outside any payload
    Blank { line: usize },
}

/// The kind of payload currently being accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenBlock {
    Key,
    Insert { file: String, position: usize },
    Removal { file: String, position: usize },
    Baseline { path: String },
}

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Between statements. `file` is the target of `+`/`-` lines.
    Ready { file: Option<String> },
    /// Inside a `|...|` payload.
    Payload {
        file: Option<String>,
        block: OpenBlock,
        text: String,
    },
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Ready { file: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Version,
    Key,
    Copy,
    Update,
    Insert,
    Removal,
    File,
}

impl Command {
    fn detect(line: &str) -> Option<Self> {
        let head = line.split('\t').next()?;
        match head {
            "VERSION" => Some(Command::Version),
            "KEY" => Some(Command::Key),
            "COPY" => Some(Command::Copy),
            "UPDATE" => Some(Command::Update),
            "+" => Some(Command::Insert),
            "-" => Some(Command::Removal),
            "FILE" => Some(Command::File),
            _ => None,
        }
    }
}

/// Advance the scanner by one line.
///
/// `line_no` is 1-based and only used for diagnostics.
pub fn step(state: ScanState, line: &str, line_no: usize) -> Result<(ScanState, Vec<Statement>)> {
    match state {
        ScanState::Payload {
            file,
            block,
            mut text,
        } => {
            if let (Some(command), Some(value)) = (Command::detect(line), terminated(&text)) {
                let finished = close(block, value);
                let (next, mut statements) = command_line(file, command, line, line_no)?;
                statements.insert(0, finished);
                return Ok((next, statements));
            }
            text.push_str(line);
            Ok((ScanState::Payload { file, block, text }, Vec::new()))
        }
        ScanState::Ready { file } => {
            if line.starts_with('#') {
                return Ok((ScanState::Ready { file }, Vec::new()));
            }
            match Command::detect(line) {
                Some(command) => command_line(file, command, line, line_no),
                None if line.trim().is_empty() => Ok((
                    ScanState::Ready { file },
                    vec![Statement::Blank { line: line_no }],
                )),
                None => Err(Error::parse(
                    line_no,
                    format!(
                        "command '{}' not understood",
                        line.split('\t').next().unwrap_or_default().trim_end()
                    ),
                )),
            }
        }
    }
}

/// Close the scanner at end of input.
///
/// An open payload must end with a pipe. Newlines and spaces after that
/// final pipe are dropped, so trailing blank lines do not reopen it.
pub fn finish(state: ScanState) -> Result<Option<Statement>> {
    match state {
        ScanState::Ready { .. } => Ok(None),
        ScanState::Payload { block, text, .. } => {
            match text.trim_end_matches(['\n', '\r', ' ']).strip_suffix('|') {
                Some(value) => Ok(Some(close(block, value))),
                None => Err(Error::unterminated(&text)),
            }
        }
    }
}

/// Payload text without its closing pipe and newline, if it has them.
fn terminated(text: &str) -> Option<&str> {
    text.strip_suffix("|\n")
        .or_else(|| text.strip_suffix("|\r\n"))
}

fn close(block: OpenBlock, value: &str) -> Statement {
    let value = value.to_string();

    match block {
        OpenBlock::Key => Statement::Key(value),
        OpenBlock::Insert { file, position } => Statement::Insert {
            file,
            position,
            text: value,
        },
        OpenBlock::Removal { file, position } => Statement::Removal { file, position },
        OpenBlock::Baseline { path } => Statement::Baseline { path, text: value },
    }
}

fn command_line(
    file: Option<String>,
    command: Command,
    line: &str,
    line_no: usize,
) -> Result<(ScanState, Vec<Statement>)> {
    let mut fields = line.splitn(3, '\t');
    fields.next();
    let second = fields.next();
    let third = fields.next();

    let ready = |file: Option<String>, statements: Vec<Statement>| -> Result<_> {
        Ok((ScanState::Ready { file }, statements))
    };

    match command {
        Command::Version => {
            let value = required_field(second, line_no, "VERSION expects a version")?;
            ready(
                None,
                vec![Statement::Version {
                    value,
                    line: line_no,
                }],
            )
        }
        Command::Key => {
            // Keys may contain tabs, so take everything after the command
            let rest = line.split_once('\t').map(|(_, rest)| rest);
            let text = open_payload(rest, line_no, "KEY expects a key |..|")?;
            Ok((
                ScanState::Payload {
                    file: None,
                    block: OpenBlock::Key,
                    text,
                },
                Vec::new(),
            ))
        }
        Command::Copy => {
            let path = required_field(second, line_no, "COPY expects a relative path")?;
            ready(None, vec![Statement::Copy(path)])
        }
        Command::Update => {
            let path = required_field(second, line_no, "UPDATE expects a relative path")?;
            ready(Some(path.clone()), vec![Statement::Update(path)])
        }
        Command::Insert => {
            let target = update_target(file, line_no, '+')?;
            let position = parse_position(second, line_no)?;
            let text = open_payload(third, line_no, "+ expects contents |..|")?;
            Ok((
                ScanState::Payload {
                    file: Some(target.clone()),
                    block: OpenBlock::Insert {
                        file: target,
                        position,
                    },
                    text,
                },
                Vec::new(),
            ))
        }
        Command::Removal => {
            let target = update_target(file, line_no, '-')?;
            let position = parse_position(second, line_no)?;
            match third.filter(|payload| payload.starts_with('|')) {
                // The removed text is informational only
                Some(payload) => Ok((
                    ScanState::Payload {
                        file: Some(target.clone()),
                        block: OpenBlock::Removal {
                            file: target,
                            position,
                        },
                        text: payload[1..].to_string(),
                    },
                    Vec::new(),
                )),
                None => ready(
                    Some(target.clone()),
                    vec![Statement::Removal {
                        file: target,
                        position,
                    }],
                ),
            }
        }
        Command::File => {
            let path = required_field(second, line_no, "FILE expects a relative path")?;
            let text = open_payload(third, line_no, "FILE expects contents |..|")?;
            Ok((
                ScanState::Payload {
                    file: Some(path.clone()),
                    block: OpenBlock::Baseline { path },
                    text,
                },
                Vec::new(),
            ))
        }
    }
}

fn required_field(field: Option<&str>, line_no: usize, message: &str) -> Result<String> {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::parse(line_no, message)),
    }
}

fn open_payload(field: Option<&str>, line_no: usize, message: &str) -> Result<String> {
    match field.and_then(|payload| payload.strip_prefix('|')) {
        Some(text) => Ok(text.to_string()),
        None => Err(Error::parse(line_no, message)),
    }
}

fn update_target(file: Option<String>, line_no: usize, op: char) -> Result<String> {
    file.filter(|f| !f.is_empty()).ok_or_else(|| {
        Error::parse(
            line_no,
            format!("{op} expects a previous UPDATE statement with a relative file path"),
        )
    })
}

fn parse_position(field: Option<&str>, line_no: usize) -> Result<usize> {
    let raw = field.map(str::trim).unwrap_or_default();
    raw.parse().map_err(|_| {
        Error::parse(
            line_no,
            format!("position '{raw}' is not a non-negative number"),
        )
    })
}
