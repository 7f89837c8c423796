//! Line prompts on an interactive terminal.
//!
//! End of input means the user dismissed the prompt. When editing, an empty
//! line keeps the current value and [`CLEAR_SENTINEL`] clears it.

use std::io::{self, BufRead, Write};

/// Answer that replaces the current value with an empty one.
pub const CLEAR_SENTINEL: &str = "-";

/// Asks for a replacement of `current`; `None` when input is closed.
pub fn ask_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
) -> io::Result<Option<String>> {
    if current.is_empty() {
        write!(output, "{label}: ")?;
    } else {
        write!(
            output,
            "{label} [{current}] (Enter keeps, {CLEAR_SENTINEL} clears): "
        )?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim_end_matches(['\n', '\r']);
    let value = match answer {
        "" => current,
        CLEAR_SENTINEL => "",
        other => other,
    };
    Ok(Some(value.to_string()))
}

/// Asks a yes/no question; only `y`/`yes` confirm.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
