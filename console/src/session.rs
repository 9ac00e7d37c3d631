//! Interactive loop: read a command, apply it to the page, re-render.

use std::io::{BufRead, Write};

use spycats_core::{render, SpyCatController, Transport};

use crate::command::{Command, HELP};

/// Drive `page` from `input` until `quit` or end of input.
///
/// The page is loaded once up front. Delete prompts read their answer from
/// the same input; anything other than `y`/`yes` declines.
pub fn run<R, W, T>(page: &mut SpyCatController, transport: &T, mut input: R, mut output: W) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    T: Transport + ?Sized,
{
    page.load(transport);
    write!(output, "{}", render(page))?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };
        tracing::debug!(?command, "applying command");

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::List => page.load(transport),
            Command::Set { field, value } => page.set_form_field(field, value),
            Command::Add => page.submit(transport),
            Command::Edit { id } => {
                if page.cat(id).is_none() {
                    writeln!(output, "no spy cat with id {id}")?;
                    continue;
                }
                page.begin_edit(id);
            }
            Command::Salary { value } => {
                if page.editing().is_none() {
                    writeln!(output, "nothing is being edited, use 'edit <id>' first")?;
                    continue;
                }
                page.set_edit_salary(value);
            }
            Command::Confirm => page.confirm_edit(transport),
            Command::Cancel => page.cancel_edit(),
            Command::Delete { id } => {
                let confirm = |prompt: &str| ask(&mut input, &mut output, prompt);
                page.delete(id, confirm, transport);
            }
        }
        write!(output, "{}", render(page))?;
    }
    Ok(())
}

/// Blocking yes/no question. I/O failures count as "no".
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if write!(output, "{prompt} [y/N] ").and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
