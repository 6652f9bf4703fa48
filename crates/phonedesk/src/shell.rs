//! Line-oriented form session.
//!
//! Each input line edits a form field or presses a button; alerts are
//! written back one per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::Result;
use crate::form::UserForm;
use crate::screen::{Button, Screen};

/// Help text listing the shell commands.
pub const HELP: &str = "\
Commands:
  name <text>    set the name field
  phone <text>   set the phone field
  age <text>     set the age field
  insert         add the user in the form
  update         update the user with the form's phone number
  delete         delete the user with the form's phone number
  view           load the user with the form's phone number
  show           print the form
  clear          empty the form
  help           print this help
  quit           leave the shell";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the name field.
    SetName(String),
    /// Set the phone field.
    SetPhone(String),
    /// Set the age field.
    SetAge(String),
    /// Press a button.
    Press(Button),
    /// Print the form.
    Show,
    /// Empty the form.
    Clear,
    /// Print the help text.
    Help,
    /// Leave the shell.
    Quit,
    /// Blank line.
    Nothing,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a hint to show the user if the command is not recognized.
pub fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let value = rest.trim().to_string();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Nothing,
        "name" => ShellCommand::SetName(value),
        "phone" => ShellCommand::SetPhone(value),
        "age" => ShellCommand::SetAge(value),
        "insert" => ShellCommand::Press(Button::Insert),
        "update" => ShellCommand::Press(Button::Update),
        "delete" => ShellCommand::Press(Button::Delete),
        "view" => ShellCommand::Press(Button::View),
        "show" => ShellCommand::Show,
        "clear" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (type 'help')")),
    };
    Ok(command)
}

/// Render the form fields for display.
#[must_use]
pub fn render_form(form: &UserForm) -> String {
    format!(
        "Name:  {}\nPhone: {}\nAge:   {}",
        form.name, form.phone, form.age
    )
}

/// Run a session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(screen: &Screen, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Nothing) => continue,
            Ok(command) => execute(screen, command).await,
            Err(hint) => Some(hint),
        };
        if let Some(reply) = reply {
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
    }
    output.flush().await?;
    debug!("Shell session ended");
    Ok(())
}

async fn execute(screen: &Screen, command: ShellCommand) -> Option<String> {
    match command {
        ShellCommand::SetName(name) => screen.set_name(name),
        ShellCommand::SetPhone(phone) => screen.set_phone(phone),
        ShellCommand::SetAge(age) => screen.set_age(age),
        ShellCommand::Press(button) => {
            return match screen.press(button).await {
                Some(alert) if alert.is_error() => Some(format!("error: {alert}")),
                Some(alert) => Some(alert.to_string()),
                // A successful view fills the form; show what was loaded
                None if button == Button::View => Some(render_form(&screen.form())),
                None => None,
            };
        }
        ShellCommand::Show => return Some(render_form(&screen.form())),
        ShellCommand::Clear => screen.clear_form(),
        ShellCommand::Help => return Some(HELP.to_string()),
        ShellCommand::Quit | ShellCommand::Nothing => {}
    }
    None
}
