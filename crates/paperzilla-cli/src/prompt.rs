//! Terminal implementation of the login prompts.

use std::io::{self, BufRead, Write};

use paperzilla_core::auth::{Prompter, SessionEvent};

/// Reads login input from the terminal. Prompts and notices go to stderr
/// so that stdout stays clean for `--json` output.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn email(&mut self) -> io::Result<String> {
        read_line_with_prompt("Email: ", &mut io::stdin().lock(), &mut io::stderr())
    }

    fn code(&mut self) -> io::Result<String> {
        rpassword::prompt_password("Check your email, enter the code: ")
    }

    fn notify(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::NotLoggedIn => eprintln!("Not logged in."),
            SessionEvent::RefreshFailed(reason) => eprintln!("Token refresh failed: {}", reason),
            SessionEvent::SendingCode => eprintln!("Sending magic link..."),
            SessionEvent::LoggedIn => eprintln!("Logged in!"),
        }
    }
}

/// Write `prompt`, then read one line. End of input is an error.
fn read_line_with_prompt(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no input entered",
        ));
    }
    Ok(line)
}
