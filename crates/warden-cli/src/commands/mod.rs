pub mod hash;
pub mod init;
pub mod issue;
pub mod login;
pub mod verify;

use std::io::BufRead;

/// Use `value` if given, otherwise read one line from stdin.
pub(crate) fn value_or_stdin(value: Option<&str>, what: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']).to_string();
    if line.is_empty() {
        anyhow::bail!("no {} given on the command line or stdin", what);
    }
    Ok(line)
}
