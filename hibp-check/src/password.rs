use std::io;

/// Where passwords come from. The terminal in the binary, a script in tests.
pub trait PasswordSource {
    fn read_password(&mut self) -> io::Result<Vec<u8>>;
}

/// Reads a password from the controlling terminal with echo disabled.
pub struct TerminalPassword {
    prompt: String,
}

impl TerminalPassword {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }
}

impl Default for TerminalPassword {
    fn default() -> Self {
        Self::with_prompt("Password (chars won't show)>> ")
    }
}

impl PasswordSource for TerminalPassword {
    fn read_password(&mut self) -> io::Result<Vec<u8>> {
        rpassword::prompt_password(&self.prompt).map(String::into_bytes)
    }
}

/// Hands out a fixed list of passwords, then reports end of input.
#[cfg(test)]
pub(crate) struct ScriptedPasswords(std::collections::VecDeque<Vec<u8>>);

#[cfg(test)]
impl ScriptedPasswords {
    pub(crate) fn new(passwords: &[&str]) -> Self {
        Self(passwords.iter().map(|p| p.as_bytes().to_vec()).collect())
    }
}

#[cfg(test)]
impl PasswordSource for ScriptedPasswords {
    fn read_password(&mut self) -> io::Result<Vec<u8>> {
        self.0
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more passwords"))
    }
}
