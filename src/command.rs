use crate::error::{DHTError, Result};
use core::fmt;
use core::str::FromStr;

/// Lines the host sends over the serial link
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Switches between the auto report line and the debug dump
    SendAuto(bool),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SendAuto(true) => f.write_str("SEND AUTO ON"),
            Command::SendAuto(false) => f.write_str("SEND AUTO OFF"),
        }
    }
}

impl FromStr for Command {
    type Err = DHTError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let mut next_is = |expected: &str| {
            words
                .next()
                .map_or(false, |word| word.eq_ignore_ascii_case(expected))
        };

        if !(next_is("SEND") && next_is("AUTO")) {
            return Err(DHTError::UnknownCommandError);
        }

        let command = match words.next() {
            Some(word) if word.eq_ignore_ascii_case("ON") => Command::SendAuto(true),
            Some(word) if word.eq_ignore_ascii_case("OFF") => Command::SendAuto(false),
            _ => return Err(DHTError::UnknownCommandError),
        };

        match words.next() {
            None => Ok(command),
            Some(_) => Err(DHTError::UnknownCommandError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SEND AUTO ON", Command::SendAuto(true))]
    #[case("SEND AUTO OFF\r\n", Command::SendAuto(false))]
    #[case("  send  auto on ", Command::SendAuto(true))]
    fn parses(#[case] line: &str, #[case] command: Command) {
        assert_eq!(line.parse(), Ok(command));
    }

    #[rstest]
    #[case("")]
    #[case("SEND AUTO")]
    #[case("SEND AUTO MAYBE")]
    #[case("SEND AUTO ON NOW")]
    #[case("AUTO ON")]
    fn rejects(#[case] line: &str) {
        assert_eq!(line.parse::<Command>(), Err(DHTError::UnknownCommandError));
    }

    #[test]
    fn renders_canonical_line() {
        for command in [Command::SendAuto(true), Command::SendAuto(false)] {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }
}
