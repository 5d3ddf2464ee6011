//! Argument scanning.
//!
//! Every piece of information arrives as a flag followed by a fixed number
//! of values. The scanner walks the arguments left to right and yields one
//! typed [`Field`] per flag, in the order the flags were given.

use log::debug;
use thiserror::Error;

/// Leading character of every flag.
pub const FLAG_MARKER: char = '-';

/// Every flag the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Help,
    ExitCode,
    Distro,
    GitBranch,
    Hostname,
    Jobs,
    HistoryCount,
    GitStat,
    TimeTaken,
    Username,
    Cwd,
    /// Reserved for a right aligned segment, accepted and ignored.
    RightAlign,
}

impl Flag {
    pub const ALL: [Flag; 12] = [
        Flag::Help,
        Flag::ExitCode,
        Flag::Distro,
        Flag::GitBranch,
        Flag::Hostname,
        Flag::Jobs,
        Flag::HistoryCount,
        Flag::GitStat,
        Flag::TimeTaken,
        Flag::Username,
        Flag::Cwd,
        Flag::RightAlign,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.letter() == letter)
    }

    pub fn letter(self) -> char {
        match self {
            Flag::Help => 'h',
            Flag::ExitCode => 'c',
            Flag::Distro => 'd',
            Flag::GitBranch => 'g',
            Flag::Hostname => 'H',
            Flag::Jobs => 'j',
            Flag::HistoryCount => 'n',
            Flag::GitStat => 's',
            Flag::TimeTaken => 't',
            Flag::Username => 'u',
            Flag::Cwd => 'w',
            Flag::RightAlign => '-',
        }
    }

    /// Number of values following the flag
    pub fn arity(self) -> usize {
        match self {
            Flag::Help | Flag::RightAlign => 0,
            Flag::Jobs => 2,
            Flag::GitStat => 3,
            _ => 1,
        }
    }

    /// Whether a value starting with [`FLAG_MARKER`] counts as missing.
    ///
    /// Counts are never negative, so for multi-value flags a leading dash
    /// means the caller dropped a value and the next flag slid into its slot.
    pub fn rejects_flag_like_values(self) -> bool {
        self.arity() > 1
    }
}

/// One flag together with the values it captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    ExitStatus(&'a str),
    Distro(&'a str),
    GitBranch(&'a str),
    Hostname(&'a str),
    Jobs {
        background: &'a str,
        stopped: &'a str,
    },
    HistoryCount(&'a str),
    GitStat {
        modified: &'a str,
        added: &'a str,
        removed: &'a str,
    },
    TimeTaken(&'a str),
    Username(&'a str),
    Cwd(&'a str),
    RightAlign,
}

/// What the scanner found at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanned<'a> {
    Help,
    Field(Field<'a>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Incorrect argument, did not start with dash: {0}")]
    MalformedFlag(String),

    #[error("Missing argument for option {0}")]
    MissingArgument(String),

    #[error("Unrecognized option flag: {0}")]
    UnrecognizedOption(String),
}

/// Left to right walk over the arguments, program name excluded.
///
/// Stops yielding after the first error or help request.
#[derive(Debug)]
pub struct Scanner<'a> {
    args: &'a [String],
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self { args, position: 0 }
    }

    fn remaining(&self) -> &'a [String] {
        &self.args[self.position..]
    }

    /// Consume exactly `N` values following `token`.
    fn take<const N: usize>(
        &mut self,
        token: &str,
        flag: Flag,
    ) -> Result<[&'a str; N], ScanError> {
        let missing = || ScanError::MissingArgument(token.to_string());
        let values = self.remaining().get(..N).ok_or_else(missing)?;
        if flag.rejects_flag_like_values() && values.iter().any(|v| v.starts_with(FLAG_MARKER)) {
            return Err(missing());
        }
        self.position += N;
        Ok(std::array::from_fn(|i| values[i].as_str()))
    }

    fn value(&mut self, token: &str, flag: Flag) -> Result<&'a str, ScanError> {
        self.take::<1>(token, flag).map(|[value]| value)
    }

    fn scan_one(&mut self) -> Result<Scanned<'a>, ScanError> {
        let token = self.args[self.position].as_str();
        self.position += 1;

        let Some(rest) = token.strip_prefix(FLAG_MARKER) else {
            return Err(ScanError::MalformedFlag(token.to_string()));
        };
        let flag = rest
            .chars()
            .next()
            .and_then(Flag::from_letter)
            .ok_or_else(|| ScanError::UnrecognizedOption(token.to_string()))?;

        let field = match flag {
            Flag::Help => return Ok(Scanned::Help),
            Flag::RightAlign => Field::RightAlign,
            Flag::ExitCode => Field::ExitStatus(self.value(token, flag)?),
            Flag::Distro => Field::Distro(self.value(token, flag)?),
            Flag::GitBranch => Field::GitBranch(self.value(token, flag)?),
            Flag::Hostname => Field::Hostname(self.value(token, flag)?),
            Flag::HistoryCount => Field::HistoryCount(self.value(token, flag)?),
            Flag::TimeTaken => Field::TimeTaken(self.value(token, flag)?),
            Flag::Username => Field::Username(self.value(token, flag)?),
            Flag::Cwd => Field::Cwd(self.value(token, flag)?),
            Flag::Jobs => {
                let [background, stopped] = self.take::<2>(token, flag)?;
                Field::Jobs {
                    background,
                    stopped,
                }
            }
            Flag::GitStat => {
                let [modified, added, removed] = self.take::<3>(token, flag)?;
                Field::GitStat {
                    modified,
                    added,
                    removed,
                }
            }
        };
        debug!("scanned {:?}", field);
        Ok(Scanned::Field(field))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Scanned<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.args.len() {
            return None;
        }
        let scanned = self.scan_one();
        if matches!(scanned, Err(_) | Ok(Scanned::Help)) {
            self.position = self.args.len();
        }
        Some(scanned)
    }
}

/// Leading integer of `text`, the way C's `strtol` reads it.
///
/// Leading whitespace and a sign are accepted, anything after the digits is
/// ignored, and text without digits reads as zero.
pub fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}
