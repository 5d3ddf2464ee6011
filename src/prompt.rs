use log::debug;
use std::borrow::Cow;

use crate::args::{Field, ScanError, Scanned, Scanner, leading_int};
use crate::buffer::PromptBuffer;
use crate::colorscheme::{
    ADDED, BOLD, Colorscheme, GIT_ICON, MODIFIED, Paint, REMOVED, Scheme, UBUNTU_ICON,
};
use crate::signal::SignalNames;

pub const SUCCESS: &str = "✅";
pub const FAILURE: &str = "❌";
pub const CANNOT_EXECUTE: &str = "🚫";
pub const NOT_FOUND: &str = "❓";
pub const INTERRUPTED: &str = "⚠️";

// Nerd font glyphs
pub const BROKEN_PIPE: &str = "\u{f127}";
pub const SUSPENDED: &str = "\u{f04c}";
pub const HOME_ICON: &str = "\u{f015}";
pub const FOLDER_ICON: &str = "\u{f07c}";
pub const UBUNTU_LOGO: &str = "\u{f31c}";
pub const GIT_LOGO: &str = "\u{f02a2}";
pub const BACKGROUND_JOB_ICON: &str = "\u{f013}";
pub const STOPPED_JOB_ICON: &str = "\u{f04c}";

/// Result of a full pass over the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// `-h` was given, nothing was rendered
    Help,
    Prompt(String),
}

/// Render the prompt for `args` (program name excluded).
///
/// Fields are formatted while scanning, in argument order. Nothing is
/// returned on a help request or a scan error.
pub fn render(
    args: &[String],
    scheme: Scheme,
    signals: &dyn SignalNames,
) -> Result<Render, ScanError> {
    let mut renderer = Renderer::new(scheme.colorscheme(), signals);
    for scanned in Scanner::new(args) {
        match scanned? {
            Scanned::Help => return Ok(Render::Help),
            Scanned::Field(field) => renderer.field(field),
        }
    }
    debug!("rendered with the {} colorscheme", scheme);
    Ok(Render::Prompt(renderer.finish()))
}

/// Glyph shown for the exit status of the last command.
///
/// Statuses above 128 are `128 + signal number`.
pub fn exit_glyph(status: u8, signals: &dyn SignalNames) -> Cow<'static, str> {
    if status > 128 {
        let signal = status - 128;
        return match i32::from(signal) {
            libc::SIGINT => Cow::Borrowed(INTERRUPTED),
            libc::SIGPIPE => Cow::Borrowed(BROKEN_PIPE),
            libc::SIGTSTP => Cow::Borrowed(SUSPENDED),
            _ => Cow::Owned(signals.name(signal)),
        };
    }
    Cow::Borrowed(match status {
        0 => SUCCESS,
        1 => FAILURE,
        126 => CANNOT_EXECUTE,
        127 => NOT_FOUND,
        _ => "",
    })
}

/// Formats fields into a bounded prompt buffer.
///
/// Every field is formatted from its own values and the colorscheme only;
/// the opening frame is written on construction, the closing one by
/// [`Renderer::finish`].
pub struct Renderer<'a> {
    colors: Colorscheme,
    signals: &'a dyn SignalNames,
    buffer: PromptBuffer,
}

impl<'a> Renderer<'a> {
    pub fn new(colors: Colorscheme, signals: &'a dyn SignalNames) -> Self {
        let mut renderer = Self {
            colors,
            signals,
            buffer: PromptBuffer::default(),
        };
        renderer.emit(format!("      {BOLD}{}┏━ ", Paint(colors.text)));
        renderer
    }

    fn emit(&mut self, fragment: String) {
        self.buffer.append(&fragment);
    }

    pub fn field(&mut self, field: Field<'_>) {
        match field {
            Field::ExitStatus(code) => self.exit_status(code),
            Field::Distro(distro) => self.distro(distro),
            Field::GitBranch(branch) => self.git_branch(branch),
            Field::Hostname(hostname) => self.hostname(hostname),
            Field::Jobs {
                background,
                stopped,
            } => self.jobs(background, stopped),
            Field::HistoryCount(count) => self.history_count(count),
            Field::GitStat {
                modified,
                added,
                removed,
            } => self.git_stat(modified, added, removed),
            Field::TimeTaken(duration) => self.time_taken(duration),
            Field::Username(user) => self.username(user),
            Field::Cwd(cwd) => self.cwd(cwd),
            Field::RightAlign => debug!("right aligned segment is reserved, ignoring"),
        }
    }

    pub fn exit_status(&mut self, code: &str) {
        // wraps like the shell's 8 bit exit status
        let status = leading_int(code) as u8;
        let glyph = exit_glyph(status, self.signals);
        self.emit(format!(" {glyph}"));
    }

    pub fn cwd(&mut self, cwd: &str) {
        let (icon, name) = match cwd.chars().next() {
            Some('~') => (HOME_ICON, "home"),
            Some('/') => (FOLDER_ICON, "root"),
            _ => (FOLDER_ICON, cwd),
        };
        self.emit(format!(
            "{} in {}{icon} {name}",
            Paint(self.colors.preposition),
            Paint(self.colors.cwd)
        ));
    }

    pub fn username(&mut self, user: &str) {
        self.emit(format!("{}{user}", Paint(self.colors.username)));
    }

    pub fn hostname(&mut self, hostname: &str) {
        self.emit(format!(
            "{} on {}{hostname}",
            Paint(self.colors.preposition),
            Paint(self.colors.hostname)
        ));
    }

    pub fn distro(&mut self, distro: &str) {
        if distro.contains("Ubuntu") {
            self.emit(format!("{}{UBUNTU_LOGO} ", Paint(UBUNTU_ICON)));
        } else {
            self.emit(format!("{distro} "));
        }
    }

    pub fn git_branch(&mut self, branch: &str) {
        if branch.is_empty() {
            return;
        }
        self.emit(format!(
            " {}at {}{GIT_LOGO}{}{branch}",
            Paint(self.colors.preposition),
            Paint(GIT_ICON),
            Paint(self.colors.git)
        ));
    }

    /// Each non-zero count gets its own fragment.
    pub fn git_stat(&mut self, modified: &str, added: &str, removed: &str) {
        let stats = [
            (leading_int(modified), '~', MODIFIED),
            (leading_int(added), '+', ADDED),
            (leading_int(removed), '-', REMOVED),
        ];
        for (count, sign, color) in stats {
            if count != 0 {
                self.emit(format!(" {}{sign}{count}", Paint(color)));
            }
        }
    }

    pub fn time_taken(&mut self, duration: &str) {
        self.emit(format!("{} took {duration}", Paint(self.colors.time)));
    }

    pub fn history_count(&mut self, count: &str) {
        self.emit(format!("{} {count}#", Paint(self.colors.history_count)));
    }

    pub fn jobs(&mut self, background: &str, stopped: &str) {
        let background = leading_int(background);
        let stopped = leading_int(stopped);
        let text = match (background > 0, stopped > 0) {
            (true, true) => format!(
                "{BACKGROUND_JOB_ICON} {background}/{STOPPED_JOB_ICON} {stopped}"
            ),
            (true, false) => format!("{BACKGROUND_JOB_ICON} {background}"),
            (false, true) => format!("{STOPPED_JOB_ICON} {stopped}"),
            (false, false) => return,
        };
        self.emit(format!(" {}{text}", Paint(self.colors.job)));
    }

    /// Close the frame and hand out the prompt.
    pub fn finish(mut self) -> String {
        self.emit(format!("\n{}┗━ $ ", Paint(self.colors.text)));
        debug!("prompt is {} bytes", self.buffer.len());
        self.buffer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PROMPT_CAPACITY;

    fn names(signal: u8) -> String {
        format!("signal {signal}")
    }

    fn colors() -> Colorscheme {
        Colorscheme::default()
    }

    fn header() -> String {
        format!("      {BOLD}{}┏━ ", Paint(colors().text))
    }

    fn footer() -> String {
        format!("\n{}┗━ $ ", Paint(colors().text))
    }

    /// Fragments written by `write`, frame excluded.
    fn fragments(write: impl FnOnce(&mut Renderer)) -> String {
        let signals = names;
        let mut renderer = Renderer::new(colors(), &signals);
        write(&mut renderer);
        let text = renderer.buffer.into_string();
        text[header().len()..].to_string()
    }

    fn run(list: &[&str]) -> Result<Render, ScanError> {
        let args: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        render(&args, Scheme::default(), &names)
    }

    fn prompt(list: &[&str]) -> String {
        match run(list) {
            Ok(Render::Prompt(prompt)) => prompt,
            other => panic!("expected a prompt, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_glyph_plain_statuses() {
        assert_eq!(exit_glyph(0, &names), SUCCESS);
        assert_eq!(exit_glyph(1, &names), FAILURE);
        assert_eq!(exit_glyph(126, &names), CANNOT_EXECUTE);
        assert_eq!(exit_glyph(127, &names), NOT_FOUND);
        assert_eq!(exit_glyph(42, &names), "");
        assert_eq!(exit_glyph(128, &names), "");
    }

    #[test]
    fn test_exit_glyph_signals() {
        assert_eq!(exit_glyph(130, &names), INTERRUPTED);
        assert_eq!(exit_glyph(141, &names), BROKEN_PIPE);
        assert_eq!(exit_glyph(128 + libc::SIGTSTP as u8, &names), SUSPENDED);
        assert_eq!(exit_glyph(137, &names), "signal 9");
        assert_eq!(exit_glyph(255, &names), "signal 127");
    }

    #[test]
    fn test_exit_status_fragment() {
        assert_eq!(fragments(|r| r.exit_status("0")), format!(" {SUCCESS}"));
        assert_eq!(fragments(|r| r.exit_status("1")), format!(" {FAILURE}"));
        assert_eq!(fragments(|r| r.exit_status("42")), " ");
        assert_eq!(fragments(|r| r.exit_status("130")), format!(" {INTERRUPTED}"));
    }

    #[test]
    fn test_exit_status_wraps_to_u8() {
        assert_eq!(fragments(|r| r.exit_status("256")), format!(" {SUCCESS}"));
        assert_eq!(fragments(|r| r.exit_status("257")), format!(" {FAILURE}"));
        assert_eq!(fragments(|r| r.exit_status("-1")), " signal 127");
        assert_eq!(fragments(|r| r.exit_status("abc")), format!(" {SUCCESS}"));
    }

    #[test]
    fn test_cwd_home() {
        let expected = format!(
            "{} in {}{HOME_ICON} home",
            Paint(colors().preposition),
            Paint(colors().cwd)
        );
        assert_eq!(fragments(|r| r.cwd("~/src/prompt")), expected);
    }

    #[test]
    fn test_cwd_root_and_relative() {
        let prefix = format!("{} in {}", Paint(colors().preposition), Paint(colors().cwd));
        assert_eq!(
            fragments(|r| r.cwd("/etc")),
            format!("{prefix}{FOLDER_ICON} root")
        );
        assert_eq!(
            fragments(|r| r.cwd("prompt")),
            format!("{prefix}{FOLDER_ICON} prompt")
        );
        assert_eq!(fragments(|r| r.cwd("")), format!("{prefix}{FOLDER_ICON} "));
    }

    #[test]
    fn test_username_and_hostname() {
        assert_eq!(
            fragments(|r| r.username("alice")),
            format!("{}alice", Paint(colors().username))
        );
        assert_eq!(
            fragments(|r| r.hostname("box")),
            format!(
                "{} on {}box",
                Paint(colors().preposition),
                Paint(colors().hostname)
            )
        );
    }

    #[test]
    fn test_distro() {
        assert_eq!(
            fragments(|r| r.distro("Ubuntu 24.04 LTS")),
            format!("{}{UBUNTU_LOGO} ", Paint(UBUNTU_ICON))
        );
        assert_eq!(fragments(|r| r.distro("Arch")), "Arch ");
    }

    #[test]
    fn test_git_branch() {
        assert_eq!(
            fragments(|r| r.git_branch("main")),
            format!(
                " {}at {}{GIT_LOGO}{}main",
                Paint(colors().preposition),
                Paint(GIT_ICON),
                Paint(colors().git)
            )
        );
        assert_eq!(fragments(|r| r.git_branch("")), "");
    }

    #[test]
    fn test_git_stat_suppresses_zeros() {
        assert_eq!(fragments(|r| r.git_stat("0", "0", "0")), "");
        assert_eq!(
            fragments(|r| r.git_stat("3", "0", "5")),
            format!(" {}~3 {}-5", Paint(MODIFIED), Paint(REMOVED))
        );
        assert_eq!(
            fragments(|r| r.git_stat("0", "7", "0")),
            format!(" {}+7", Paint(ADDED))
        );
    }

    #[test]
    fn test_git_stat_reads_leading_integers() {
        assert_eq!(
            fragments(|r| r.git_stat("2 files", "x", "1")),
            format!(" {}~2 {}-1", Paint(MODIFIED), Paint(REMOVED))
        );
    }

    #[test]
    fn test_time_and_history() {
        assert_eq!(
            fragments(|r| r.time_taken("3s")),
            format!("{} took 3s", Paint(colors().time))
        );
        assert_eq!(
            fragments(|r| r.history_count("512")),
            format!("{} 512#", Paint(colors().history_count))
        );
    }

    #[test]
    fn test_jobs() {
        let job = Paint(colors().job);
        assert_eq!(fragments(|r| r.jobs("0", "0")), "");
        assert_eq!(
            fragments(|r| r.jobs("2", "0")),
            format!(" {job}{BACKGROUND_JOB_ICON} 2")
        );
        assert_eq!(
            fragments(|r| r.jobs("0", "1")),
            format!(" {job}{STOPPED_JOB_ICON} 1")
        );
        assert_eq!(
            fragments(|r| r.jobs("2", "1")),
            format!(" {job}{BACKGROUND_JOB_ICON} 2/{STOPPED_JOB_ICON} 1")
        );
    }

    #[test]
    fn test_render_frame_only() {
        assert_eq!(prompt(&[]), format!("{}{}", header(), footer()));
    }

    #[test]
    fn test_render_follows_argument_order() {
        let forward = prompt(&["-u", "alice", "-H", "box"]);
        let reverse = prompt(&["-H", "box", "-u", "alice"]);
        let user = format!("{}alice", Paint(colors().username));
        let host = format!(
            "{} on {}box",
            Paint(colors().preposition),
            Paint(colors().hostname)
        );
        assert_eq!(forward, format!("{}{user}{host}{}", header(), footer()));
        assert_eq!(reverse, format!("{}{host}{user}{}", header(), footer()));
    }

    #[test]
    fn test_render_repeated_flags_append() {
        let user = format!("{}alice", Paint(colors().username));
        assert_eq!(
            prompt(&["-u", "alice", "-u", "alice"]),
            format!("{}{user}{user}{}", header(), footer())
        );
    }

    #[test]
    fn test_render_right_align_is_inert() {
        assert_eq!(prompt(&["--"]), prompt(&[]));
        assert_eq!(prompt(&["--", "-u", "a"]), prompt(&["-u", "a"]));
    }

    #[test]
    fn test_render_is_idempotent() {
        let list = [
            "-c", "1", "-d", "Ubuntu", "-u", "alice", "-H", "box", "-w", "~", "-g", "main",
            "-s", "1", "2", "3", "-j", "1", "1", "-t", "2s", "-n", "10",
        ];
        assert_eq!(prompt(&list), prompt(&list));
    }

    #[test]
    fn test_render_help() {
        assert_eq!(run(&["-u", "alice", "-h"]), Ok(Render::Help));
        assert_eq!(run(&["-h", "-z"]), Ok(Render::Help));
    }

    #[test]
    fn test_render_errors() {
        assert_eq!(
            run(&["-s", "1", "2"]),
            Err(ScanError::MissingArgument("-s".to_string()))
        );
        assert_eq!(
            run(&["-z", "foo"]),
            Err(ScanError::UnrecognizedOption("-z".to_string()))
        );
        assert_eq!(
            run(&["alice"]),
            Err(ScanError::MalformedFlag("alice".to_string()))
        );
    }

    #[test]
    fn test_render_long_username_is_truncated() {
        let user = "u".repeat(PROMPT_CAPACITY * 4);
        let prompt = prompt(&["-u", user.as_str()]);
        assert_eq!(prompt.len(), PROMPT_CAPACITY);
        assert!(prompt.starts_with(&header()));
        assert!(!prompt.ends_with("$ "));
    }
}
