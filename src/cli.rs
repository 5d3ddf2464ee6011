use clap::{Arg, ArgAction, Command, crate_name};

use crate::args::Flag;

const ABOUT: &str =
    "prints bash prompt with given information in order according to baked in pattern/colorscheme";

const RIGHT_ALIGN_HELP: &str = "\
Reserved:
  --  print the rest on the right side (accepted, currently has no effect)";

/// Describes every flag for the usage text.
///
/// Arguments are scanned by [`crate::args::Scanner`], clap only renders help.
pub fn command() -> Command {
    Flag::ALL.into_iter().filter_map(flag_arg).fold(
        Command::new(crate_name!())
            .about(ABOUT)
            .override_usage("prompt [-h] [option [arg]...]...")
            .disable_help_flag(true)
            .after_help(RIGHT_ALIGN_HELP),
        |command, arg| command.arg(arg),
    )
}

fn flag_arg(flag: Flag) -> Option<Arg> {
    let arg = match flag {
        Flag::Help => {
            return Some(
                Arg::new("help")
                    .short(flag.letter())
                    .action(ArgAction::Help)
                    .help("print this help and exit"),
            );
        }
        // clap has no short flag for '-', it is described in the footer
        Flag::RightAlign => return None,
        Flag::ExitCode => Arg::new("code")
            .value_name("return code")
            .help("print emoji for common exit code OR signal name if it corresponds to a signal"),
        Flag::Distro => Arg::new("distro").help("print icon of linux distro"),
        Flag::GitBranch => Arg::new("git_branch").help("current git branch, empty prints nothing"),
        Flag::Hostname => Arg::new("hostname"),
        Flag::Jobs => Arg::new("jobs")
            .value_names(["background", "stopped"])
            .help("background and stopped job counts"),
        Flag::HistoryCount => Arg::new("count").help("bash history count"),
        Flag::GitStat => Arg::new("git_stat")
            .value_names(["modified", "added", "removed"])
            .help("git diff stat, zero counts are hidden"),
        Flag::TimeTaken => Arg::new("time").help("last command time"),
        Flag::Username => Arg::new("username"),
        Flag::Cwd => Arg::new("cwd").help("current working directory"),
    };
    Some(arg.short(flag.letter()).num_args(flag.arity()))
}

/// Plain usage text, without styling.
pub fn usage() -> String {
    command().render_help().to_string()
}
