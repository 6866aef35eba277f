#[cfg(feature = "tracing")]
use std::path::PathBuf;

use crate::dispatch::FailurePolicy;

#[derive(clap::Parser, Debug)]
#[clap(name = "Tree Sum", author, version, about, long_about = None)]
pub struct CliArgs {
    #[clap(
        index(1),
        default_values = ["1", "2", "3"],
        allow_negative_numbers = true,
        help = "Input values handed to the dispatched callable"
    )]
    pub inputs: Vec<String>,
    #[clap(short, long, help = "Print the sample tree before its sum")]
    pub tree: bool,
    #[clap(
        long = "on-error",
        value_enum,
        default_value_t = FailurePolicy::default(),
        help = "What to do when the dispatched call fails; `log` goes to the --logs file \
                when one is set, stderr otherwise"
    )]
    pub on_error: FailurePolicy,
    #[cfg(feature = "tracing")]
    #[clap(short, long, help = "Logs file path")]
    pub logs: Option<PathBuf>,
}

impl CliArgs {
    pub fn new() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let cli = CliArgs::try_parse_from(["tree-sum"]).unwrap();
        assert_eq!(cli.inputs, vec!["1", "2", "3"]);
        assert!(!cli.tree);
        assert_eq!(cli.on_error, FailurePolicy::default());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Suppress);
    }

    #[test]
    fn overrides() {
        let cli =
            CliArgs::try_parse_from(["tree-sum", "-t", "--on-error", "log", "7", "x"]).unwrap();
        assert_eq!(cli.inputs, vec!["7", "x"]);
        assert!(cli.tree);
        assert_eq!(cli.on_error, FailurePolicy::Log);
    }
}
