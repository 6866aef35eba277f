use std::{
    fmt,
    io::{self, Write},
};

use crate::{
    cli::CliArgs,
    dispatch::{self, Callables, FailurePolicy, Outcome},
    tree::{sum_of_nodes, TreeNode},
};

pub type ProgramResult<T = ()> = Result<T, ProgramError>;

#[derive(Debug)]
pub enum ProgramError {
    Io(io::Error),
    Dispatch(dispatch::Error),
}

impl From<io::Error> for ProgramError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<dispatch::Error> for ProgramError {
    fn from(err: dispatch::Error) -> Self {
        Self::Dispatch(err)
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Io(err) => write!(f, "IO error: {}", err),
            ProgramError::Dispatch(err) => write!(f, "Dispatch error: {}", err),
        }
    }
}

impl std::error::Error for ProgramError {}

pub struct Program {
    pub root: TreeNode,
    pub inputs: Vec<String>,
    pub show_tree: bool,
    pub policy: FailurePolicy,
    pub callables: Callables,
}

impl Program {
    pub fn new(cli: CliArgs) -> ProgramResult<Self> {
        #[cfg(feature = "tracing")]
        if let Some(logs_path) = cli.logs {
            let file = std::fs::File::create(logs_path)?;
            env_logger::Builder::default()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .filter(None, log::LevelFilter::Trace)
                .parse_default_env()
                .init();
        }

        Ok(Self {
            root: TreeNode::sample(),
            inputs: cli.inputs,
            show_tree: cli.tree,
            policy: cli.on_error,
            callables: Callables::default(),
        })
    }

    pub fn run_to<W: Write>(&self, out: &mut W) -> ProgramResult<()> {
        if self.show_tree {
            write!(out, "{}", self.root.display())?;
        }

        let total = sum_of_nodes(Some(&self.root));
        log::debug!(target: "tree_sum::main", "Tree sums to {}", total);
        writeln!(out, "Sum of all nodes: {}", total)?;

        match self.callables.run(self.inputs.as_slice(), self.policy)? {
            Outcome::Value(value) => writeln!(out, "{}", value)?,
            outcome => log::debug!(target: "tree_sum::main", "Dispatch ended with {:?}", outcome),
        }

        Ok(())
    }

    pub fn run(self) -> ProgramResult<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let ret_code = self.run_to(&mut out);
        if let Err(err) = &ret_code {
            log::error!(target: "tree_sum::main", "{:?}", err);
        }

        ret_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::CallError;

    fn program(callables: Callables, policy: FailurePolicy) -> Program {
        Program {
            root: TreeNode::sample(),
            inputs: vec!["1".to_string(), "2".to_string(), "3".to_string()],
            show_tree: false,
            policy,
            callables,
        }
    }

    fn output(program: &Program) -> ProgramResult<String> {
        let mut buf = Vec::new();
        program.run_to(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn single_line_by_default() {
        let program = program(Callables::default(), FailurePolicy::Suppress);
        assert_eq!(output(&program).unwrap(), "Sum of all nodes: 31\n");
    }

    #[test]
    fn prints_dispatched_value() {
        let program = program(
            Callables::default().with_add(|a, b| Ok(a * 10 + b)),
            FailurePolicy::Suppress,
        );
        assert_eq!(output(&program).unwrap(), "Sum of all nodes: 31\n12\n");
    }

    #[test]
    fn failed_dispatch_is_silent() {
        let callables = Callables::default().with_main(|| Err(CallError("boom".to_string())));
        let program = program(callables, FailurePolicy::Log);
        assert_eq!(output(&program).unwrap(), "Sum of all nodes: 31\n");
    }

    #[test]
    fn propagated_failure_keeps_sum_line() {
        let mut program = program(
            Callables::default().with_factorial(|n| Ok(n)),
            FailurePolicy::Propagate,
        );
        program.inputs = vec!["nope".to_string()];

        let mut buf = Vec::new();
        let err = program.run_to(&mut buf).unwrap_err();
        assert!(matches!(err, ProgramError::Dispatch(dispatch::Error::Parse { .. })));
        assert_eq!(String::from_utf8(buf).unwrap(), "Sum of all nodes: 31\n");
    }

    #[test]
    fn tree_view_before_sum() {
        let mut program = program(Callables::default(), FailurePolicy::Suppress);
        program.show_tree = true;

        let out = output(&program).unwrap();
        assert!(out.starts_with("5\n"));
        assert!(out.ends_with("Sum of all nodes: 31\n"));
    }
}
