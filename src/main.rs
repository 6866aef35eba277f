mod cli;
mod dispatch;
mod program;
mod tree;

fn main() -> program::ProgramResult {
    let cli = cli::CliArgs::new();
    program::Program::new(cli)?.run()?;
    Ok(())
}
