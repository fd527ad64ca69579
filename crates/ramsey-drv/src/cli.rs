//! Command-line surface for the `ramseyc` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::error::CompileError;

#[derive(Debug, Parser)]
#[command(name = "ramseyc", about = "Ahead-of-time compiler for the Ramsey language")]
pub struct Cli {
    /// Input files: exactly one `.ram` source and exactly one `.c` driver.
    pub files: Vec<PathBuf>,

    /// Override the default executable name (default: the `.ram` base name).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Dump the token stream and stop, without affecting the emitted assembly.
    #[arg(long = "emit-tokens")]
    pub emit_tokens: bool,

    /// Dump the parsed AST and stop, without affecting the emitted assembly.
    #[arg(long = "emit-ast")]
    pub emit_ast: bool,

    /// Stop after code generation and write the `.s` file instead of
    /// invoking the toolchain.
    #[arg(short = 'S', long = "emit-asm")]
    pub emit_asm: bool,

    /// Raise the tracing log level, independent of `RUST_LOG`.
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Resolved configuration: the `.ram`/`.c` pair picked out of `Cli::files`,
/// plus everything else carried through unchanged.
#[derive(Debug)]
pub struct Config {
    pub ram_file: PathBuf,
    pub c_file: PathBuf,
    pub output: Option<PathBuf>,
    pub emit_tokens: bool,
    pub emit_ast: bool,
    pub emit_asm: bool,
    pub verbose: bool,
}

impl Config {
    /// Validates `cli.files`: exactly one `.ram`, exactly one `.c`, nothing
    /// else. Mirrors the original toolchain driver's argument scan.
    pub fn from_cli(cli: Cli) -> Result<Self, CompileError> {
        let mut ram_file = None;
        let mut c_file = None;

        for path in &cli.files {
            match path.extension().and_then(|e| e.to_str()) {
                Some("ram") if ram_file.is_none() => ram_file = Some(path.clone()),
                Some("ram") => return Err(CompileError::InvalidArguments("too many .ram files".into())),
                Some("c") if c_file.is_none() => c_file = Some(path.clone()),
                Some("c") => return Err(CompileError::InvalidArguments("too many .c files".into())),
                _ => return Err(CompileError::InvalidArguments(format!("bad argument '{}'", path.display()))),
            }
        }

        let ram_file = ram_file.ok_or_else(|| CompileError::InvalidArguments("no .ram file provided".into()))?;
        let c_file = c_file.ok_or_else(|| CompileError::InvalidArguments("no .c file provided".into()))?;

        Ok(Config {
            ram_file,
            c_file,
            output: cli.output,
            emit_tokens: cli.emit_tokens,
            emit_ast: cli.emit_ast,
            emit_asm: cli.emit_asm,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(files: &[&str]) -> Cli {
        Cli {
            files: files.iter().map(PathBuf::from).collect(),
            output: None,
            emit_tokens: false,
            emit_ast: false,
            emit_asm: false,
            verbose: false,
        }
    }

    #[test]
    fn accepts_exactly_one_ram_and_one_c_file() {
        let config = Config::from_cli(cli(&["main.ram", "driver.c"])).unwrap();
        assert_eq!(config.ram_file, PathBuf::from("main.ram"));
        assert_eq!(config.c_file, PathBuf::from("driver.c"));
    }

    #[test]
    fn rejects_missing_ram_file() {
        assert!(Config::from_cli(cli(&["driver.c"])).is_err());
    }

    #[test]
    fn rejects_two_ram_files() {
        assert!(Config::from_cli(cli(&["a.ram", "b.ram", "driver.c"])).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(Config::from_cli(cli(&["main.ram", "driver.c", "notes.txt"])).is_err());
    }
}
