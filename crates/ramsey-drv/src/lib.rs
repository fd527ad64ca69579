//! Compiler driver: turns a `.ram` source file plus a companion `.c`
//! driver file into an executable (or, with `-S`, just the assembly).
//!
//! [`Session::compile`] runs the four in-process passes — lex, parse,
//! analyze, generate — then either writes the assembly straight to a
//! `.s` file or hands it to [`toolchain::Toolchain`] to finish the build.
//! Every pass reports through one of the four error kinds in
//! `ramsey_util::error`; [`error::CompileError`] unifies them so this
//! function has a single fallible return type end to end.

pub mod cli;
pub mod error;
pub mod toolchain;

use std::fs;

pub use cli::{Cli, Config};
pub use error::CompileError;

pub struct Session {
    pub config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session { config }
    }

    pub fn compile(&self) -> Result<(), CompileError> {
        let source = fs::read_to_string(&self.config.ram_file)
            .map_err(|e| CompileError::from(ramsey_util::error::IoError::from(e)))?;

        let tokens = tracing::debug_span!("lex").in_scope(|| ramsey_lex::lex(&source))?;
        if self.config.emit_tokens {
            for token in &tokens {
                println!("{token:?}");
            }
            return Ok(());
        }

        let program = tracing::debug_span!("parse").in_scope(|| ramsey_par::parse_tokens(&tokens))?;
        if self.config.emit_ast {
            println!("{program:#?}");
            return Ok(());
        }

        tracing::debug_span!("analyze").in_scope(|| ramsey_sem::analyze(&program))?;

        let mut asm = Vec::new();
        tracing::debug_span!("codegen").in_scope(|| ramsey_gen::generate_to(&program, &mut asm))?;

        if self.config.emit_asm {
            let out = self.config.output.clone().unwrap_or_else(|| self.config.ram_file.with_extension("s"));
            fs::write(&out, &asm).map_err(|e| CompileError::from(ramsey_util::error::IoError::from(e)))?;
            return Ok(());
        }

        let output = self.config.output.clone().unwrap_or_else(|| toolchain::executable_name(&self.config.ram_file));
        let chain = toolchain::Toolchain::new(self.config.c_file.clone(), output);
        tracing::debug_span!("toolchain").in_scope(|| chain.build(&asm))?;

        Ok(())
    }
}

/// Installs a `tracing` subscriber honoring `RUST_LOG`, raised to `debug`
/// when `verbose` is set and `RUST_LOG` wasn't already overridden.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Entry point shared by `main.rs`: parses arguments, runs the session,
/// and maps the result to the CLI contract's error-class label.
pub fn run<I, T>(args: I) -> Result<(), CompileError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::Parser;

    let cli = Cli::parse_from(args);
    init_logging(cli.verbose);
    let config = Config::from_cli(cli)?;
    Session::new(config).compile()
}
