//! Hands generated assembly to the system C toolchain: spawns `cc` (or
//! `gcc` if `cc` isn't on `PATH`) reading assembly from stdin, compiles the
//! companion `.c` driver file alongside it, links, and produces an
//! executable named after the `.ram` source with its extension stripped.
//!
//! The original implementation wired a `pipe()`/`fork()`/`exec()` sequence
//! by hand and wrote assembly into the write end of that pipe as it was
//! generated. `std::process::Command` gives us the spawn and the pipe for
//! free; the one piece still worth doing by hand is feeding the child's
//! stdin from a background thread, so a slow assembler reading a full pipe
//! can't deadlock against a codegen buffer that's still being produced.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use ramsey_util::error::IoError;

/// Runs `ramfile`'s assembly (written into the returned sink by the
/// caller) through the system toolchain alongside `cfile`, producing an
/// executable at `output`.
pub struct Toolchain {
    cfile: std::path::PathBuf,
    output: std::path::PathBuf,
}

impl Toolchain {
    pub fn new(cfile: impl Into<std::path::PathBuf>, output: impl Into<std::path::PathBuf>) -> Self {
        Toolchain { cfile: cfile.into(), output: output.into() }
    }

    /// Spawns the toolchain and writes `asm` (the full assembly text for
    /// the program) to its stdin, then waits for it to finish.
    pub fn build(&self, asm: &[u8]) -> Result<(), IoError> {
        let compiler = which_compiler();
        tracing::debug!(compiler, cfile = %self.cfile.display(), output = %self.output.display(), "invoking toolchain");

        let mut child = Command::new(compiler)
            .args(["-m32", "-O0", "-o"])
            .arg(&self.output)
            .args(["-xassembler", "-", "-xc"])
            .arg(&self.cfile)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| IoError::message(format!("cannot execute '{compiler}': {e}")))?;

        let mut stdin = child.stdin.take().expect("stdin was requested as piped");
        let asm = asm.to_vec();
        let writer = thread::spawn(move || stdin.write_all(&asm));

        let status = child.wait().map_err(IoError::from)?;
        writer
            .join()
            .map_err(|_| IoError::message("toolchain stdin writer thread panicked"))?
            .map_err(IoError::from)?;

        if !status.success() {
            return Err(IoError::message(format!("toolchain exited with {status}")));
        }
        Ok(())
    }
}

/// Strips the last extension from `ram_path`'s file name, matching the
/// original's "rfind '.' and truncate" scheme exactly.
pub fn executable_name(ram_path: &Path) -> std::path::PathBuf {
    ram_path.with_extension("")
}

fn which_compiler() -> &'static str {
    if Command::new("cc").arg("--version").stdout(Stdio::null()).stderr(Stdio::null()).status().is_ok() {
        "cc"
    } else {
        "gcc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn executable_name_strips_last_extension_only() {
        assert_eq!(executable_name(&PathBuf::from("main.ram")), PathBuf::from("main"));
        assert_eq!(executable_name(&PathBuf::from("dir/a.b.ram")), PathBuf::from("dir/a.b"));
    }
}
