//! Stdout writing that tolerates the reader going away.

use anyhow::Result;
use std::io::{self, ErrorKind, StdoutLock, Write};

/// Run `write` against locked stdout, then flush.
///
/// A reader closing the pipe early (`| head -1`) ends output quietly; any
/// other write failure is returned.
pub fn write_stdout<F>(write: F) -> Result<()>
where
    F: FnOnce(&mut StdoutLock<'static>) -> io::Result<()>,
{
    write_to(&mut io::stdout().lock(), write)
}

fn write_to<W, F>(out: &mut W, write: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    match write(out).and_then(|()| out.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("stdout closed by reader, stopping output");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to write to stdout")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter(ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_pipe_is_clean_exit() {
        let mut out = FailingWriter(ErrorKind::BrokenPipe);
        assert!(write_to(&mut out, |out| writeln!(out, "Gem/Cuisson/Divers")).is_ok());
    }

    #[test]
    fn test_other_write_errors_propagate() {
        let mut out = FailingWriter(ErrorKind::PermissionDenied);
        let err = write_to(&mut out, |out| writeln!(out, "Gem/Cuisson/Divers")).unwrap_err();
        assert!(err.to_string().contains("Failed to write to stdout"));
    }

    #[test]
    fn test_writes_through() {
        let mut out = Vec::new();
        write_to(&mut out, |out| {
            writeln!(out, "a")?;
            writeln!(out, "b")
        })
        .unwrap();
        assert_eq!(out, b"a\nb\n");
    }
}
