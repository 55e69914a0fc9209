use std::{fmt::Display, io};

/// Writes one line per configuration to an optional sink.
///
/// The first line is written as is, every later line is prefixed with `|- `.
/// Each line is handed to the sink in a single `write_all`.
pub(super) struct Tracer<W> {
    sink: Option<W>,
    lines: usize,
}

impl<W: io::Write> Tracer<W> {
    pub(super) fn new(sink: W) -> Self {
        Self {
            sink: Some(sink),
            lines: 0,
        }
    }

    pub(super) fn emit(&mut self, configuration: &impl Display) -> io::Result<()> {
        tracing::trace!(%configuration, "transition");

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        let line = match self.lines {
            0 => format!("{}\n", configuration),
            _ => format!("|- {}\n", configuration),
        };
        self.lines += 1;

        sink.write_all(line.as_bytes())
    }
}

impl Tracer<io::Sink> {
    /// Creates a tracer that writes nothing.
    pub(super) fn disabled() -> Self {
        Self {
            sink: None,
            lines: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::Tracer;

    #[test]
    fn prefixes_all_but_the_first_line() -> io::Result<()> {
        let mut out = Vec::new();
        let mut tracer = Tracer::new(&mut out);

        tracer.emit(&"(q, 1, e, S$)")?;
        tracer.emit(&"(q, 2, a, $)")?;
        tracer.emit(&"(t, 2, a, e)")?;

        assert_eq!(
            String::from_utf8_lossy(&out),
            "(q, 1, e, S$)\n|- (q, 2, a, $)\n|- (t, 2, a, e)\n"
        );

        Ok(())
    }

    #[test]
    fn disabled() -> io::Result<()> {
        let mut tracer = Tracer::disabled();

        tracer.emit(&"(q, 1, e, S$)")
    }

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_are_returned() {
        let mut tracer = Tracer::new(FailingSink);

        assert_eq!(
            tracer.emit(&"(q, 1, e, S$)").map_err(|e| e.kind()),
            Err(io::ErrorKind::BrokenPipe)
        );
    }
}
