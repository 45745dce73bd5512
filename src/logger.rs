// `log` backend for the raw SPL console.
//
// There is no heap and no locking at this stage, so the logger is just a
// function pointer to the board's byte-out routine. Lines are formatted
// straight into it as `[LEVEL] message\r\n`.

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};

/// Blocking single-byte console output.
pub type ByteSink = fn(u8);

/// `fmt::Write` over any byte sink, expanding `\n` to `\r\n`.
pub struct ConsoleWriter<F: FnMut(u8)> {
    sink: F,
}

impl<F: FnMut(u8)> ConsoleWriter<F> {
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F: FnMut(u8)> Write for ConsoleWriter<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                (self.sink)(b'\r');
            }
            (self.sink)(b);
        }
        Ok(())
    }
}

pub struct ConsoleLogger {
    sink: ByteSink,
}

impl ConsoleLogger {
    pub const fn new(sink: ByteSink) -> Self {
        Self { sink }
    }
}

/// Write one formatted record.
pub fn write_record<W: Write>(w: &mut W, record: &Record) -> fmt::Result {
    writeln!(w, "[{:<5}] {}", record.level(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // the console cannot fail; nothing useful to do with an error
            let _ = write_record(&mut ConsoleWriter::new(self.sink), record);
        }
    }

    fn flush(&self) {}
}

/// Level chosen at build time through `LOG`; `info` if unset.
pub fn level_from_env() -> LevelFilter {
    parse_level(option_env!("LOG"))
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    match value {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install `logger` as the global logger. Calling it again is harmless.
pub fn init(logger: &'static ConsoleLogger) {
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level_from_env());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn render(level: Level, args: fmt::Arguments) -> Vec<u8> {
        let mut out = Vec::new();
        let record = Record::builder().level(level).args(args).build();
        write_record(&mut ConsoleWriter::new(|b| out.push(b)), &record).unwrap();
        out
    }

    #[test]
    fn newline_becomes_crlf() {
        let mut out = Vec::new();
        write!(ConsoleWriter::new(|b| out.push(b)), "a\nb\n").unwrap();
        assert_eq!(out, b"a\r\nb\r\n");
    }

    #[test]
    fn record_format() {
        assert_eq!(
            render(Level::Info, format_args!("DRAM {} MiB", 512)),
            b"[INFO ] DRAM 512 MiB\r\n"
        );
        assert_eq!(
            render(Level::Error, format_args!("x")),
            b"[ERROR] x\r\n"
        );
    }

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
        assert_eq!(parse_level(Some("bogus")), LevelFilter::Info);
    }
}
