//! Per-case progress display

use std::io::{self, Write};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const BACKSPACE: char = '\u{8}';

/// Header and activity indicator for one test case.
///
/// Quiet mode prints the header once and redraws a single spinner character
/// in place on every tick. Verbose mode prints the header as its own line and
/// leaves per-pass reporting to the caller.
pub struct Progress {
    title: String,
    verbose: bool,
    started: bool,
    ticks: usize,
}

impl Progress {
    pub fn new(title: impl Into<String>, verbose: bool) -> Self {
        Self {
            title: title.into(),
            verbose,
            started: false,
            ticks: 0,
        }
    }

    /// Called before each sample pass
    pub fn tick<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        if self.verbose {
            if !self.started {
                writeln!(out, "benchmarking \"{}\"...", self.title)?;
                self.started = true;
            }
        } else if self.started {
            write!(out, "{}{}", BACKSPACE, self.spin())?;
        } else {
            let frame = self.spin();
            write!(out, "benchmarking \"{}\"...{}", self.title, frame)?;
            self.started = true;
        }
        out.flush()
    }

    /// Called once every pass has completed
    pub fn finish<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.verbose {
            writeln!(out, "{} ", BACKSPACE)?;
            out.flush()?;
        }
        Ok(())
    }

    fn spin(&mut self) -> char {
        let frame = SPINNER[self.ticks % SPINNER.len()];
        self.ticks += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames() {
        let mut out = Vec::new();
        let mut progress = Progress::new("case", false);
        for _ in 0..5 {
            progress.tick(&mut out).unwrap();
        }
        progress.finish(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "benchmarking \"case\"...|\u{8}/\u{8}-\u{8}\\\u{8}|\u{8} \n"
        );
    }

    #[test]
    fn test_verbose_header_once() {
        let mut out = Vec::new();
        let mut progress = Progress::new("case", true);
        progress.tick(&mut out).unwrap();
        progress.tick(&mut out).unwrap();
        progress.finish(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "benchmarking \"case\"...\n");
    }
}
