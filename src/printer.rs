use crate::filetype::FileType;
use compile_time_ls_colours::file_type_colour;
use std::fmt;
use std::io::{self, BufWriter, IsTerminal as _, Write};
use std::sync::{Mutex, PoisonError};

const RESET: &[u8] = b"\x1b[0m";

/// LS_COLORS-style colour for the basename, keyed on entry type first and
/// extension second.
#[inline]
fn entry_colour(name: &[u8], file_type: FileType) -> &[u8] {
    match file_type {
        FileType::Directory => file_type_colour!(directory),
        FileType::Symlink => file_type_colour!(symlink),
        FileType::BlockDevice => file_type_colour!(block_device),
        FileType::CharDevice => file_type_colour!(character_device),
        FileType::Socket => file_type_colour!(socket),
        FileType::Fifo => file_type_colour!(pipe),
        FileType::RegularFile | FileType::Unknown => {
            extension(name).map_or(RESET, |ext| file_type_colour!(ext))
        }
    }
}

/// Final extension of a basename, `None` for dotfiles and extensionless
/// names.
#[inline]
fn extension(name: &[u8]) -> Option<&[u8]> {
    name.iter()
        .rposition(|&byte| byte == b'.')
        .filter(|&pos| pos > 0 && pos + 1 < name.len())
        .map(|pos| &name[pos + 1..])
}

/**
Assembles one output line per match and hands it to the sink as a single
`write_all`, so lines from concurrent workers never interleave mid-line.

The sink sits behind a mutex; workers format into a scratch buffer first and
hold the lock only for the write itself. Write failures (a closed pipe when
piping into `head`, typically) are swallowed: the consumer has gone away and
there is nobody left to tell.
*/
pub struct Printer {
    colorize: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("colorize", &self.colorize)
            .finish_non_exhaustive()
    }
}

impl Printer {
    #[must_use]
    pub fn new(colorize: bool, sink: Box<dyn Write + Send>) -> Self {
        Self {
            colorize,
            sink: Mutex::new(sink),
        }
    }

    /// Buffered stdout sink; colours iff stdout is a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        let out = io::stdout();
        let colorize = out.is_terminal();
        Self::new(colorize, Box::new(BufWriter::new(out)))
    }

    /// Emit one matched path, `parent + "/" + name`, as a single line.
    pub fn emit(&self, parent: &[u8], name: &[u8], file_type: FileType) {
        let mut line = Vec::with_capacity(parent.len() + name.len() + 32);

        if self.colorize {
            line.extend_from_slice(file_type_colour!(directory));
            line.extend_from_slice(parent);
            if !parent.ends_with(b"/") {
                line.push(b'/');
            }
            line.extend_from_slice(RESET);
            line.extend_from_slice(entry_colour(name, file_type));
            line.extend_from_slice(name);
            line.extend_from_slice(RESET);
        } else {
            line.extend_from_slice(parent);
            if !parent.ends_with(b"/") {
                line.push(b'/');
            }
            line.extend_from_slice(name);
        }
        line.push(b'\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(&line);
    }

    /// Flush the sink; called once after the workers have joined.
    pub fn flush(&self) {
        let _ = self
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}
