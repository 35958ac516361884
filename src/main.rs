use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::aot::{Shell, generate};
use ff::{FileType, MatchMode, OptionsBuilder, Printer, Scanner, SearchError};
use std::ffi::OsString;
use std::fs;
use std::io::stdout;
use std::num::NonZeroUsize;
use std::os::unix::ffi::OsStringExt as _;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ff",
    version = env!("CARGO_PKG_VERSION"),
    about = "Simplified version of GNU find with multi-threaded traversal"
)]
struct Args {
    /// Pattern matched against entry basenames (regex, or glob with -g)
    #[arg(value_name = "PATTERN", index = 1)]
    pattern: Option<String>,

    /// Directories to search (defaults to the current directory)
    #[arg(value_name = "PATH", index = 2, value_hint = ValueHint::DirPath)]
    paths: Vec<OsString>,

    /// Maximum directory traversal depth
    #[arg(short = 'd', long = "depth", value_name = "n")]
    depth: Option<NonZeroUsize>,

    /// Restrict output to type <x>: b(lock) c(har) d(ir) n(amed pipe)
    /// l(ink) f(ile) s(ocket)
    #[arg(short = 't', long = "type", value_name = "x", value_parser = parse_entry_type)]
    only_type: Option<FileType>,

    /// Use <n> threads for parallel directory traversal
    #[arg(short = 'j', long = "threads", value_name = "n")]
    threads: Option<NonZeroUsize>,

    /// Match glob instead of regex
    #[arg(short = 'g', long = "glob")]
    glob: bool,

    /// Traverse hidden directories and files as well
    #[arg(short = 'H', long = "hidden")]
    hidden: bool,

    /// Disregard .gitignore
    #[arg(short = 'I', long = "no-ignore")]
    no_ignore: bool,

    /// Ignore case when matching
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Deterministic sorting within directories (SLOW!)
    #[arg(short = 'D', long = "deterministic")]
    deterministic: bool,

    /// Generate shell completions
    #[arg(long = "generate", value_name = "shell")]
    generate: Option<Shell>,
}

fn parse_entry_type(raw: &str) -> Result<FileType, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(flag), None) => {
            FileType::from_flag(flag).ok_or_else(|| format!("unknown entry type '{raw}'"))
        }
        _ => Err(format!("unknown entry type '{raw}'")),
    }
}

/// Truncate trailing slashes so emitted paths never double a separator.
/// The root directory itself is the one path that keeps its slash.
fn trim_trailing_slashes(raw: OsString) -> PathBuf {
    let mut bytes = raw.into_vec();
    while bytes.len() > 1 && bytes.last() == Some(&b'/') {
        bytes.pop();
    }
    PathBuf::from(OsString::from_vec(bytes))
}

/// Every root must be an openable directory before any worker starts.
fn validate_roots(raw: Vec<OsString>) -> Result<Vec<PathBuf>, SearchError> {
    let mut roots = Vec::with_capacity(raw.len());
    for arg in raw {
        let path = trim_trailing_slashes(arg);
        if let Err(source) = fs::read_dir(&path) {
            return Err(SearchError::InvalidRoot { path, source });
        }
        roots.push(path);
    }
    Ok(roots)
}

fn main() -> ExitCode {
    // Usage goes to stderr in every case; clap's default exit codes do not
    // match ours, so parse errors are mapped by hand.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            eprint!("{err}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_owned();
        generate(shell, &mut cmd, name, &mut stdout());
        return ExitCode::SUCCESS;
    }

    let roots = match validate_roots(args.paths) {
        Ok(roots) => roots,
        Err(err) => {
            eprintln!("ff: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pattern = args.pattern.unwrap_or_default();
    let mode = if pattern.is_empty() {
        MatchMode::Everything
    } else if args.glob {
        MatchMode::Glob
    } else {
        MatchMode::Regex
    };

    let mut builder = OptionsBuilder::new()
        .pattern(&pattern, mode)
        .ignore_case(args.ignore_case)
        .keep_hidden(args.hidden)
        .no_ignore(args.no_ignore)
        .max_depth(args.depth.map(NonZeroUsize::get))
        .deterministic(args.deterministic)
        .only_type(args.only_type)
        .printer(Printer::stdout());
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }

    let options = match builder.build() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("ff: {err}");
            return ExitCode::FAILURE;
        }
    };

    Scanner::new(options, roots).run();
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::{parse_entry_type, trim_trailing_slashes};
    use ff::FileType;
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn trailing_slashes_are_truncated_except_for_root() {
        assert_eq!(
            trim_trailing_slashes(OsString::from("/usr/share///")),
            PathBuf::from("/usr/share")
        );
        assert_eq!(
            trim_trailing_slashes(OsString::from("relative/")),
            PathBuf::from("relative")
        );
        assert_eq!(trim_trailing_slashes(OsString::from("/")), PathBuf::from("/"));
        assert_eq!(trim_trailing_slashes(OsString::from("///")), PathBuf::from("/"));
    }

    #[test]
    fn entry_type_letters_parse() {
        assert_eq!(parse_entry_type("f"), Ok(FileType::RegularFile));
        assert_eq!(parse_entry_type("d"), Ok(FileType::Directory));
        assert!(parse_entry_type("q").is_err());
        assert!(parse_entry_type("df").is_err());
        assert!(parse_entry_type("").is_err());
    }
}
