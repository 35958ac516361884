use crate::error::SearchError;
use crate::filetype::FileType;
use crate::glob::glob_to_regex;
use crate::printer::Printer;
use regex::bytes::{Regex, RegexBuilder};
use std::num::NonZeroUsize;
use std::thread;

/// How the positional pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// No pattern: every entry matches.
    Everything,
    Regex,
    Glob,
}

/**
Read-only snapshot of everything a worker needs to filter and emit entries.

Built once before the workers start and shared behind an `Arc`; never
mutated afterwards, so workers read it without locking. Glob patterns are
translated to a regex at build time, which collapses all three match modes
into "is there a compiled matcher or not".
*/
#[derive(Debug)]
pub struct SearchOptions {
    /// Compiled basename matcher; `None` matches everything.
    pub matcher: Option<Regex>,
    /// Only emit entries of this type; `None` means any type.
    pub only_type: Option<FileType>,
    pub skip_hidden: bool,
    pub no_ignore: bool,
    /// `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Sort entries within each directory before emitting them.
    pub deterministic: bool,
    pub threads: NonZeroUsize,
    pub printer: Printer,
}

impl SearchOptions {
    /// Match test against a basename. Mode NONE always matches.
    #[must_use]
    #[inline]
    pub fn matches(&self, name: &[u8]) -> bool {
        self.matcher.as_ref().is_none_or(|re| re.is_match(name))
    }

    /// Type filter. `Unknown` entries never pass a specific filter.
    #[must_use]
    #[inline]
    pub fn accepts_type(&self, file_type: FileType) -> bool {
        self.only_type.is_none_or(|wanted| wanted == file_type)
    }
}

/// Builder for [`SearchOptions`], defaulting to the out-of-the-box CLI
/// behaviour: match everything, skip hidden entries, honour ignore scopes,
/// unlimited depth, one worker per online processor, plain stdout output.
pub struct OptionsBuilder {
    pattern: String,
    mode: MatchMode,
    ignore_case: bool,
    keep_hidden: bool,
    no_ignore: bool,
    max_depth: Option<usize>,
    deterministic: bool,
    only_type: Option<FileType>,
    threads: Option<NonZeroUsize>,
    printer: Option<Printer>,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            mode: MatchMode::Everything,
            ignore_case: false,
            keep_hidden: false,
            no_ignore: false,
            max_depth: None,
            deterministic: false,
            only_type: None,
            threads: None,
            printer: None,
        }
    }

    #[must_use]
    pub fn pattern(mut self, pattern: &str, mode: MatchMode) -> Self {
        self.pattern = pattern.to_owned();
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    /// Traverse hidden entries as well (`-H`).
    #[must_use]
    pub fn keep_hidden(mut self, yes: bool) -> Self {
        self.keep_hidden = yes;
        self
    }

    /// Disregard ignore scopes entirely (`-I`).
    #[must_use]
    pub fn no_ignore(mut self, yes: bool) -> Self {
        self.no_ignore = yes;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn deterministic(mut self, yes: bool) -> Self {
        self.deterministic = yes;
        self
    }

    #[must_use]
    pub fn only_type(mut self, file_type: Option<FileType>) -> Self {
        self.only_type = file_type;
        self
    }

    #[must_use]
    pub fn threads(mut self, threads: NonZeroUsize) -> Self {
        self.threads = Some(threads);
        self
    }

    #[must_use]
    pub fn printer(mut self, printer: Printer) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Compile the pattern and freeze the snapshot.
    ///
    /// # Errors
    /// [`SearchError::BadPattern`] when the pattern does not compile in the
    /// selected mode.
    pub fn build(self) -> Result<SearchOptions, SearchError> {
        let matcher = if self.pattern.is_empty() {
            None
        } else {
            match self.mode {
                MatchMode::Everything => None,
                MatchMode::Regex => Some(compile(&self.pattern, &self.pattern, self.ignore_case)?),
                MatchMode::Glob => {
                    let translated = glob_to_regex(&self.pattern).map_err(|err| {
                        SearchError::BadPattern {
                            pattern: self.pattern.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                    Some(compile(&translated, &self.pattern, self.ignore_case)?)
                }
            }
        };

        let threads = self
            .threads
            .or_else(|| thread::available_parallelism().ok())
            .unwrap_or(NonZeroUsize::MIN);

        Ok(SearchOptions {
            matcher,
            only_type: self.only_type,
            skip_hidden: !self.keep_hidden,
            no_ignore: self.no_ignore,
            max_depth: self.max_depth,
            deterministic: self.deterministic,
            threads,
            printer: self.printer.unwrap_or_else(Printer::stdout),
        })
    }
}

fn compile(pattern: &str, reported: &str, ignore_case: bool) -> Result<Regex, SearchError> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .dot_matches_new_line(false)
        .build()
        .map_err(|err| SearchError::BadPattern {
            pattern: reported.to_owned(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{MatchMode, OptionsBuilder};
    use crate::filetype::FileType;

    #[test]
    fn empty_pattern_matches_everything() {
        let options = OptionsBuilder::new().build().expect("defaults build");
        assert!(options.matcher.is_none());
        assert!(options.matches(b"anything"));
        assert!(options.matches(b""));
        assert!(options.skip_hidden);
        assert!(!options.no_ignore);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn regex_mode_honours_case_fold() {
        let options = OptionsBuilder::new()
            .pattern("readme", MatchMode::Regex)
            .ignore_case(true)
            .build()
            .expect("pattern builds");
        assert!(options.matches(b"README"));
        assert!(options.matches(b"ReadMe.md"));
        assert!(!options.matches(b"LICENSE"));
    }

    #[test]
    fn regex_mode_is_substring_unless_anchored() {
        let options = OptionsBuilder::new()
            .pattern("ma.n", MatchMode::Regex)
            .build()
            .expect("pattern builds");
        assert!(options.matches(b"main.rs"));
        assert!(!options.matches(b"lib.rs"));
    }

    #[test]
    fn glob_mode_translates_and_anchors() {
        let options = OptionsBuilder::new()
            .pattern("*.c", MatchMode::Glob)
            .build()
            .expect("pattern builds");
        assert!(options.matches(b"foo.c"));
        assert!(!options.matches(b"foo.cpp"));
    }

    #[test]
    fn bad_patterns_are_rejected() {
        assert!(
            OptionsBuilder::new()
                .pattern("(unclosed", MatchMode::Regex)
                .build()
                .is_err()
        );
        assert!(
            OptionsBuilder::new()
                .pattern("[unclosed", MatchMode::Glob)
                .build()
                .is_err()
        );
    }

    #[test]
    fn type_filter_rejects_unknown_under_specific_type() {
        let options = OptionsBuilder::new()
            .only_type(Some(FileType::RegularFile))
            .build()
            .expect("defaults build");
        assert!(options.accepts_type(FileType::RegularFile));
        assert!(!options.accepts_type(FileType::Directory));
        assert!(!options.accepts_type(FileType::Unknown));

        let any = OptionsBuilder::new().build().expect("defaults build");
        assert!(any.accepts_type(FileType::Unknown));
    }
}
