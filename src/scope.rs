use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to the innermost ignore scope in effect for a subtree.
///
/// `None` means no scope applies. Cloning a handle is an atomic refcount
/// bump; the scope is freed when the last task referencing it is dropped,
/// which is exactly its natural lifetime: a scope stays open as long as any
/// descendant directory still waits to be walked.
pub type ScopeHandle = Option<Arc<IgnoreScope>>;

/// Exclusion rules rooted at one repository directory, queried per basename.
pub struct IgnoreScope {
    matcher: Gitignore,
}

impl IgnoreScope {
    /// Try to open an ignore scope rooted at `dir`.
    ///
    /// A directory starts a scope iff it holds a `.git` directory; the rules
    /// come from its `.gitignore`. A repository without a `.gitignore` opens
    /// as an empty scope that ignores nothing. Any failure yields `None`,
    /// which callers treat as "inherit the enclosing scope".
    #[must_use]
    pub fn open(dir: &Path) -> ScopeHandle {
        let is_repo_root = dir
            .join(".git")
            .symlink_metadata()
            .is_ok_and(|meta| meta.is_dir());
        if !is_repo_root {
            return None;
        }

        let mut builder = GitignoreBuilder::new(dir);
        let _ = builder.add(dir.join(".gitignore"));
        builder
            .build()
            .ok()
            .map(|matcher| Arc::new(Self { matcher }))
    }

    /// Whether `name`, a basename relative to the scope root, is excluded.
    /// Whitelist rules (`!pattern`) beat ignore rules, like git itself.
    #[must_use]
    pub fn is_ignored(&self, name: &OsStr, is_dir: bool) -> bool {
        self.matcher.matched(Path::new(name), is_dir).is_ignore()
    }
}
