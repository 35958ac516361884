use std::fmt;
use std::os::unix::fs::FileTypeExt as _;

/// Represents the type of a file in the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    BlockDevice,
    CharDevice,
    Directory,
    Fifo,
    Symlink,
    RegularFile,
    Socket,
    /// The dirent carried no usable type and a stat could not resolve it.
    /// Never emitted under a specific type filter, never recursed into.
    Unknown,
}

impl FileType {
    /// Maps the single-letter codes accepted by `--type`.
    #[must_use]
    pub const fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'b' => Some(Self::BlockDevice),
            'c' => Some(Self::CharDevice),
            'd' => Some(Self::Directory),
            'n' => Some(Self::Fifo),
            'l' => Some(Self::Symlink),
            'f' => Some(Self::RegularFile),
            's' => Some(Self::Socket),
            _ => None,
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl From<std::fs::FileType> for FileType {
    #[inline]
    fn from(entry_type: std::fs::FileType) -> Self {
        match entry_type {
            t if t.is_dir() => Self::Directory,
            t if t.is_file() => Self::RegularFile,
            t if t.is_symlink() => Self::Symlink,
            t if t.is_block_device() => Self::BlockDevice,
            t if t.is_char_device() => Self::CharDevice,
            t if t.is_fifo() => Self::Fifo,
            t if t.is_socket() => Self::Socket,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockDevice => write!(f, "Block device"),
            Self::CharDevice => write!(f, "Character device"),
            Self::Directory => write!(f, "Directory"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Symlink => write!(f, "Symlink"),
            Self::RegularFile => write!(f, "Regular file"),
            Self::Socket => write!(f, "Socket"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileType;

    #[test]
    fn flag_letters_map_like_find() {
        assert_eq!(FileType::from_flag('b'), Some(FileType::BlockDevice));
        assert_eq!(FileType::from_flag('c'), Some(FileType::CharDevice));
        assert_eq!(FileType::from_flag('d'), Some(FileType::Directory));
        assert_eq!(FileType::from_flag('n'), Some(FileType::Fifo));
        assert_eq!(FileType::from_flag('l'), Some(FileType::Symlink));
        assert_eq!(FileType::from_flag('f'), Some(FileType::RegularFile));
        assert_eq!(FileType::from_flag('s'), Some(FileType::Socket));
        assert_eq!(FileType::from_flag('x'), None);
        assert_eq!(FileType::from_flag('u'), None);
    }

    #[test]
    fn std_types_map_through() {
        let dir = std::fs::metadata(std::env::temp_dir())
            .expect("temp dir should stat")
            .file_type();
        assert_eq!(FileType::from(dir), FileType::Directory);
        assert!(FileType::from(dir).is_dir());
    }
}
