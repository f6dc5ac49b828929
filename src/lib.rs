use {
    glam::IVec2,
    memmap::Mmap,
    std::{
        fs::File,
        io::{Error, ErrorKind, Result as IoResult},
        str::{from_utf8, Utf8Error},
    },
    strum::{EnumCount, EnumIter},
};

pub use {
    self::{direction::*, field::*, search::*},
    clap::Parser,
};

mod field;
mod search;

/// Arguments for program execution
///
/// Currently, this is just an input file path. The default is intentionally left empty so that the
/// binary can fall back onto its own default path.
#[derive(Parser)]
pub struct Args {
    /// Input file path
    #[arg(short, long, default_value_t)]
    input_file_path: String,
}

impl Args {
    /// Returns the input file path, or a provided default if the field is empty
    pub fn input_file_path<'a>(&'a self, default: &'a str) -> &'a str {
        if self.input_file_path.is_empty() {
            default
        } else {
            &self.input_file_path
        }
    }
}

/// Opens a memory-mapped UTF-8 file at a specified path, and passes a `&str` over the file to a
/// provided callback function
///
/// # Errors
///
/// Returns a `Result::Err`-wrapped `std::io::Error` if the file cannot be opened, cannot be
/// mapped, or is not valid UTF-8. `f` is only executed *iff* an error is not encountered.
///
/// # Safety
///
/// `Mmap::map` is unsafe: there is no guarantee that an external process won't modify the file
/// while it is mapped as read-only. It is UB if that happens while this function is referring to
/// the contents as an immutable string slice.
pub unsafe fn open_utf8_file<F: FnOnce(&str)>(file_path: &str, f: F) -> IoResult<()> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> Error {
        Error::new(ErrorKind::InvalidData, utf8_error)
    })?;

    f(utf8_str);

    Ok(())
}

mod direction {
    use super::*;

    #[derive(Copy, Clone, Debug, EnumCount, EnumIter, Eq, PartialEq)]
    #[repr(u8)]
    pub enum Direction {
        North,
        East,
        South,
        West,
    }

    const VECS: [IVec2; Direction::COUNT] = [IVec2::NEG_Y, IVec2::X, IVec2::Y, IVec2::NEG_X];

    impl Direction {
        #[inline]
        pub const fn vec(self) -> IVec2 {
            VECS[self as usize]
        }
    }

    impl From<Direction> for IVec2 {
        fn from(value: Direction) -> Self {
            value.vec()
        }
    }

    /// Parses a blizzard glyph. The error value is the rejected byte.
    impl TryFrom<u8> for Direction {
        type Error = u8;

        fn try_from(glyph: u8) -> Result<Self, Self::Error> {
            match glyph {
                b'^' => Ok(Self::North),
                b'>' => Ok(Self::East),
                b'v' => Ok(Self::South),
                b'<' => Ok(Self::West),
                _ => Err(glyph),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use {super::*, strum::IntoEnumIterator};

        #[test]
        fn test_direction_glyphs() {
            assert_eq!(Direction::try_from(b'^'), Ok(Direction::North));
            assert_eq!(Direction::try_from(b'>'), Ok(Direction::East));
            assert_eq!(Direction::try_from(b'v'), Ok(Direction::South));
            assert_eq!(Direction::try_from(b'<'), Ok(Direction::West));
            assert_eq!(Direction::try_from(b'.'), Err(b'.'));
            assert_eq!(Direction::try_from(b'#'), Err(b'#'));
        }

        #[test]
        fn test_direction_vecs() {
            assert_eq!(Direction::North.vec(), IVec2::NEG_Y);
            assert_eq!(Direction::East.vec(), IVec2::X);
            assert_eq!(
                Direction::iter()
                    .map(Direction::vec)
                    .fold(IVec2::ZERO, |sum: IVec2, vec: IVec2| sum + vec),
                IVec2::ZERO
            );
        }
    }
}
