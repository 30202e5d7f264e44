use std::io::{ErrorKind, Read, Result, Write};

use super::*;

/// Node labels that can be stored in a snapshot.
///
/// Integers are written as little-endian bytes of their width; strings as a `u64` byte length
/// followed by their UTF-8 bytes.
pub trait SnapshotLabel: NodeLabel + Sized {
    /// Writes the label
    fn write_label<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Reads a label written by [`SnapshotLabel::write_label`]
    fn read_label<R: Read>(reader: &mut R) -> Result<Self>;
}

macro_rules! impl_snapshot_label {
    ($($t:ty),*) => {
        $(
            impl SnapshotLabel for $t {
                fn write_label<W: Write>(&self, writer: &mut W) -> Result<()> {
                    writer.write_all(&self.to_le_bytes())
                }

                fn read_label<R: Read>(reader: &mut R) -> Result<Self> {
                    Ok(<$t>::from_le_bytes(read_bytes(reader)?))
                }
            }
        )*
    };
}

impl_snapshot_label!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl SnapshotLabel for String {
    fn write_label<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&(self.len() as u64).to_le_bytes())?;
        writer.write_all(self.as_bytes())
    }

    fn read_label<R: Read>(reader: &mut R) -> Result<Self> {
        let len = u64::from_le_bytes(read_bytes(reader)?);
        let mut bytes = Vec::new();
        let read = reader.take(len).read_to_end(&mut bytes)?;
        raise_error_unless!(
            read as u64 == len,
            ErrorKind::UnexpectedEof,
            "Premature end of snapshot when reading a label."
        );

        String::from_utf8(bytes).map_err(|err| io_error!(ErrorKind::InvalidData, err))
    }
}

/// Reads exactly `N` bytes
pub(crate) fn read_bytes<const N: usize, R: Read>(reader: &mut R) -> Result<[u8; N]> {
    let mut buffer = [0u8; N];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn labels_are_little_endian() {
        let mut buffer = Vec::new();
        0x0102u16.write_label(&mut buffer).unwrap();
        (-2i32).write_label(&mut buffer).unwrap();
        String::from("äb").write_label(&mut buffer).unwrap();

        assert_eq!(&buffer[..6], &[2, 1, 0xfe, 0xff, 0xff, 0xff]);

        let mut reader = Cursor::new(buffer);
        assert_eq!(u16::read_label(&mut reader).unwrap(), 0x0102);
        assert_eq!(i32::read_label(&mut reader).unwrap(), -2);
        assert_eq!(String::read_label(&mut reader).unwrap(), "äb");
    }

    #[test]
    fn malformed_strings() {
        let mut truncated = Vec::new();
        String::from("abc").write_label(&mut truncated).unwrap();
        truncated.pop();
        let err = String::read_label(&mut Cursor::new(truncated)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let mut invalid = 2u64.to_le_bytes().to_vec();
        invalid.extend([0xc3, 0x28]);
        let err = String::read_label(&mut Cursor::new(invalid)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
