use std::io::{self, Read};

/// A primitive stored big-endian in a class file.
pub(crate) trait Readable: Sized {
    fn read_be<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;
}

pub(crate) trait ValueReaderExt: Read {
    fn read_value<T: Readable>(&mut self) -> io::Result<T>;
}

impl<R: Read + ?Sized> ValueReaderExt for R {
    fn read_value<T: Readable>(&mut self) -> io::Result<T> {
        T::read_be(self)
    }
}

macro_rules! big_endian {
    ($($t:ty),*) => {
        $(
            impl Readable for $t {
                fn read_be<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
                    let mut buf = [0u8; size_of::<$t>()];
                    reader.read_exact(&mut buf)?;
                    Ok(<$t>::from_be_bytes(buf))
                }
            }
        )*
    };
}

big_endian!(u8, u16, u32, i32, i64, f32, f64);

/// Reads `len` bytes and advances the reader by `len` bytes.
///
/// The buffer grows with the data actually read, so a forged length cannot make it allocate
/// more than the input holds.
pub(crate) fn read_byte_chunk<R>(reader: &mut R, len: usize) -> io::Result<Vec<u8>>
where
    R: Read + ?Sized,
{
    let mut buf = Vec::new();
    let read = Read::take(&mut *reader, len as u64).read_to_end(&mut buf)?;
    if read < len {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(buf)
}
