//! Decoder trait for type-safe conversions toward structured key material.

/// Converts `self` (of source type `T`) into the destination type `D`.
///
/// The destination must be marked with [`DecodableFrom<T>`] so that only
/// conversions the workspace actually defines are expressible.
///
/// # Examples
///
/// ```no_run
/// use rsakit::decoder::{DecodableFrom, Decoder};
///
/// struct Raw(Vec<u8>);
/// struct Text(String);
///
/// #[derive(Debug)]
/// struct MyError;
///
/// impl DecodableFrom<Raw> for Text {}
///
/// impl Decoder<Raw, Text> for Raw {
///     type Error = MyError;
///
///     fn decode(&self) -> Result<Text, Self::Error> {
///         Ok(Text(String::from_utf8_lossy(&self.0).to_string()))
///     }
/// }
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails; the conditions depend on the
    /// implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait: type `D` can be decoded from type `T`.
///
/// Has no methods; implementing it for a `(source, destination)` pair is what
/// permits the corresponding [`Decoder`] implementation.
pub trait DecodableFrom<T> {}
