//! Encoder trait, the reverse direction of [`crate::decoder`].

/// Converts `self` (of source type `T`) into the destination type `E`,
/// moving one step toward the wire representation.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in the
    /// destination encoding.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait: type `E` is a valid encoding target for type `T`.
pub trait EncodableTo<T> {}
