use ark_serialize::SerializationError;

#[derive(Debug)]
pub enum PrsError {
    /// The first byte of a compressed point was neither 0x02 nor 0x03
    InvalidPrefix(u8),
    /// The x-coordinate does not correspond to a point on the curve, or the
    /// point cannot be represented in compressed form
    InvalidPoint,
    /// Expected and actual byte length of a decoded object
    InvalidLength(usize, usize),
    /// A scalar that must be invertible was zero
    ZeroScalar,
    Serialization(SerializationError),
}

impl From<SerializationError> for PrsError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
