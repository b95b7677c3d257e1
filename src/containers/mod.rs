pub mod compression;
pub mod lbm;

use crate::error::Result;

/// A container format recognised by its leading magic bytes.
pub trait ContainerHandler {
    type Output;

    fn magic_word() -> &'static [u8];
    fn matches(data: &[u8]) -> bool {
        data.starts_with(Self::magic_word())
    }
    fn deserialise(&self, data: &[u8]) -> Result<Self::Output>;
}
