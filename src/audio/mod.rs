pub mod analysis;
pub mod bands;
pub mod buffer;
pub mod decode;
pub mod framer;
pub mod separate;
pub mod transform;
