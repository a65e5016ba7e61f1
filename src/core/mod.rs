//! Pure geometry shared by the simulation, camera and renderer.

pub mod coordinates;
pub mod scale;
pub mod sidereal;
pub mod space;
