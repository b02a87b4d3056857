/// Bool-returning checks of the engine's output, meant for `debug_assert!`
pub mod assertions;
mod fpa;

#[doc(inline)]
pub use fpa::FPA;
