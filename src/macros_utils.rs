//! Paths used by the code generated with `#[derive(Injectable)]`.

pub mod aliases {
    pub use alloc::vec::Vec;
}
