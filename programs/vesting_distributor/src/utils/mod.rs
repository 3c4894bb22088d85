pub mod account;
pub mod merkle;
pub mod token;

pub use account::*;
pub use merkle::*;
pub use token::*;
