mod bits;
mod cracker;
mod error;
mod mt19937;
mod predictor;
mod temper;
mod twist;

pub use bits::Bits32;
pub use cracker::{Mode, RandCracker, Submission, REQUIRED_BITS};
pub use error::CrackError;
pub use mt19937::{Mt19937, N as STATE_WORDS};
pub use temper::{harden, temper, unharden, untemper};
pub use twist::{twist, untwist};
