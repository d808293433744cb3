mod account;
mod lesson;
mod payment;
mod remote;

pub use account::*;
pub use lesson::*;
pub use payment::*;
pub use remote::*;
