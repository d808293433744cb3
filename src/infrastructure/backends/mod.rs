mod generator;
mod mailer;
mod payments;

pub use generator::*;
pub use mailer::*;
pub use payments::*;
