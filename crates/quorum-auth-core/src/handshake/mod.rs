pub mod initiator;
pub mod acceptor;

pub use initiator::*;
pub use acceptor::*;

#[cfg(test)]
pub(crate) mod test_context;


#[cfg(test)]
mod acceptor_tests;
