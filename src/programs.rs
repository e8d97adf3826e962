//! Bundled machine descriptions

use crate::error::MachineError;
use crate::machine::Machine;

const IS_PRIME: &str = include_str!("../programs/is_prime.toml");

/// Binary primality tester, compiled when no machine file is given
pub fn is_prime() -> Result<Machine, MachineError> {
    Machine::from_toml_str(IS_PRIME)
}
