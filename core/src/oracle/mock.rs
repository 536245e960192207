use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::{CryptoOracle, OracleError};

/// Deterministic stand-in for local development.
///
/// Treats every ciphertext and token as a plain decimal integer:
/// mean = sum * n^-1 mod m, key switch = c * t1 * t2^-1 mod m.
/// Nothing is encrypted.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockOracle;

impl MockOracle {
    pub fn new() -> Self {
        Self
    }
}

fn parse(label: &str, value: &str) -> Result<BigUint, OracleError> {
    BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| OracleError::InvalidInput(format!("{} is not a decimal integer", label)))
}

fn parse_modulus(modulus: &str) -> Result<BigUint, OracleError> {
    let m = parse("modulus", modulus)?;
    if m.is_zero() || m.is_one() {
        return Err(OracleError::InvalidInput(
            "modulus must be greater than one".to_string(),
        ));
    }
    Ok(m)
}

fn invert(label: &str, value: &BigUint, m: &BigUint) -> Result<BigUint, OracleError> {
    value
        .modinv(m)
        .ok_or_else(|| OracleError::InvalidInput(format!("{} is not invertible mod m", label)))
}

impl CryptoOracle for MockOracle {
    fn compute_modular_mean(
        &self,
        modulus: &str,
        ciphertexts: &[&str],
    ) -> Result<String, OracleError> {
        let m = parse_modulus(modulus)?;
        if ciphertexts.is_empty() {
            return Err(OracleError::InvalidInput("no ciphertexts".to_string()));
        }

        let mut sum = BigUint::zero();
        for ciphertext in ciphertexts {
            sum += parse("ciphertext", ciphertext)?;
        }

        let count = BigUint::from(ciphertexts.len());
        let inverse = invert("subject count", &count, &m)?;

        Ok(((sum % &m) * inverse % &m).to_string())
    }

    fn key_switch(
        &self,
        modulus: &str,
        first_token: &str,
        second_token: &str,
        ciphertext: &str,
    ) -> Result<String, OracleError> {
        let m = parse_modulus(modulus)?;
        let c = parse("ciphertext", ciphertext)?;
        let t1 = parse("first token", first_token)?;
        let t2 = parse("second token", second_token)?;
        let t2_inverse = invert("second token", &t2, &m)?;

        Ok((c * t1 % &m * t2_inverse % &m).to_string())
    }
}
