//! CPF (Cadastro de Pessoas Físicas) validation.
//!
//! A CPF is 11 digits where the last two are check digits computed with a
//! weighted mod-11 sum over the preceding ones.

const CPF_LEN: usize = 11;

/// Returns true for an unformatted, 11-digit CPF with valid check digits.
///
/// Sequences of one repeated digit (`00000000000`, `11111111111`, ...) pass
/// the checksum but are not valid documents and are rejected.
pub fn is_valid(cpf: &str) -> bool {
    if cpf.len() != CPF_LEN || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        rest => rest,
    }
}
