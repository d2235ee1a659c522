//! Join code generation for cases.
//!
//! Join codes are 10-character strings over Crockford's Base32 alphabet,
//! used as share links for the second participant.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

/// Generate a join code for a case.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(10);
    for _ in 0..10 {
        let idx = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[idx] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_codes_have_correct_length_and_alphabet() {
        let code = generate_join_code();
        assert_eq!(code.len(), 10);
        assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
    }

    #[test]
    fn join_codes_differ() {
        assert_ne!(generate_join_code(), generate_join_code());
    }
}
