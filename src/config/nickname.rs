//! Random default-nickname generator.

use rand::RngExt;

/// Generate a nickname like `Guest042` for users with no configured nick.
pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let num: u16 = rng.random_range(0..1000);
    format!("Guest{:03}", num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_nickname_shape() {
        let nick = generate_nickname();
        assert!(nick.starts_with("Guest"));
        assert!(nick.len() <= 9, "must fit the usual IRC nick limit");
        assert!(!nick.contains(' '));
    }
}
