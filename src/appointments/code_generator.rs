use rand::Rng;

/// Generate a human-readable appointment code: two uppercase letters
/// followed by six digits, e.g. "QK483920".
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letters: String = (0..2)
        .map(|_| rng.gen_range(b'A'..=b'Z') as char)
        .collect();
    let digits = rng.gen_range(100_000..1_000_000);
    format!("{}{}", letters, digits)
}
