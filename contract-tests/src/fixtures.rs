//! Random task data, so repeated runs never collide with leftovers.

use rand::Rng;

const HEX: &[u8] = b"0123456789abcdef";

/// `len` random lowercase hex characters.
pub fn random_text(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// A `YYYY-M-D` date in 2000..=2025. Days stop at 28 so every month is valid.
pub fn random_date() -> String {
    random_date_with(None, None, None)
}

/// Like `random_date`, with any component pinned.
pub fn random_date_with(year: Option<u32>, month: Option<u32>, day: Option<u32>) -> String {
    let mut rng = rand::thread_rng();
    let year = year.unwrap_or_else(|| rng.gen_range(2000..=2025));
    let month = month.unwrap_or_else(|| rng.gen_range(1..=12));
    let day = day.unwrap_or_else(|| rng.gen_range(1..=28));
    format!("{year}-{month}-{day}")
}
