/// Deterministic seed for a date key: polynomial hash with 32-bit signed
/// wraparound, absolute value taken. Same input always yields the same output
/// within and across runs; used only as `seed(month_day) % catalog_len` to
/// pick a fallback celebrity.
pub fn seed(date_key: &str) -> u32 {
    let mut hash: i32 = 0;
    for ch in date_key.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash.unsigned_abs()
}
