//! Parsing for human-friendly byte sizes passed to `--max-bytes`.

const KIB: u64 = 1024;

/// Parses a byte count with an optional binary suffix.
///
/// Accepts plain integers and the suffixes `k`, `m`, `g`, `t` in either case,
/// optionally followed by `B` or `iB`. A bare `B` means bytes. All suffixes
/// are powers of 1024.
///
/// # Errors
/// Returns a message suitable for clap when the input is empty, has no
/// digits, carries an unknown suffix, or overflows `u64`.
pub(crate) fn parse_byte_size(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let split = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(split);
    if digits.is_empty() {
        return Err(format!("`{raw}` must start with a non-negative integer"));
    }

    let value: u64 = digits
        .parse()
        .map_err(|err| format!("`{digits}` is not a valid byte count: {err}"))?;
    let multiplier = suffix_multiplier(suffix)
        .ok_or_else(|| format!("unknown size suffix `{suffix}`; expected K, M, G, or T"))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("`{raw}` does not fit in 64 bits"))
}

fn suffix_multiplier(suffix: &str) -> Option<u64> {
    let lowered = suffix.to_ascii_lowercase();
    let unit = lowered
        .strip_suffix("ib")
        .or_else(|| lowered.strip_suffix('b'))
        .unwrap_or(&lowered);
    let exponent = match unit {
        "" if lowered != "ib" => 0,
        "k" => 1,
        "m" => 2,
        "g" => 3,
        "t" => 4,
        _ => return None,
    };
    Some(KIB.pow(exponent))
}
