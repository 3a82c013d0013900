//! Human scaled rendering of metrics-server quantities.

const NANOS_PER_MILLI: u64 = 1_000_000;
const KI_PER_MI: u64 = 1024;
const MI_PER_GI: u64 = 1024;

/// Parse a quantity such as `2500000n` into its integer part.
fn strip_unit(raw: &str, unit: &str) -> Option<u64> {
    raw.strip_suffix(unit)?.parse().ok()
}

/// Nanocores as reported by metrics-server, `"0"` included.
pub fn nanocores(raw: &str) -> Option<u64> {
    strip_unit(raw, "n").or_else(|| (raw == "0").then_some(0))
}

/// Kibibytes as reported by metrics-server, `"0"` included.
pub fn kibibytes(raw: &str) -> Option<u64> {
    strip_unit(raw, "Ki").or_else(|| (raw == "0").then_some(0))
}

/// Convert nanocores (`"2500000n"`) to `"2m500000n"`.
///
/// The millicore part is left out when it is zero. Input that is not an
/// integer followed by `n` is returned unchanged.
pub fn nc_to_mc(raw: &str) -> String {
    let Some(nanos) = strip_unit(raw, "n") else {
        return raw.to_string();
    };
    format_nanocores(nanos)
}

pub(crate) fn format_nanocores(nanos: u64) -> String {
    let millis = nanos / NANOS_PER_MILLI;
    let rest = nanos % NANOS_PER_MILLI;
    if millis == 0 {
        format!("{rest}n")
    } else {
        format!("{millis}m{rest}n")
    }
}

/// Convert kibibytes (`"1572864Ki"`) to `"1Gi512Mi0Ki"`.
///
/// Input that is not an integer followed by `Ki` is returned unchanged.
pub fn ki_to_mi_or_gi(raw: &str) -> String {
    let Some(kibis) = strip_unit(raw, "Ki") else {
        return raw.to_string();
    };
    format_kibibytes(kibis)
}

pub(crate) fn format_kibibytes(kibis: u64) -> String {
    let mebis = kibis / KI_PER_MI;
    let ki = kibis % KI_PER_MI;
    if mebis < MI_PER_GI {
        if mebis == 0 {
            format!("{ki}Ki")
        } else {
            format!("{mebis}Mi{ki}Ki")
        }
    } else {
        let gi = mebis / MI_PER_GI;
        let mi = mebis % MI_PER_GI;
        format!("{gi}Gi{mi}Mi{ki}Ki")
    }
}
