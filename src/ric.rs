//! Resin Identification Code normalization.
//!
//! Upstream agents return RIC codes in whatever shape the model produced
//! ("6", "#6", "ps 6", "PET 1"). Everything is canonicalized to
//! `MATERIAL #N` before it reaches synthesis or the renderer, so the
//! acceptance comparison is always like against like.

/// The seven standard codes, in canonical form.
pub const VALID_PLASTICS: [&str; 7] = [
    "PET #1", "HDPE #2", "PVC #3", "LDPE #4", "PP #5", "PS #6", "OTHER #7",
];

fn material_for_number(n: &str) -> Option<&'static str> {
    Some(match n {
        "1" => "PET",
        "2" => "HDPE",
        "3" => "PVC",
        "4" => "LDPE",
        "5" => "PP",
        "6" => "PS",
        "7" => "OTHER",
        _ => return None,
    })
}

/// Canonicalize a RIC code to `MATERIAL #N`.
///
/// Bare numbers map through the standard table; otherwise the letters and
/// digits are re-joined (`"ps#6"` → `"PS #6"`). Unparseable input comes
/// back uppercased as-is.
pub fn normalize(ric_code: &str) -> String {
    let upper = ric_code.trim().to_uppercase();
    let bare = upper.strip_prefix('#').unwrap_or(&upper);
    if let Some(material) = material_for_number(bare) {
        return format!("{material} #{bare}");
    }

    let cleaned: String = upper.chars().filter(|c| !c.is_whitespace() && *c != '#').collect();
    let material: String = cleaned.chars().filter(|c| c.is_alphabetic()).collect();
    let number: String = cleaned.chars().filter(|c| c.is_ascii_digit()).collect();

    if !material.is_empty() && !number.is_empty() {
        format!("{material} #{number}")
    } else {
        upper
    }
}

/// Whether `code` normalizes to one of the seven standard plastic codes.
pub fn is_valid_plastic(code: &str) -> bool {
    VALID_PLASTICS.contains(&normalize(code).as_str())
}
