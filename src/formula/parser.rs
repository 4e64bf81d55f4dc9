/// A single element entry of a parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol, e.g. `"Fe"`. Oxide-percent results reuse the type with
    /// a whole oxide formula as the label.
    pub label: String,
    /// Number of atoms of this element in the formula; fractional amounts are
    /// legal (solid solutions, nonstoichiometric phases).
    pub amount: f64,
}

impl Atom {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Parses a sanitized formula into an ordered element multiset.
///
/// Recursive descent over the character stream. An element symbol is a
/// maximal `[A-Z][a-z]*` run with an optional real count (default 1), a
/// parenthesized group distributes its trailing count over the interior, and
/// the adduct `*n` distributes `n` over everything to its right before fusing
/// it into the running multiset. Output order is first textual appearance.
///
/// The parser is total: it assumes input already accepted by the validator
/// and silently skips anything else, so it never panics.
pub fn parse(sanitized: &str) -> Vec<Atom> {
    let chars: Vec<char> = sanitized.chars().collect();
    let mut pos = 0;
    let mut atoms = parse_sequence(&chars, &mut pos);
    atoms.retain(|atom| atom.amount > 0.0);
    atoms
}

/// Parses until the end of input or an unconsumed closing bracket.
fn parse_sequence(chars: &[char], pos: &mut usize) -> Vec<Atom> {
    let mut acc: Vec<Atom> = Vec::new();
    while *pos < chars.len() {
        match chars[*pos] {
            ')' => break,
            '(' => {
                *pos += 1;
                let interior = parse_sequence(chars, pos);
                if *pos < chars.len() && chars[*pos] == ')' {
                    *pos += 1;
                }
                let multiplier = parse_number(chars, pos).unwrap_or(1.0);
                fuse(&mut acc, interior, multiplier);
            }
            '*' => {
                *pos += 1;
                let multiplier = parse_number(chars, pos).unwrap_or(1.0);
                let tail = parse_sequence(chars, pos);
                fuse(&mut acc, tail, multiplier);
            }
            c if c.is_ascii_uppercase() => {
                let label = parse_element(chars, pos);
                let amount = parse_number(chars, pos).unwrap_or(1.0);
                add(&mut acc, &label, amount);
            }
            _ => *pos += 1,
        }
    }
    acc
}

/// Consumes a `[A-Z][a-z]*` element symbol at the cursor.
fn parse_element(chars: &[char], pos: &mut usize) -> String {
    let mut label = String::new();
    label.push(chars[*pos]);
    *pos += 1;
    while *pos < chars.len() && chars[*pos].is_ascii_lowercase() {
        label.push(chars[*pos]);
        *pos += 1;
    }
    label
}

/// Consumes a `[0-9]+(\.[0-9]+)?` count at the cursor, if present.
fn parse_number(chars: &[char], pos: &mut usize) -> Option<f64> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return None;
    }
    if *pos < chars.len()
        && chars[*pos] == '.'
        && chars.get(*pos + 1).is_some_and(|c| c.is_ascii_digit())
    {
        *pos += 1;
        while *pos < chars.len() && chars[*pos].is_ascii_digit() {
            *pos += 1;
        }
    }
    chars[start..*pos].iter().collect::<String>().parse().ok()
}

/// Adds `sub`, scaled by `multiplier`, into `acc`, preserving the order in
/// which labels first appeared.
fn fuse(acc: &mut Vec<Atom>, sub: Vec<Atom>, multiplier: f64) {
    for atom in sub {
        add(acc, &atom.label, atom.amount * multiplier);
    }
}

fn add(acc: &mut Vec<Atom>, label: &str, amount: f64) {
    match acc.iter_mut().find(|atom| atom.label == label) {
        Some(atom) => atom.amount += amount,
        None => acc.push(Atom::new(label, amount)),
    }
}
