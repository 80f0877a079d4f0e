//! OCR error repair for reconstructed label lines

/// One substring substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Built-in repair list. Order is significant: abbreviations are expanded
/// before accents are folded on the expanded form.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    (" mi)", " ml)"),
    ("(6)", "(g)"),
    ("monoinsat.", "monoinsaturada"),
    ("poliinsat.", "poliinsaturada"),
    ("H. de C. disponibles", "Carbohidratos disponibles"),
    ("Azúcares Totales", "Azucares Totales"),
    ("Proteínas", "Proteinas"),
    ("Grasa Total", "Grasa total"),
    ("Fósforo", "Fosforo"),
    (" 06 ", " 90 "),
];

/// Unit markers the engine sometimes detaches onto their own row
const DETACHED_UNITS: [&str; 2] = ["(g)", "(mg)"];

/// Applies the line merge rule and the replacement list
#[derive(Debug, Clone)]
pub struct LineNormalizer<'a> {
    replacements: &'a [Replacement],
}

impl<'a> LineNormalizer<'a> {
    pub fn new(replacements: &'a [Replacement]) -> Self {
        Self { replacements }
    }

    /// Normalize lines, preserving order
    ///
    /// A line that is only a detached unit marker is appended to the previous
    /// output line instead of being emitted.
    pub fn normalize(&self, lines: &[String]) -> Vec<String> {
        let mut fixed: Vec<String> = Vec::with_capacity(lines.len());

        for line in lines {
            let trimmed = line.trim();
            if DETACHED_UNITS.contains(&trimmed) {
                if let Some(previous) = fixed.last_mut() {
                    previous.push(' ');
                    previous.push_str(trimmed);
                    continue;
                }
            }
            fixed.push(self.repair(line));
        }

        fixed
    }

    fn repair(&self, line: &str) -> String {
        self.replacements
            .iter()
            .fold(line.to_string(), |acc, r| acc.replace(&r.from, &r.to))
    }
}
